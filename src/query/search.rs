//! Name search over `/restaurants`.
//!
//! Unlike the ranking filters, a search runs only when explicitly submitted.
//! It shares the ranking engine's epoch rule: only the newest request may
//! replace the results.

use log::{debug, warn};

use crate::api::{ApiError, PageResponse, RamenApi, RestaurantSummary};
use crate::error::{RamenError, Result};
use crate::query::engine::FetchTicket;
use crate::query::filters::DEFAULT_PAGE_SIZE;

#[derive(Debug)]
pub struct NameSearch {
    term: String,
    page: u32,
    page_size: u32,
    results: Option<PageResponse<RestaurantSummary>>,
    last_error: Option<String>,
    epoch: u64,
}

impl Default for NameSearch {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            results: None,
            last_error: None,
            epoch: 0,
        }
    }
}

impl NameSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> Option<&PageResponse<RestaurantSummary>> {
        self.results.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.term.clone()),
            ("page", self.page.to_string()),
            ("size", self.page_size.to_string()),
            ("paginated", "true".to_string()),
        ]
    }

    /// Run a new search from page 0. A blank term clears the results
    /// without a request.
    pub async fn submit<A: RamenApi + ?Sized>(&mut self, api: &A, term: &str) -> Result<bool> {
        let term = term.trim();
        if term.is_empty() {
            self.epoch += 1;
            self.term.clear();
            self.page = 0;
            self.results = None;
            self.last_error = None;
            return Ok(true);
        }
        self.term = term.to_string();
        self.page = 0;
        self.fetch(api).await
    }

    /// Move to another 0-indexed page of the current search.
    pub async fn go_to_page<A: RamenApi + ?Sized>(&mut self, api: &A, page: u32) -> Result<bool> {
        if self.term.is_empty() {
            return Ok(false);
        }
        self.page = page;
        self.fetch(api).await
    }

    /// Start a request for the current term and page.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        FetchTicket::new(self.epoch, self.params())
    }

    /// Apply a response if its ticket is still the newest. A failed search
    /// keeps the previous results and records the error.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<PageResponse<RestaurantSummary>, ApiError>,
    ) -> Result<bool> {
        if ticket.epoch() != self.epoch {
            debug!("dropping stale search response for epoch {}", ticket.epoch());
            return Ok(false);
        }
        match result {
            Ok(page) => {
                debug!("search '{}': {} matches", self.term, page.total_elements);
                self.results = Some(page);
                self.last_error = None;
                Ok(true)
            }
            Err(e) => {
                let err = RamenError::from(e);
                warn!("search failed: {}", err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn fetch<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<bool> {
        let ticket = self.begin_fetch();
        let result = api.search_restaurants(ticket.params()).await;
        self.finish_fetch(ticket, result)
    }
}
