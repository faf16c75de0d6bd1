//! # Ranking Query Engine
//!
//! Holds the filter state and the page it last produced. Every change to a
//! filter dimension issues exactly one `/ranking` fetch.
//!
//! Fetches are not cancelled when superseded. Each one takes a
//! [`FetchTicket`] from a monotonically increasing epoch, and only the
//! response carrying the newest ticket is applied; anything older is
//! dropped on arrival whatever order responses complete in.

use log::{debug, warn};

use crate::api::{ApiError, Area, Genre, RamenApi, RankingResults, RestaurantSummary, SoupBase};
use crate::error::{RamenError, Result, ValidationError};
use crate::query::catalog::OptionsCatalog;
use crate::query::filters::{FilterState, SortBy, SortDirection};
use crate::query::to_api_page;

/// Identifies one issued fetch and the parameters it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    params: Vec<(&'static str, String)>,
}

impl FetchTicket {
    pub(crate) fn new(epoch: u64, params: Vec<(&'static str, String)>) -> Self {
        Self { epoch, params }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }
}

/// A restaurant with its absolute position across all pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    pub rank: u64,
    pub restaurant: &'a RestaurantSummary,
}

#[derive(Debug, Default)]
pub struct RankingEngine {
    filter: FilterState,
    catalog: OptionsCatalog,
    results: Option<RankingResults>,
    last_error: Option<String>,
    epoch: u64,
    loading: bool,
}

impl RankingEngine {
    pub fn new(catalog: OptionsCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn catalog(&self) -> &OptionsCatalog {
        &self.catalog
    }

    pub fn results(&self) -> Option<&RankingResults> {
        self.results.as_ref()
    }

    /// Message of the last failed fetch; cleared by the next applied one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Areas offered for the currently selected prefecture.
    pub fn area_options(&self) -> Vec<&Area> {
        self.catalog.areas_for(self.filter.prefecture_id)
    }

    /// Rows of the current page numbered `page * size + index + 1`.
    pub fn ranked_rows(&self) -> Vec<RankedRow<'_>> {
        let Some(results) = &self.results else {
            return Vec::new();
        };
        let offset = match results {
            RankingResults::Page(page) => u64::from(page.page_number) * u64::from(page.page_size),
            RankingResults::List(_) => 0,
        };
        results
            .items()
            .iter()
            .enumerate()
            .map(|(i, restaurant)| RankedRow {
                rank: offset + i as u64 + 1,
                restaurant,
            })
            .collect()
    }

    /// Start a fetch for the current filter state.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.loading = true;
        FetchTicket::new(self.epoch, self.filter.to_params())
    }

    /// Apply a fetch outcome if its ticket is still the newest.
    ///
    /// Returns `Ok(false)` when the response was stale and dropped. A failed
    /// fetch keeps the previous results and records the error.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<RankingResults, ApiError>,
    ) -> Result<bool> {
        if ticket.epoch != self.epoch {
            debug!(
                "dropping stale ranking response (epoch {}, current {})",
                ticket.epoch, self.epoch
            );
            return Ok(false);
        }
        self.loading = false;
        match result {
            Ok(results) => {
                debug!(
                    "ranking page: {} rows of {}",
                    results.items().len(),
                    results.total_elements()
                );
                self.results = Some(results);
                self.last_error = None;
                Ok(true)
            }
            Err(e) => {
                let err = RamenError::from(e);
                warn!("ranking fetch failed: {}", err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch the page for the current filter state.
    pub async fn refresh<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<bool> {
        let ticket = self.begin_fetch();
        let result = api.ranking(ticket.params()).await;
        self.finish_fetch(ticket, result)
    }

    pub async fn select_prefecture<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        prefecture_id: Option<u64>,
    ) -> Result<bool> {
        self.filter.set_prefecture(prefecture_id, &self.catalog.areas);
        self.refresh(api).await
    }

    /// Select an area. Rejected locally, without a fetch, when it is not an
    /// area of the selected prefecture.
    pub async fn select_area<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        area_id: Option<u64>,
    ) -> Result<bool> {
        self.filter.set_area(area_id, &self.catalog.areas)?;
        self.refresh(api).await
    }

    pub async fn toggle_genre<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        genre: Genre,
    ) -> Result<bool> {
        self.filter.toggle_genre(genre);
        self.refresh(api).await
    }

    pub async fn set_genres<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        genres: Vec<Genre>,
    ) -> Result<bool> {
        self.filter.set_genres(genres);
        self.refresh(api).await
    }

    pub async fn toggle_soup_base<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        soup_base: SoupBase,
    ) -> Result<bool> {
        self.filter.toggle_soup_base(soup_base);
        self.refresh(api).await
    }

    pub async fn set_soup_bases<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        soup_bases: Vec<SoupBase>,
    ) -> Result<bool> {
        self.filter.set_soup_bases(soup_bases);
        self.refresh(api).await
    }

    pub async fn set_min_score<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        min_score: f64,
    ) -> Result<bool> {
        self.filter.set_min_score(min_score);
        self.refresh(api).await
    }

    pub async fn set_sort<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        sort_by: SortBy,
        sort_direction: SortDirection,
    ) -> Result<bool> {
        self.filter.sort_by = sort_by;
        self.filter.sort_direction = sort_direction;
        self.refresh(api).await
    }

    /// Navigate by 0-indexed server page.
    pub async fn go_to_page<A: RamenApi + ?Sized>(&mut self, api: &A, page: u32) -> Result<bool> {
        self.filter.page = page;
        self.refresh(api).await
    }

    /// Navigate by 1-indexed page number as shown to the user.
    pub async fn go_to_ui_page<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        ui_page: u32,
    ) -> Result<bool> {
        let page = to_api_page(ui_page).ok_or(ValidationError::PageOutOfRange)?;
        self.go_to_page(api, page).await
    }

    /// Restore every dimension to its default in one step, then fetch once.
    pub async fn reset<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<bool> {
        self.filter = FilterState::default();
        self.refresh(api).await
    }

    /// Replace the whole filter state at once (e.g. from command-line flags),
    /// re-applying the cascade rule, then fetch once.
    pub async fn apply<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        filter: FilterState,
    ) -> Result<bool> {
        let area_id = filter.area_id;
        let mut next = FilterState {
            area_id: None,
            ..filter
        };
        next.set_area(area_id, &self.catalog.areas)?;
        self.filter = next;
        self.refresh(api).await
    }
}
