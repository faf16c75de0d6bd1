//! # Comment Page and Photo Gallery
//!
//! A restaurant's comments arrive one bounded page at a time, newest first.
//! Its photos come from a separate endpoint as one full list. The two are
//! fetched and refreshed independently; a failure in one leaves the other
//! (and its own previous data) in place.
//!
//! The gallery shows a capped preview with a "+N more" overflow, and a
//! viewer that steps through the full list, wrapping at both ends.

use log::{debug, warn};

use crate::api::{ApiError, Comment, GalleryPhoto, PageResponse, RamenApi};
use crate::error::{RamenError, Result};

pub const DEFAULT_COMMENT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// Position reached by moving `delta` steps from `index` in a ring of `len`.
pub fn cycle_index(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (index as i64 + delta).rem_euclid(len) as usize
}

#[derive(Debug)]
pub struct Gallery {
    restaurant_id: u64,
    page: u32,
    page_size: u32,
    preview_count: usize,
    comments: Option<PageResponse<Comment>>,
    photos: Vec<GalleryPhoto>,
    viewer: Option<usize>,
    comments_error: Option<String>,
    photos_error: Option<String>,
}

impl Gallery {
    pub fn new(restaurant_id: u64) -> Self {
        Self::with_sizes(restaurant_id, DEFAULT_COMMENT_PAGE_SIZE, DEFAULT_PREVIEW_COUNT)
    }

    pub fn with_sizes(restaurant_id: u64, page_size: u32, preview_count: usize) -> Self {
        Self {
            restaurant_id,
            page: 0,
            page_size: page_size.max(1),
            preview_count,
            comments: None,
            photos: Vec::new(),
            viewer: None,
            comments_error: None,
            photos_error: None,
        }
    }

    pub fn restaurant_id(&self) -> u64 {
        self.restaurant_id
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn comments(&self) -> Option<&PageResponse<Comment>> {
        self.comments.as_ref()
    }

    pub fn photos(&self) -> &[GalleryPhoto] {
        &self.photos
    }

    pub fn comments_error(&self) -> Option<&str> {
        self.comments_error.as_deref()
    }

    pub fn photos_error(&self) -> Option<&str> {
        self.photos_error.as_deref()
    }

    /// Fetch the current comment page.
    pub async fn refresh_comments<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let result = api
            .comments_page(self.restaurant_id, self.page, self.page_size)
            .await;
        self.apply_comments(result)
    }

    /// Fetch the full photo list.
    pub async fn refresh_photos<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let result = api.restaurant_photos(self.restaurant_id).await;
        self.apply_photos(result)
    }

    /// Refresh both views concurrently. Each is applied on its own; the
    /// first failure is returned after both have been handled.
    pub async fn refresh<A: RamenApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let (comments, photos) = tokio::join!(
            api.comments_page(self.restaurant_id, self.page, self.page_size),
            api.restaurant_photos(self.restaurant_id)
        );
        let comments = self.apply_comments(comments);
        let photos = self.apply_photos(photos);
        comments.and(photos)
    }

    pub async fn go_to_page<A: RamenApi + ?Sized>(&mut self, api: &A, page: u32) -> Result<()> {
        self.page = page;
        self.refresh_comments(api).await
    }

    fn apply_comments(
        &mut self,
        result: std::result::Result<PageResponse<Comment>, ApiError>,
    ) -> Result<()> {
        match result {
            Ok(page) => {
                debug!(
                    "restaurant {}: comment page {} of {}",
                    self.restaurant_id,
                    page.page_number + 1,
                    page.total_pages.max(1)
                );
                self.comments = Some(page);
                self.comments_error = None;
                Ok(())
            }
            Err(e) => {
                let err = RamenError::from(e);
                warn!("comment page fetch failed: {}", err);
                self.comments_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn apply_photos(
        &mut self,
        result: std::result::Result<Vec<GalleryPhoto>, ApiError>,
    ) -> Result<()> {
        match result {
            Ok(photos) => {
                debug!("restaurant {}: {} photos", self.restaurant_id, photos.len());
                self.photos = photos;
                self.photos_error = None;
                if self.viewer.is_some_and(|i| i >= self.photos.len()) {
                    self.viewer = None;
                }
                Ok(())
            }
            Err(e) => {
                let err = RamenError::from(e);
                warn!("gallery fetch failed: {}", err);
                self.photos_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Photos shown before the overflow.
    pub fn preview(&self) -> &[GalleryPhoto] {
        &self.photos[..self.photos.len().min(self.preview_count)]
    }

    /// Photos hidden behind the overflow.
    pub fn overflow(&self) -> usize {
        self.photos.len().saturating_sub(self.preview_count)
    }

    pub fn overflow_label(&self) -> Option<String> {
        match self.overflow() {
            0 => None,
            n => Some(format!("+{n} more")),
        }
    }

    /// Open the viewer on `index`, if there is such a photo.
    pub fn open_viewer(&mut self, index: usize) -> Option<&GalleryPhoto> {
        if index >= self.photos.len() {
            return None;
        }
        self.viewer = Some(index);
        self.photos.get(index)
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    pub fn viewer_index(&self) -> Option<usize> {
        self.viewer
    }

    pub fn current(&self) -> Option<&GalleryPhoto> {
        self.viewer.and_then(|i| self.photos.get(i))
    }

    pub fn next(&mut self) -> Option<&GalleryPhoto> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<&GalleryPhoto> {
        self.step(-1)
    }

    fn step(&mut self, delta: i64) -> Option<&GalleryPhoto> {
        let index = cycle_index(self.viewer?, delta, self.photos.len());
        self.viewer = Some(index);
        self.photos.get(index)
    }
}
