//! # Restaurant API
//!
//! Catalog reads: front page, details, ranking, name search and the
//! reference data behind the filter options.

use crate::api::client::{ApiClient, ApiError};
use crate::api::types::{
    Area, GenreLabel, PageResponse, Prefecture, RankingResults, Restaurant, RestaurantCard,
    RestaurantSummary, SoupBaseEntry,
};

/// Ordered query parameters; repeated keys are allowed.
pub type QueryParams = [(&'static str, String)];

impl ApiClient {
    /// `GET /restaurants/frontpage-cards`
    pub async fn frontpage_cards(&self) -> Result<Vec<RestaurantCard>, ApiError> {
        let url = self.api_url("/restaurants/frontpage-cards");
        self.send_json(self.client.get(&url), None, "front page")
            .await
    }

    /// `GET /restaurants/{id}`
    pub async fn restaurant(&self, id: u64) -> Result<Restaurant, ApiError> {
        let url = self.api_url(&format!("/restaurants/{}", id));
        self.send_json(self.client.get(&url), None, "restaurant")
            .await
    }

    /// `GET /ranking/top?limit=`
    pub async fn top_restaurants(&self, limit: u32) -> Result<Vec<RestaurantSummary>, ApiError> {
        let url = self.api_url("/ranking/top");
        self.send_json(
            self.client.get(&url).query(&[("limit", limit)]),
            None,
            "top ranking",
        )
        .await
    }

    /// `GET /ranking` with filter, sort and pagination parameters.
    pub async fn ranking(&self, params: &QueryParams) -> Result<RankingResults, ApiError> {
        let url = self.api_url("/ranking");
        self.send_json(self.client.get(&url).query(params), None, "ranking")
            .await
    }

    /// `GET /restaurants?name=&page=&size=&paginated=true`
    pub async fn search_restaurants(
        &self,
        params: &QueryParams,
    ) -> Result<PageResponse<RestaurantSummary>, ApiError> {
        let url = self.api_url("/restaurants");
        self.send_json(self.client.get(&url).query(params), None, "search")
            .await
    }

    /// `GET /restaurants/genres`
    pub async fn genres(&self) -> Result<Vec<GenreLabel>, ApiError> {
        let url = self.api_url("/restaurants/genres");
        self.send_json(self.client.get(&url), None, "genres").await
    }

    /// `GET /restaurants/soupbases`
    pub async fn soup_bases(&self) -> Result<Vec<SoupBaseEntry>, ApiError> {
        let url = self.api_url("/restaurants/soupbases");
        self.send_json(self.client.get(&url), None, "soup bases")
            .await
    }

    /// `GET /address/prefectures`
    pub async fn prefectures(&self) -> Result<Vec<Prefecture>, ApiError> {
        let url = self.api_url("/address/prefectures");
        self.send_json(self.client.get(&url), None, "prefectures")
            .await
    }

    /// `GET /restaurants/areas`
    pub async fn areas(&self) -> Result<Vec<Area>, ApiError> {
        let url = self.api_url("/restaurants/areas");
        self.send_json(self.client.get(&url), None, "areas").await
    }
}
