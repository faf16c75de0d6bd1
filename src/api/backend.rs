//! The seam between the client components and the HTTP adapter.
//!
//! Session, query, submission and gallery code talk to [`RamenApi`] rather
//! than to [`ApiClient`] directly, so they can run against a scripted
//! backend in tests.

use async_trait::async_trait;

use crate::api::auth::LoginResponse;
use crate::api::client::{ApiClient, ApiError};
use crate::api::restaurants::QueryParams;
use crate::api::types::*;

/// Every remote operation the client components consume.
///
/// Authenticated operations take the bearer token explicitly; the caller
/// (normally the session manager) decides which token to send.
#[async_trait]
pub trait RamenApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, data: &RegistrationRequest) -> Result<UserIdentity, ApiError>;
    async fn current_user(&self, token: &str) -> Result<UserIdentity, ApiError>;
    async fn recaptcha_site_key(&self) -> Result<String, ApiError>;

    async fn frontpage_cards(&self) -> Result<Vec<RestaurantCard>, ApiError>;
    async fn restaurant(&self, id: u64) -> Result<Restaurant, ApiError>;
    async fn top_restaurants(&self, limit: u32) -> Result<Vec<RestaurantSummary>, ApiError>;
    async fn ranking(&self, params: &QueryParams) -> Result<RankingResults, ApiError>;
    async fn search_restaurants(
        &self,
        params: &QueryParams,
    ) -> Result<PageResponse<RestaurantSummary>, ApiError>;
    async fn genres(&self) -> Result<Vec<GenreLabel>, ApiError>;
    async fn soup_bases(&self) -> Result<Vec<SoupBaseEntry>, ApiError>;
    async fn prefectures(&self) -> Result<Vec<Prefecture>, ApiError>;
    async fn areas(&self) -> Result<Vec<Area>, ApiError>;

    async fn comments_page(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Comment>, ApiError>;
    async fn comments_for_restaurant(&self, restaurant_id: u64) -> Result<Vec<Comment>, ApiError>;
    async fn comment(&self, comment_id: u64) -> Result<Comment, ApiError>;
    async fn restaurant_photos(&self, restaurant_id: u64) -> Result<Vec<GalleryPhoto>, ApiError>;
    async fn latest_photo(&self, restaurant_id: u64) -> Result<Option<String>, ApiError>;

    async fn create_comment(
        &self,
        token: &str,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError>;
    async fn create_comment_with_photos(
        &self,
        token: &str,
        request: &CommentRequest,
        photos: &[PhotoUpload],
    ) -> Result<MultipartCommentResponse, ApiError>;
    async fn update_comment(
        &self,
        token: &str,
        comment_id: u64,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError>;
    async fn delete_comment(&self, token: &str, comment_id: u64) -> Result<(), ApiError>;
    async fn upload_comment_photos(
        &self,
        token: &str,
        comment_id: u64,
        photos: &[PhotoUpload],
    ) -> Result<FileUploadResponse, ApiError>;
    async fn can_comment(
        &self,
        token: &str,
        restaurant_id: u64,
    ) -> Result<CommentEligibility, ApiError>;
    async fn report_comment(
        &self,
        token: &str,
        report: &ReportCommentRequest,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl RamenApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, credentials).await
    }

    async fn register(&self, data: &RegistrationRequest) -> Result<UserIdentity, ApiError> {
        ApiClient::register(self, data).await
    }

    async fn current_user(&self, token: &str) -> Result<UserIdentity, ApiError> {
        ApiClient::current_user(self, token).await
    }

    async fn recaptcha_site_key(&self) -> Result<String, ApiError> {
        ApiClient::recaptcha_site_key(self).await
    }

    async fn frontpage_cards(&self) -> Result<Vec<RestaurantCard>, ApiError> {
        ApiClient::frontpage_cards(self).await
    }

    async fn restaurant(&self, id: u64) -> Result<Restaurant, ApiError> {
        ApiClient::restaurant(self, id).await
    }

    async fn top_restaurants(&self, limit: u32) -> Result<Vec<RestaurantSummary>, ApiError> {
        ApiClient::top_restaurants(self, limit).await
    }

    async fn ranking(&self, params: &QueryParams) -> Result<RankingResults, ApiError> {
        ApiClient::ranking(self, params).await
    }

    async fn search_restaurants(
        &self,
        params: &QueryParams,
    ) -> Result<PageResponse<RestaurantSummary>, ApiError> {
        ApiClient::search_restaurants(self, params).await
    }

    async fn genres(&self) -> Result<Vec<GenreLabel>, ApiError> {
        ApiClient::genres(self).await
    }

    async fn soup_bases(&self) -> Result<Vec<SoupBaseEntry>, ApiError> {
        ApiClient::soup_bases(self).await
    }

    async fn prefectures(&self) -> Result<Vec<Prefecture>, ApiError> {
        ApiClient::prefectures(self).await
    }

    async fn areas(&self) -> Result<Vec<Area>, ApiError> {
        ApiClient::areas(self).await
    }

    async fn comments_page(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Comment>, ApiError> {
        ApiClient::comments_page(self, restaurant_id, page, size).await
    }

    async fn comments_for_restaurant(&self, restaurant_id: u64) -> Result<Vec<Comment>, ApiError> {
        ApiClient::comments_for_restaurant(self, restaurant_id).await
    }

    async fn comment(&self, comment_id: u64) -> Result<Comment, ApiError> {
        ApiClient::comment(self, comment_id).await
    }

    async fn restaurant_photos(&self, restaurant_id: u64) -> Result<Vec<GalleryPhoto>, ApiError> {
        ApiClient::restaurant_photos(self, restaurant_id).await
    }

    async fn latest_photo(&self, restaurant_id: u64) -> Result<Option<String>, ApiError> {
        ApiClient::latest_photo(self, restaurant_id).await
    }

    async fn create_comment(
        &self,
        token: &str,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        ApiClient::create_comment(self, token, request).await
    }

    async fn create_comment_with_photos(
        &self,
        token: &str,
        request: &CommentRequest,
        photos: &[PhotoUpload],
    ) -> Result<MultipartCommentResponse, ApiError> {
        ApiClient::create_comment_with_photos(self, token, request, photos).await
    }

    async fn update_comment(
        &self,
        token: &str,
        comment_id: u64,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        ApiClient::update_comment(self, token, comment_id, request).await
    }

    async fn delete_comment(&self, token: &str, comment_id: u64) -> Result<(), ApiError> {
        ApiClient::delete_comment(self, token, comment_id).await
    }

    async fn upload_comment_photos(
        &self,
        token: &str,
        comment_id: u64,
        photos: &[PhotoUpload],
    ) -> Result<FileUploadResponse, ApiError> {
        ApiClient::upload_comment_photos(self, token, comment_id, photos).await
    }

    async fn can_comment(
        &self,
        token: &str,
        restaurant_id: u64,
    ) -> Result<CommentEligibility, ApiError> {
        ApiClient::can_comment(self, token, restaurant_id).await
    }

    async fn report_comment(
        &self,
        token: &str,
        report: &ReportCommentRequest,
    ) -> Result<(), ApiError> {
        ApiClient::report_comment(self, token, report).await
    }
}
