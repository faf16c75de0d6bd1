//! # Comment & Photo API
//!
//! Reads of a restaurant's comments and gallery, and the authenticated
//! mutations: create (plain or multipart), update, delete, photo upload,
//! rate-limit check and reporting.

use crate::api::client::{ApiClient, ApiError, to_network_error};
use crate::api::types::{
    Comment, CommentEligibility, CommentRequest, FileUploadResponse, GalleryPhoto,
    MultipartCommentResponse, PageResponse, PhotoUpload, ReportCommentRequest,
};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestPhotoResponse {
    #[serde(default)]
    photo_url: Option<String>,
}

/// Build a file part for a staged photo.
fn photo_part(photo: &PhotoUpload) -> Result<Part, ApiError> {
    Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(&photo.mime)
        .map_err(to_network_error)
}

impl ApiClient {
    /// `GET /comments/restaurant/{id}/paginated?page=&size=&sort=createdAt,desc`
    pub async fn comments_page(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Comment>, ApiError> {
        let url = self.api_url(&format!("/comments/restaurant/{}/paginated", restaurant_id));
        let request = self.client.get(&url).query(&[
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("sort", "createdAt,desc".to_string()),
        ]);
        self.send_json(request, None, "comment page").await
    }

    /// `GET /comments/restaurant/{id}`: every comment, unpaginated.
    pub async fn comments_for_restaurant(
        &self,
        restaurant_id: u64,
    ) -> Result<Vec<Comment>, ApiError> {
        let url = self.api_url(&format!("/comments/restaurant/{}", restaurant_id));
        self.send_json(self.client.get(&url), None, "comments").await
    }

    /// `GET /comments/{id}`
    pub async fn comment(&self, comment_id: u64) -> Result<Comment, ApiError> {
        let url = self.api_url(&format!("/comments/{}", comment_id));
        self.send_json(self.client.get(&url), None, "comment").await
    }

    /// `GET /comments/restaurant/{id}/photos`
    pub async fn restaurant_photos(
        &self,
        restaurant_id: u64,
    ) -> Result<Vec<GalleryPhoto>, ApiError> {
        let url = self.api_url(&format!("/comments/restaurant/{}/photos", restaurant_id));
        self.send_json(self.client.get(&url), None, "gallery").await
    }

    /// `GET /comments/restaurant/{id}/latest-photo`
    ///
    /// 204 means the restaurant has no photo yet.
    pub async fn latest_photo(&self, restaurant_id: u64) -> Result<Option<String>, ApiError> {
        let url = self.api_url(&format!("/comments/restaurant/{}/latest-photo", restaurant_id));
        let response = self.send(self.client.get(&url), None).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await.map_err(to_network_error)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let parsed: LatestPhotoResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::ParseError {
                message: format!("Failed to parse latest photo response: {}", e),
            })?;
        Ok(parsed.photo_url.filter(|u| !u.is_empty()))
    }

    /// `POST /comments`
    pub async fn create_comment(
        &self,
        token: &str,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        let url = self.api_url("/comments");
        self.send_json(self.client.post(&url).json(request), Some(token), "comment")
            .await
    }

    /// `POST /comments-multipart`: comment payload and photo binaries in one request.
    ///
    /// The payload travels as a JSON string in the `commentData` part and
    /// each photo as a `photos` part.
    pub async fn create_comment_with_photos(
        &self,
        token: &str,
        request: &CommentRequest,
        photos: &[PhotoUpload],
    ) -> Result<MultipartCommentResponse, ApiError> {
        let url = self.api_url("/comments-multipart");
        let comment_data = serde_json::to_string(request).map_err(|e| ApiError::ParseError {
            message: format!("Failed to encode comment: {}", e),
        })?;

        let mut form = Form::new().part(
            "commentData",
            Part::text(comment_data)
                .mime_str("application/json")
                .map_err(to_network_error)?,
        );
        for photo in photos {
            form = form.part("photos", photo_part(photo)?);
        }

        self.send_json(
            self.client.post(&url).multipart(form),
            Some(token),
            "multipart comment",
        )
        .await
    }

    /// `PUT /comments/{id}`
    pub async fn update_comment(
        &self,
        token: &str,
        comment_id: u64,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        let url = self.api_url(&format!("/comments/{}", comment_id));
        self.send_json(self.client.put(&url).json(request), Some(token), "comment")
            .await
    }

    /// `DELETE /comments/{id}`
    pub async fn delete_comment(&self, token: &str, comment_id: u64) -> Result<(), ApiError> {
        let url = self.api_url(&format!("/comments/{}", comment_id));
        self.send(self.client.delete(&url), Some(token)).await?;
        Ok(())
    }

    /// `POST /photos/comment/{id}` with one `files` part per photo.
    pub async fn upload_comment_photos(
        &self,
        token: &str,
        comment_id: u64,
        photos: &[PhotoUpload],
    ) -> Result<FileUploadResponse, ApiError> {
        let url = self.api_url(&format!("/photos/comment/{}", comment_id));
        let mut form = Form::new();
        for photo in photos {
            form = form.part("files", photo_part(photo)?);
        }
        self.send_json(
            self.client.post(&url).multipart(form),
            Some(token),
            "photo upload",
        )
        .await
    }

    /// `GET /comments/can-comment/{restaurantId}`
    pub async fn can_comment(
        &self,
        token: &str,
        restaurant_id: u64,
    ) -> Result<CommentEligibility, ApiError> {
        let url = self.api_url(&format!("/comments/can-comment/{}", restaurant_id));
        self.send_json(self.client.get(&url), Some(token), "eligibility")
            .await
    }

    /// `POST /comments/report`
    pub async fn report_comment(
        &self,
        token: &str,
        report: &ReportCommentRequest,
    ) -> Result<(), ApiError> {
        let url = self.api_url("/comments/report");
        self.send(self.client.post(&url).json(report), Some(token))
            .await?;
        Ok(())
    }
}
