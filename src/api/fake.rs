//! Scripted in-memory [`RamenApi`] for unit tests.
//!
//! Each operation records a call line (`"<op> <detail>"`) and answers from
//! a one-shot queue first, then from a sticky default. Operations without
//! a script fail with `NotFound`, except the unit-returning mutations which
//! succeed.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::auth::LoginResponse;
use crate::api::backend::RamenApi;
use crate::api::client::ApiError;
use crate::api::restaurants::QueryParams;
use crate::api::types::*;

#[derive(Default)]
pub(crate) struct FakeApi {
    calls: Mutex<Vec<String>>,
    queued: Mutex<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    defaults: Mutex<HashMap<&'static str, Value>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `op` with `value` unless something is queued.
    pub(crate) fn on(&self, op: &'static str, value: Value) -> &Self {
        self.defaults.lock().unwrap().insert(op, value);
        self
    }

    /// Answer the next call to `op` with `result`.
    pub(crate) fn push(&self, op: &'static str, result: Result<Value, ApiError>) -> &Self {
        self.queued
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(op))
            .count()
    }

    pub(crate) fn last_call(&self, op: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.split(' ').next() == Some(op))
            .cloned()
    }

    fn next(&self, op: &'static str, detail: String) -> Option<Result<Value, ApiError>> {
        self.calls.lock().unwrap().push(format!("{op} {detail}"));
        if let Some(result) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(op)
            .and_then(|q| q.pop_front())
        {
            return Some(result);
        }
        self.defaults.lock().unwrap().get(op).cloned().map(Ok)
    }

    fn respond<T: DeserializeOwned>(
        &self,
        op: &'static str,
        detail: String,
    ) -> Result<T, ApiError> {
        match self.next(op, detail) {
            Some(Ok(value)) => Ok(serde_json::from_value(value).unwrap()),
            Some(Err(e)) => Err(e),
            None => Err(ApiError::NotFound {
                message: format!("no scripted response for {op}"),
            }),
        }
    }

    fn respond_unit(&self, op: &'static str, detail: String) -> Result<(), ApiError> {
        match self.next(op, detail) {
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        }
    }
}

fn encode(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn names(photos: &[PhotoUpload]) -> String {
    photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl RamenApi for FakeApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.respond("login", credentials.username.clone())
    }

    async fn register(&self, data: &RegistrationRequest) -> Result<UserIdentity, ApiError> {
        self.respond("register", data.username.clone())
    }

    async fn current_user(&self, token: &str) -> Result<UserIdentity, ApiError> {
        self.respond("current_user", token.to_string())
    }

    async fn recaptcha_site_key(&self) -> Result<String, ApiError> {
        self.respond("recaptcha_site_key", String::new())
    }

    async fn frontpage_cards(&self) -> Result<Vec<RestaurantCard>, ApiError> {
        self.respond("frontpage_cards", String::new())
    }

    async fn restaurant(&self, id: u64) -> Result<Restaurant, ApiError> {
        self.respond("restaurant", id.to_string())
    }

    async fn top_restaurants(&self, limit: u32) -> Result<Vec<RestaurantSummary>, ApiError> {
        self.respond("top_restaurants", limit.to_string())
    }

    async fn ranking(&self, params: &QueryParams) -> Result<RankingResults, ApiError> {
        self.respond("ranking", encode(params))
    }

    async fn search_restaurants(
        &self,
        params: &QueryParams,
    ) -> Result<PageResponse<RestaurantSummary>, ApiError> {
        self.respond("search_restaurants", encode(params))
    }

    async fn genres(&self) -> Result<Vec<GenreLabel>, ApiError> {
        self.respond("genres", String::new())
    }

    async fn soup_bases(&self) -> Result<Vec<SoupBaseEntry>, ApiError> {
        self.respond("soup_bases", String::new())
    }

    async fn prefectures(&self) -> Result<Vec<Prefecture>, ApiError> {
        self.respond("prefectures", String::new())
    }

    async fn areas(&self) -> Result<Vec<Area>, ApiError> {
        self.respond("areas", String::new())
    }

    async fn comments_page(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<Comment>, ApiError> {
        self.respond(
            "comments_page",
            format!("{restaurant_id} page={page} size={size}"),
        )
    }

    async fn comments_for_restaurant(&self, restaurant_id: u64) -> Result<Vec<Comment>, ApiError> {
        self.respond("comments_for_restaurant", restaurant_id.to_string())
    }

    async fn comment(&self, comment_id: u64) -> Result<Comment, ApiError> {
        self.respond("comment", comment_id.to_string())
    }

    async fn restaurant_photos(&self, restaurant_id: u64) -> Result<Vec<GalleryPhoto>, ApiError> {
        self.respond("restaurant_photos", restaurant_id.to_string())
    }

    async fn latest_photo(&self, restaurant_id: u64) -> Result<Option<String>, ApiError> {
        self.respond("latest_photo", restaurant_id.to_string())
    }

    async fn create_comment(
        &self,
        token: &str,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        self.respond(
            "create_comment",
            format!("{token} overall={}", request.overall_score),
        )
    }

    async fn create_comment_with_photos(
        &self,
        token: &str,
        request: &CommentRequest,
        photos: &[PhotoUpload],
    ) -> Result<MultipartCommentResponse, ApiError> {
        self.respond(
            "create_comment_with_photos",
            format!(
                "{token} overall={} photos={}",
                request.overall_score,
                names(photos)
            ),
        )
    }

    async fn update_comment(
        &self,
        token: &str,
        comment_id: u64,
        request: &CommentRequest,
    ) -> Result<Comment, ApiError> {
        self.respond(
            "update_comment",
            format!("{token} {comment_id} food={}", request.food_comment),
        )
    }

    async fn delete_comment(&self, token: &str, comment_id: u64) -> Result<(), ApiError> {
        self.respond_unit("delete_comment", format!("{token} {comment_id}"))
    }

    async fn upload_comment_photos(
        &self,
        token: &str,
        comment_id: u64,
        photos: &[PhotoUpload],
    ) -> Result<FileUploadResponse, ApiError> {
        self.respond(
            "upload_comment_photos",
            format!("{token} {comment_id} photos={}", names(photos)),
        )
    }

    async fn can_comment(
        &self,
        token: &str,
        restaurant_id: u64,
    ) -> Result<CommentEligibility, ApiError> {
        self.respond("can_comment", format!("{token} {restaurant_id}"))
    }

    async fn report_comment(
        &self,
        token: &str,
        report: &ReportCommentRequest,
    ) -> Result<(), ApiError> {
        self.respond_unit(
            "report_comment",
            format!("{token} {} {}", report.comment_id, report.reason),
        )
    }
}

// Fixture builders shared by the component tests.

pub(crate) fn user_json(id: u64, username: &str) -> Value {
    json!({ "id": id, "username": username, "role": "USER", "createdAt": "2024-05-01T10:00:00" })
}

pub(crate) fn comment_json(id: u64, user_id: u64, restaurant_id: u64) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "username": "alice",
        "restaurantId": restaurant_id,
        "foodComment": "rich broth",
        "environmentComment": "small counter",
        "visitingComment": "twenty minute queue",
        "foodScore": 4,
        "environmentScore": 5,
        "visitingScore": 3,
        "overallScore": 4.0,
        "createdAt": "2024-05-01T10:00:00",
        "photos": []
    })
}

pub(crate) fn comment_page_json(comments: Vec<Value>, total: u64) -> Value {
    let size = 5;
    json!({
        "content": comments,
        "pageNumber": 0,
        "pageSize": size,
        "totalElements": total,
        "totalPages": total.div_ceil(size),
        "last": total <= size
    })
}

pub(crate) fn ranking_page_json(names: &[&str], page: u32, total_pages: u32) -> Value {
    let content: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i as u64 + 1, "name": name, "score": 4.5 }))
        .collect();
    json!({
        "content": content,
        "pageNumber": page,
        "pageSize": 10,
        "totalElements": names.len(),
        "totalPages": total_pages,
        "last": page + 1 >= total_pages
    })
}

pub(crate) fn photos_json(urls: &[&str]) -> Value {
    Value::Array(
        urls.iter()
            .map(|u| json!({ "url": u, "username": "alice" }))
            .collect(),
    )
}
