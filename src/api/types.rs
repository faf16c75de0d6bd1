//! # Wire Types
//!
//! Request and response bodies exchanged with the ramen directory API.
//! Field names follow the server's camelCase JSON.

use serde::{Deserialize, Serialize};

// =============================================================================
// Reference Data
// =============================================================================

/// Ramen genre as the server names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Tonkotsu,
    Shoyu,
    Miso,
    Shio,
    Tsukemen,
    Jiro,
    Tantanmen,
    Mazesoba,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Tonkotsu,
        Genre::Shoyu,
        Genre::Miso,
        Genre::Shio,
        Genre::Tsukemen,
        Genre::Jiro,
        Genre::Tantanmen,
        Genre::Mazesoba,
        Genre::Other,
    ];

    /// Query-parameter spelling (`TONKOTSU`, `SHOYU`, ...).
    pub fn as_param(&self) -> &'static str {
        match self {
            Genre::Tonkotsu => "TONKOTSU",
            Genre::Shoyu => "SHOYU",
            Genre::Miso => "MISO",
            Genre::Shio => "SHIO",
            Genre::Tsukemen => "TSUKEMEN",
            Genre::Jiro => "JIRO",
            Genre::Tantanmen => "TANTANMEN",
            Genre::Mazesoba => "MAZESOBA",
            Genre::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_param().eq_ignore_ascii_case(value.trim()))
    }
}

/// Soup base as the server names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoupBase {
    Pork,
    Chicken,
    Fish,
    Vegetable,
    Beef,
    Other,
}

impl SoupBase {
    pub const ALL: [SoupBase; 6] = [
        SoupBase::Pork,
        SoupBase::Chicken,
        SoupBase::Fish,
        SoupBase::Vegetable,
        SoupBase::Beef,
        SoupBase::Other,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            SoupBase::Pork => "PORK",
            SoupBase::Chicken => "CHICKEN",
            SoupBase::Fish => "FISH",
            SoupBase::Vegetable => "VEGETABLE",
            SoupBase::Beef => "BEEF",
            SoupBase::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_param().eq_ignore_ascii_case(value.trim()))
    }
}

/// Genre entry with its display label (`GET /restaurants/genres`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreLabel {
    pub name: String,
    #[serde(default)]
    pub chinese_label: Option<String>,
}

/// Soup bases arrive either as bare enum names or as labelled objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoupBaseEntry {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    Labeled {
        name: String,
        #[serde(default)]
        chinese_label: Option<String>,
    },
}

impl SoupBaseEntry {
    pub fn name(&self) -> &str {
        match self {
            SoupBaseEntry::Plain(name) => name,
            SoupBaseEntry::Labeled { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefecture {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u64,
    pub prefecture_id: u64,
    pub name: String,
    #[serde(default)]
    pub name_in_english: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub full_name_in_english: Option<String>,
}

// =============================================================================
// Restaurants
// =============================================================================

/// Front-page card (`GET /restaurants/frontpage-cards`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCard {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub prefecture_name: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One row of a ranking or search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub prefecture_name: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreLabel>,
    #[serde(default)]
    pub soup_bases: Vec<SoupBaseEntry>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMethod {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub area: Option<Area>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub full_address_in_english: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Full restaurant record (`GET /restaurants/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub genres: Vec<GenreLabel>,
    #[serde(default)]
    pub soup_bases: Vec<SoupBaseEntry>,
    #[serde(default)]
    pub reservation_system: Option<bool>,
    #[serde(default)]
    pub queue_method: Option<QueueMethod>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub menu_content: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub rest_day: Option<String>,
    #[serde(default)]
    pub opening_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Server-computed slice of a larger collection. `page_number` is 0-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last: bool,
}

impl<T> PageResponse<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            page_number: 0,
            page_size: 0,
            total_elements: 0,
            total_pages: 0,
            last: true,
        }
    }
}

/// Ranking results: a page when `paginated=true`, a bare list otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankingResults {
    Page(PageResponse<RestaurantSummary>),
    List(Vec<RestaurantSummary>),
}

impl RankingResults {
    pub fn items(&self) -> &[RestaurantSummary] {
        match self {
            RankingResults::Page(page) => &page.content,
            RankingResults::List(list) => list,
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self {
            RankingResults::Page(page) => page.total_pages,
            RankingResults::List(_) => 1,
        }
    }

    pub fn total_elements(&self) -> u64 {
        match self {
            RankingResults::Page(page) => page.total_elements,
            RankingResults::List(list) => list.len() as u64,
        }
    }
}

// =============================================================================
// Users & Auth
// =============================================================================

/// Identity of the signed-in user (`GET /users/me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub recaptcha_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub recaptcha_response: String,
}

impl From<&RegistrationRequest> for LoginRequest {
    fn from(r: &RegistrationRequest) -> Self {
        Self {
            username: r.username.clone(),
            password: r.password.clone(),
            recaptcha_response: r.recaptcha_response.clone(),
        }
    }
}

// =============================================================================
// Comments & Photos
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub restaurant_id: u64,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub food_comment: Option<String>,
    #[serde(default)]
    pub environment_comment: Option<String>,
    #[serde(default)]
    pub visiting_comment: Option<String>,
    #[serde(default)]
    pub food_score: Option<u8>,
    #[serde(default)]
    pub environment_score: Option<u8>,
    #[serde(default)]
    pub visiting_score: Option<u8>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Body of `POST /comments` and `PUT /comments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub restaurant_id: u64,
    pub food_comment: String,
    pub environment_comment: String,
    pub visiting_comment: String,
    pub food_score: u8,
    pub environment_score: u8,
    pub visiting_score: u8,
    pub overall_score: f64,
}

/// Response of `POST /comments-multipart`; 206 carries `photoErrors`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipartCommentResponse {
    pub comment: Comment,
    #[serde(default)]
    pub photo_errors: std::collections::BTreeMap<String, String>,
}

/// Response of `POST /photos/comment/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    #[serde(default)]
    pub uploaded_photos: Vec<String>,
    #[serde(default)]
    pub errors: Option<std::collections::BTreeMap<String, String>>,
}

impl FileUploadResponse {
    /// Per-file failures reported by the server, if any.
    pub fn failures(&self) -> Option<&std::collections::BTreeMap<String, String>> {
        self.errors.as_ref().filter(|e| !e.is_empty())
    }
}

/// One photo of the restaurant gallery (`GET /comments/restaurant/{id}/photos`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub url: String,
    #[serde(alias = "commentUsername")]
    pub username: String,
}

/// Binary photo ready to be sent in a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Rate-limit answer of `GET /comments/can-comment/{restaurantId}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEligibility {
    pub can_comment: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hours_remaining: Option<i64>,
    #[serde(default)]
    pub minutes_remaining: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCommentRequest {
    pub comment_id: u64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_param_and_parse() {
        assert_eq!(Genre::Tonkotsu.as_param(), "TONKOTSU");
        assert_eq!(Genre::parse("tsukemen"), Some(Genre::Tsukemen));
        assert_eq!(Genre::parse("udon"), None);
        let json = serde_json::to_string(&Genre::Tantanmen).unwrap();
        assert_eq!(json, "\"TANTANMEN\"");
    }

    #[test]
    fn test_soup_base_entries_accept_both_shapes() {
        let json = r#"["PORK", {"name":"CHICKEN","chineseLabel":"雞白湯"}]"#;
        let entries: Vec<SoupBaseEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].name(), "PORK");
        assert_eq!(entries[1].name(), "CHICKEN");
    }

    #[test]
    fn test_ranking_results_page_or_list() {
        let page = r#"{"content":[{"id":1,"name":"Ichiran"}],"pageNumber":0,"pageSize":10,"totalElements":1,"totalPages":1,"last":true}"#;
        let parsed: RankingResults = serde_json::from_str(page).unwrap();
        assert!(matches!(parsed, RankingResults::Page(_)));
        assert_eq!(parsed.items()[0].name, "Ichiran");

        let list = r#"[{"id":2,"name":"Fuunji","score":4.6}]"#;
        let parsed: RankingResults = serde_json::from_str(list).unwrap();
        assert!(matches!(parsed, RankingResults::List(_)));
        assert_eq!(parsed.total_elements(), 1);
    }

    #[test]
    fn test_comment_request_serializes_camel_case() {
        let request = CommentRequest {
            restaurant_id: 7,
            food_comment: "rich".into(),
            environment_comment: "tight counter".into(),
            visiting_comment: "long queue".into(),
            food_score: 4,
            environment_score: 5,
            visiting_score: 3,
            overall_score: 4.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["restaurantId"], 7);
        assert_eq!(json["overallScore"], 4.0);
        assert_eq!(json["visitingComment"], "long queue");
    }

    #[test]
    fn test_upload_response_failures() {
        let ok: FileUploadResponse =
            serde_json::from_str(r#"{"uploadedPhotos":["a.jpg"]}"#).unwrap();
        assert!(ok.failures().is_none());

        let partial: FileUploadResponse = serde_json::from_str(
            r#"{"uploadedPhotos":[],"errors":{"file_0":"too large"}}"#,
        )
        .unwrap();
        assert_eq!(partial.failures().unwrap()["file_0"], "too large");
    }
}
