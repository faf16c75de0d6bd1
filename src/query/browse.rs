//! Front page, top list and restaurant detail reads.

use log::warn;

use crate::api::{RamenApi, Restaurant, RestaurantCard, RestaurantSummary};
use crate::error::Result;

pub const DEFAULT_TOP_LIMIT: u32 = 10;

pub async fn frontpage<A: RamenApi + ?Sized>(api: &A) -> Result<Vec<RestaurantCard>> {
    Ok(api.frontpage_cards().await?)
}

pub async fn top_restaurants<A: RamenApi + ?Sized>(
    api: &A,
    limit: u32,
) -> Result<Vec<RestaurantSummary>> {
    Ok(api.top_restaurants(limit).await?)
}

/// Restaurant detail; a 404 surfaces as `RamenError::NotFound`.
pub async fn restaurant<A: RamenApi + ?Sized>(api: &A, id: u64) -> Result<Restaurant> {
    Ok(api.restaurant(id).await?)
}

/// Thumbnail for a restaurant card. Missing photos and failures both yield `None`.
pub async fn thumbnail<A: RamenApi + ?Sized>(api: &A, restaurant_id: u64) -> Option<String> {
    match api.latest_photo(restaurant_id).await {
        Ok(url) => url,
        Err(e) => {
            warn!("no thumbnail for restaurant {}: {}", restaurant_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::fake::FakeApi;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_missing_restaurant_is_not_found() {
        let api = FakeApi::new();
        api.push(
            "restaurant",
            Err(ApiError::NotFound {
                message: "Restaurant not found".into(),
            }),
        );
        assert!(restaurant(&api, 404).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_thumbnail_swallows_errors() {
        let api = FakeApi::new();
        api.push("latest_photo", Ok(json!("/uploads/1.jpg")))
            .push("latest_photo", Ok(Value::Null))
            .push(
                "latest_photo",
                Err(ApiError::Network {
                    message: "timeout".into(),
                }),
            );
        assert_eq!(thumbnail(&api, 1).await.as_deref(), Some("/uploads/1.jpg"));
        assert_eq!(thumbnail(&api, 1).await, None);
        assert_eq!(thumbnail(&api, 1).await, None);
    }

    #[tokio::test]
    async fn test_top_list() {
        let api = FakeApi::new();
        api.on("top_restaurants", json!([{ "id": 3, "name": "Tsuta", "score": 4.8 }]));
        let top = top_restaurants(&api, DEFAULT_TOP_LIMIT).await.unwrap();
        assert_eq!(top[0].name, "Tsuta");
        assert_eq!(api.last_call("top_restaurants").as_deref(), Some("top_restaurants 10"));
    }
}
