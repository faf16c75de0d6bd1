//! Filter options: genres, soup bases, prefectures and areas.

use log::debug;

use crate::api::{Area, GenreLabel, Prefecture, RamenApi, SoupBaseEntry};
use crate::error::Result;

/// Reference data behind the filter controls, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsCatalog {
    pub genres: Vec<GenreLabel>,
    pub soup_bases: Vec<SoupBaseEntry>,
    pub prefectures: Vec<Prefecture>,
    pub areas: Vec<Area>,
}

impl OptionsCatalog {
    /// Fetch all four lists concurrently.
    pub async fn load<A: RamenApi + ?Sized>(api: &A) -> Result<Self> {
        let (genres, soup_bases, prefectures, areas) = tokio::try_join!(
            api.genres(),
            api.soup_bases(),
            api.prefectures(),
            api.areas()
        )?;
        debug!(
            "loaded options: {} genres, {} soup bases, {} prefectures, {} areas",
            genres.len(),
            soup_bases.len(),
            prefectures.len(),
            areas.len()
        );
        Ok(Self {
            genres,
            soup_bases,
            prefectures,
            areas,
        })
    }

    /// Areas selectable under `prefecture_id`; none when no prefecture is chosen.
    pub fn areas_for(&self, prefecture_id: Option<u64>) -> Vec<&Area> {
        match prefecture_id {
            Some(id) => self.areas.iter().filter(|a| a.prefecture_id == id).collect(),
            None => Vec::new(),
        }
    }

    pub fn prefecture(&self, id: u64) -> Option<&Prefecture> {
        self.prefectures.iter().find(|p| p.id == id)
    }

    /// Display label of a genre, falling back to its name.
    pub fn genre_label<'a>(&'a self, name: &'a str) -> &'a str {
        self.genres
            .iter()
            .find(|g| g.name == name)
            .and_then(|g| g.chinese_label.as_deref())
            .unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use serde_json::json;

    fn scripted() -> FakeApi {
        let api = FakeApi::new();
        api.on(
            "genres",
            json!([{ "name": "TONKOTSU", "chineseLabel": "豚骨" }, { "name": "MISO" }]),
        )
        .on("soup_bases", json!(["PORK", "CHICKEN"]))
        .on(
            "prefectures",
            json!([{ "id": 13, "name": "Tokyo" }, { "id": 27, "name": "Osaka" }]),
        )
        .on(
            "areas",
            json!([
                { "id": 100, "prefectureId": 13, "name": "Shinjuku" },
                { "id": 101, "prefectureId": 13, "name": "Shibuya" },
                { "id": 200, "prefectureId": 27, "name": "Namba" }
            ]),
        );
        api
    }

    #[tokio::test]
    async fn test_load_and_cascade() {
        let api = scripted();
        let catalog = OptionsCatalog::load(&api).await.unwrap();

        let tokyo: Vec<u64> = catalog.areas_for(Some(13)).iter().map(|a| a.id).collect();
        assert_eq!(tokyo, vec![100, 101]);
        assert!(catalog.areas_for(None).is_empty());
        assert_eq!(catalog.prefecture(27).map(|p| p.name.as_str()), Some("Osaka"));
        assert_eq!(catalog.genre_label("TONKOTSU"), "豚骨");
        assert_eq!(catalog.genre_label("MISO"), "MISO");
        assert_eq!(catalog.soup_bases[1].name(), "CHICKEN");
    }

    #[tokio::test]
    async fn test_any_failed_list_fails_the_load() {
        let api = scripted();
        api.push(
            "areas",
            Err(crate::api::ApiError::Network {
                message: "connection refused".into(),
            }),
        );
        assert!(OptionsCatalog::load(&api).await.unwrap_err().is_network());
    }
}
