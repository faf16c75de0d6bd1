//! Ranking filter state and its mapping to `/ranking` query parameters.

use crate::api::{Area, Genre, SoupBase};
use crate::error::ValidationError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Score,
    Name,
}

impl SortBy {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Score => "score",
            SortBy::Name => "name",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "score" => Some(SortBy::Score),
            "name" => Some(SortBy::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Every dimension of the ranking query.
///
/// `page` is 0-indexed, as the server counts. `area_id` is only ever set to
/// an area of `prefecture_id`; the setters below keep that true.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub prefecture_id: Option<u64>,
    pub area_id: Option<u64>,
    pub genres: Vec<Genre>,
    pub soup_bases: Vec<SoupBase>,
    pub min_score: f64,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub page: u32,
    pub page_size: u32,
    pub paginated: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            prefecture_id: None,
            area_id: None,
            genres: Vec::new(),
            soup_bases: Vec::new(),
            min_score: 0.0,
            sort_by: SortBy::Score,
            sort_direction: SortDirection::Desc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            paginated: true,
        }
    }
}

impl FilterState {
    /// Select a prefecture, dropping an area that is not one of its areas.
    ///
    /// `areas` is the full area list; an area whose membership cannot be
    /// confirmed from it is dropped too.
    pub fn set_prefecture(&mut self, prefecture_id: Option<u64>, areas: &[Area]) {
        self.prefecture_id = prefecture_id;
        let keep = match (prefecture_id, self.area_id) {
            (Some(prefecture_id), Some(area_id)) => areas
                .iter()
                .any(|a| a.id == area_id && a.prefecture_id == prefecture_id),
            _ => false,
        };
        if !keep {
            self.area_id = None;
        }
    }

    /// Select an area of the current prefecture, or clear the selection.
    pub fn set_area(
        &mut self,
        area_id: Option<u64>,
        areas: &[Area],
    ) -> Result<(), ValidationError> {
        let Some(area_id) = area_id else {
            self.area_id = None;
            return Ok(());
        };
        let prefecture_id = self
            .prefecture_id
            .ok_or(ValidationError::NoPrefectureSelected)?;
        if !areas
            .iter()
            .any(|a| a.id == area_id && a.prefecture_id == prefecture_id)
        {
            return Err(ValidationError::AreaOutsidePrefecture {
                area_id,
                prefecture_id,
            });
        }
        self.area_id = Some(area_id);
        Ok(())
    }

    /// Add the genre if absent, remove it if present. Order of first selection is kept.
    pub fn toggle_genre(&mut self, genre: Genre) {
        match self.genres.iter().position(|g| *g == genre) {
            Some(i) => {
                self.genres.remove(i);
            }
            None => self.genres.push(genre),
        }
    }

    pub fn set_genres(&mut self, genres: impl IntoIterator<Item = Genre>) {
        self.genres.clear();
        for genre in genres {
            if !self.genres.contains(&genre) {
                self.genres.push(genre);
            }
        }
    }

    pub fn toggle_soup_base(&mut self, soup_base: SoupBase) {
        match self.soup_bases.iter().position(|s| *s == soup_base) {
            Some(i) => {
                self.soup_bases.remove(i);
            }
            None => self.soup_bases.push(soup_base),
        }
    }

    pub fn set_soup_bases(&mut self, soup_bases: impl IntoIterator<Item = SoupBase>) {
        self.soup_bases.clear();
        for soup_base in soup_bases {
            if !self.soup_bases.contains(&soup_base) {
                self.soup_bases.push(soup_base);
            }
        }
    }

    /// Minimum score, clamped to the 0..=5 scale. 0 means no minimum.
    pub fn set_min_score(&mut self, min_score: f64) {
        self.min_score = if min_score.is_finite() {
            min_score.clamp(0.0, 5.0)
        } else {
            0.0
        };
    }

    /// Query parameters in the order the server logs them:
    /// `prefectureId, areaId, genres*, soupBases*, minScore, sortBy,
    /// sortDirection, page, size, paginated`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(prefecture_id) = self.prefecture_id {
            params.push(("prefectureId", prefecture_id.to_string()));
        }
        if let Some(area_id) = self.area_id {
            params.push(("areaId", area_id.to_string()));
        }
        for genre in &self.genres {
            params.push(("genres", genre.as_param().to_string()));
        }
        for soup_base in &self.soup_bases {
            params.push(("soupBases", soup_base.as_param().to_string()));
        }
        if self.min_score > 0.0 {
            params.push(("minScore", self.min_score.to_string()));
        }
        params.push(("sortBy", self.sort_by.as_param().to_string()));
        params.push(("sortDirection", self.sort_direction.as_param().to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("size", self.page_size.to_string()));
        params.push(("paginated", self.paginated.to_string()));
        params
    }

    /// The encoded query string, as it appears after `/ranking?`.
    pub fn query_string(&self) -> String {
        encode_query(&self.to_params())
    }
}

/// Form-encode parameters, keeping repeated keys in order.
pub fn encode_query(params: &[(&'static str, String)]) -> String {
    reqwest::Url::parse_with_params("http://localhost/", params)
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn area(id: u64, prefecture_id: u64) -> Area {
        Area {
            id,
            prefecture_id,
            name: format!("area-{id}"),
            name_in_english: None,
            full_name: None,
            full_name_in_english: None,
        }
    }

    fn tokyo_and_osaka() -> Vec<Area> {
        vec![area(100, 13), area(101, 13), area(200, 27)]
    }

    #[test]
    fn test_default_query_string() {
        assert_eq!(
            FilterState::default().query_string(),
            "sortBy=score&sortDirection=DESC&page=0&size=10&paginated=true"
        );
    }

    #[test]
    fn test_tonkotsu_in_tokyo_query_string() {
        let mut filter = FilterState::default();
        filter.set_prefecture(Some(13), &tokyo_and_osaka());
        filter.toggle_genre(Genre::Tonkotsu);
        assert_eq!(
            filter.query_string(),
            "prefectureId=13&genres=TONKOTSU&sortBy=score&sortDirection=DESC&page=0&size=10&paginated=true"
        );
    }

    #[test]
    fn test_multi_select_is_repeated_and_ordered() {
        let mut filter = FilterState::default();
        filter.set_genres([Genre::Miso, Genre::Shoyu, Genre::Miso]);
        filter.toggle_soup_base(SoupBase::Fish);
        filter.toggle_soup_base(SoupBase::Pork);
        filter.set_min_score(3.5);
        filter.sort_by = SortBy::Name;
        filter.sort_direction = SortDirection::Asc;
        assert_eq!(
            filter.query_string(),
            "genres=MISO&genres=SHOYU&soupBases=FISH&soupBases=PORK&minScore=3.5&sortBy=name&sortDirection=ASC&page=0&size=10&paginated=true"
        );

        filter.toggle_genre(Genre::Miso);
        assert_eq!(filter.genres, vec![Genre::Shoyu]);
    }

    #[test]
    fn test_min_score_bounds() {
        let mut filter = FilterState::default();
        filter.set_min_score(9.0);
        assert_eq!(filter.min_score, 5.0);
        filter.set_min_score(f64::NAN);
        assert_eq!(filter.min_score, 0.0);
        assert!(!filter.query_string().contains("minScore"));
    }

    #[test]
    fn test_area_requires_matching_prefecture() {
        let areas = tokyo_and_osaka();
        let mut filter = FilterState::default();
        assert_eq!(
            filter.set_area(Some(100), &areas),
            Err(ValidationError::NoPrefectureSelected)
        );

        filter.set_prefecture(Some(13), &areas);
        assert_eq!(
            filter.set_area(Some(200), &areas),
            Err(ValidationError::AreaOutsidePrefecture {
                area_id: 200,
                prefecture_id: 13
            })
        );
        filter.set_area(Some(101), &areas).unwrap();
        assert_eq!(filter.area_id, Some(101));
        assert!(filter.query_string().starts_with("prefectureId=13&areaId=101&"));
    }

    #[test]
    fn test_changing_prefecture_clears_foreign_area() {
        let areas = tokyo_and_osaka();
        let mut filter = FilterState::default();
        filter.set_prefecture(Some(13), &areas);
        filter.set_area(Some(100), &areas).unwrap();

        filter.set_prefecture(Some(13), &areas);
        assert_eq!(filter.area_id, Some(100));

        filter.set_prefecture(Some(27), &areas);
        assert_eq!(filter.area_id, None);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortBy::parse("Name"), Some(SortBy::Name));
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortBy::parse("distance"), None);
    }

    proptest! {
        #[test]
        fn prop_area_always_belongs_to_prefecture(
            raw_areas in prop::collection::vec((0u64..20, 0u64..5), 0..20),
            steps in prop::collection::vec((any::<bool>(), 0u64..20, prop::option::of(0u64..5)), 1..30),
        ) {
            let areas: Vec<Area> = raw_areas
                .iter()
                .map(|(id, prefecture_id)| area(*id, *prefecture_id))
                .collect();
            let mut filter = FilterState::default();
            for (pick_area, area_id, prefecture_id) in steps {
                if pick_area {
                    let _ = filter.set_area(Some(area_id), &areas);
                } else {
                    filter.set_prefecture(prefecture_id, &areas);
                }
                if let Some(area_id) = filter.area_id {
                    let prefecture_id = filter.prefecture_id;
                    prop_assert!(prefecture_id.is_some());
                    prop_assert!(areas
                        .iter()
                        .any(|a| a.id == area_id && Some(a.prefecture_id) == prefecture_id));
                }
            }
        }
    }
}
