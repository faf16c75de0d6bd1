//! Filter-driven ranking queries, name search and catalog reads.
//!
//! Pages are 0-indexed everywhere inside the crate. The two functions below
//! are the only place the 1-indexed numbering shown to users appears.

pub mod browse;
pub mod catalog;
pub mod engine;
pub mod filters;
pub mod search;

pub use catalog::OptionsCatalog;
pub use engine::{FetchTicket, RankedRow, RankingEngine};
pub use filters::{FilterState, SortBy, SortDirection};
pub use search::NameSearch;

/// 0-indexed server page to the page number shown to users.
pub fn to_ui_page(api_page: u32) -> u32 {
    api_page.saturating_add(1)
}

/// Page number shown to users back to the server's 0-indexed page.
/// There is no page 0 on the user side.
pub fn to_api_page(ui_page: u32) -> Option<u32> {
    ui_page.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_page() {
        assert_eq!(to_ui_page(0), 1);
        assert_eq!(to_api_page(1), Some(0));
        assert_eq!(to_api_page(0), None);
    }

    proptest! {
        #[test]
        fn prop_page_translation_round_trips(api_page in 0u32..u32::MAX) {
            let ui_page = to_ui_page(api_page);
            prop_assert_eq!(ui_page, api_page + 1);
            prop_assert_eq!(to_api_page(ui_page), Some(api_page));
        }
    }
}
