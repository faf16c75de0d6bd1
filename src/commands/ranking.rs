//! # Ranking Command
//!
//! Builds a ranking query from flags and prints one page of ranked rows.
//!
//! ## Usage
//!
//! ```bash
//! ramendir ranking --prefecture 13 --area 5 --genre tonkotsu --genre shoyu \
//!     --min-score 3.5 --sort score --direction desc --page 2
//! ```
//!
//! `--page` counts from 1, as shown in the output.

use anyhow::Result;
use colored::Colorize;

use crate::api::{Genre, RestaurantSummary, SoupBase};
use crate::commands::CommandContext;
use crate::error::ValidationError;
use crate::errors::{display_validation_error, report};
use crate::exit_codes::*;
use crate::query::filters::DEFAULT_PAGE_SIZE;
use crate::query::{
    FilterState, OptionsCatalog, RankingEngine, SortBy, SortDirection, to_api_page, to_ui_page,
};

#[derive(Debug)]
pub struct RankingArgs {
    pub prefecture: Option<u64>,
    pub area: Option<u64>,
    pub genres: Vec<String>,
    pub soup_bases: Vec<String>,
    pub min_score: f64,
    pub sort: String,
    pub direction: String,
    pub page: u32,
    pub size: Option<u32>,
}

/// Translate the flags into a filter state. Unknown names are errors
/// rather than silently ignored filters.
fn filter_from_args(args: &RankingArgs) -> std::result::Result<FilterState, String> {
    let mut filter = FilterState {
        prefecture_id: args.prefecture,
        area_id: args.area,
        ..FilterState::default()
    };

    let genres = args
        .genres
        .iter()
        .map(|g| Genre::parse(g).ok_or_else(|| format!("unknown genre '{}'", g)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    filter.set_genres(genres);

    let soup_bases = args
        .soup_bases
        .iter()
        .map(|s| SoupBase::parse(s).ok_or_else(|| format!("unknown soup base '{}'", s)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    filter.set_soup_bases(soup_bases);

    filter.set_min_score(args.min_score);
    filter.sort_by =
        SortBy::parse(&args.sort).ok_or_else(|| format!("unknown sort key '{}'", args.sort))?;
    filter.sort_direction = SortDirection::parse(&args.direction)
        .ok_or_else(|| format!("unknown sort direction '{}'", args.direction))?;
    filter.page =
        to_api_page(args.page).ok_or_else(|| ValidationError::PageOutOfRange.to_string())?;
    filter.page_size = args.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    Ok(filter)
}

pub(crate) fn print_row(rank: u64, restaurant: &RestaurantSummary) {
    let score = restaurant
        .score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string());
    let place = match (&restaurant.prefecture_name, &restaurant.area_name) {
        (Some(p), Some(a)) => format!("{} / {}", p, a),
        (Some(p), None) => p.clone(),
        (None, Some(a)) => a.clone(),
        (None, None) => String::new(),
    };
    println!(
        "{:>4}. {:<32} {:>4}  {}  {}",
        rank,
        restaurant.name.bold(),
        score.yellow(),
        place.dimmed(),
        format!("#{}", restaurant.id).dimmed()
    );
}

/// Execute the ranking command
pub async fn execute(args: RankingArgs) -> Result<i32> {
    let filter = match filter_from_args(&args) {
        Ok(filter) => filter,
        Err(message) => {
            display_validation_error(&message);
            return Ok(EXIT_INVALID_INPUT);
        }
    };

    let ctx = CommandContext::open()?;
    let catalog = match OptionsCatalog::load(&ctx.api).await {
        Ok(catalog) => catalog,
        Err(e) => return Ok(report(&e)),
    };
    let mut engine = RankingEngine::new(catalog);
    if let Err(e) = engine.apply(&ctx.api, filter).await {
        return Ok(report(&e));
    }

    let Some(results) = engine.results() else {
        return Ok(EXIT_SUCCESS);
    };
    let rows = engine.ranked_rows();
    if rows.is_empty() {
        println!("{}", "No restaurants match these filters.".dimmed());
    }
    for row in rows {
        print_row(row.rank, row.restaurant);
    }
    println!();
    println!(
        "{}",
        format!(
            "Page {} of {} ({} restaurants)  ?{}",
            to_ui_page(engine.filter().page),
            results.total_pages().max(1),
            results.total_elements(),
            engine.filter().query_string()
        )
        .dimmed()
    );
    Ok(EXIT_SUCCESS)
}
