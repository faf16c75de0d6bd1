//! # Search Command
//!
//! ```bash
//! ramendir search ichiran --page 2
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::commands::CommandContext;
use crate::commands::ranking::print_row;
use crate::error::ValidationError;
use crate::errors::report;
use crate::exit_codes::*;
use crate::query::{NameSearch, to_api_page, to_ui_page};

#[derive(Debug)]
pub struct SearchArgs {
    pub term: String,
    pub page: u32,
}

pub async fn execute(args: SearchArgs) -> Result<i32> {
    let Some(page) = to_api_page(args.page) else {
        return Ok(report(&ValidationError::PageOutOfRange.into()));
    };
    let ctx = CommandContext::open()?;
    let mut search = NameSearch::new();

    let outcome = match search.submit(&ctx.api, &args.term).await {
        Ok(_) if page > 0 => search.go_to_page(&ctx.api, page).await,
        other => other,
    };
    if let Err(e) = outcome {
        return Ok(report(&e));
    }

    let Some(results) = search.results() else {
        println!("{}", "Enter a name to search for.".dimmed());
        return Ok(EXIT_SUCCESS);
    };
    if results.content.is_empty() {
        println!("No restaurants named like '{}'.", search.term());
        return Ok(EXIT_SUCCESS);
    }
    let offset = u64::from(results.page_number) * u64::from(results.page_size);
    for (i, restaurant) in results.content.iter().enumerate() {
        print_row(offset + i as u64 + 1, restaurant);
    }
    println!();
    println!(
        "{}",
        format!(
            "Page {} of {} ({} matches)",
            to_ui_page(search.page()),
            results.total_pages.max(1),
            results.total_elements
        )
        .dimmed()
    );
    Ok(EXIT_SUCCESS)
}
