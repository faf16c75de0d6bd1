//! # Options Command
//!
//! Lists the filter reference data: genres, soup bases, prefectures and,
//! for a chosen prefecture, its areas.

use anyhow::Result;
use colored::Colorize;

use crate::commands::CommandContext;
use crate::errors::report;
use crate::exit_codes::*;
use crate::query::OptionsCatalog;

#[derive(Debug)]
pub struct OptionsArgs {
    /// Only list the areas of this prefecture.
    pub prefecture: Option<u64>,
}

pub async fn execute(args: OptionsArgs) -> Result<i32> {
    let ctx = CommandContext::open()?;
    let catalog = match OptionsCatalog::load(&ctx.api).await {
        Ok(catalog) => catalog,
        Err(e) => return Ok(report(&e)),
    };

    if let Some(prefecture_id) = args.prefecture {
        let Some(prefecture) = catalog.prefecture(prefecture_id) else {
            eprintln!("{} Unknown prefecture {}", "✗".red().bold(), prefecture_id);
            return Ok(EXIT_NOT_FOUND);
        };
        println!("{} {}", "Areas of".bold(), prefecture.name.bold());
        for area in catalog.areas_for(Some(prefecture_id)) {
            println!("  {:>4}  {}", area.id, area.name);
        }
        return Ok(EXIT_SUCCESS);
    }

    println!("{}", "Genres".bold());
    for genre in &catalog.genres {
        println!("  {:<12} {}", genre.name, catalog.genre_label(&genre.name).dimmed());
    }
    println!("{}", "Soup bases".bold());
    for soup_base in &catalog.soup_bases {
        println!("  {}", soup_base.name());
    }
    println!("{}", "Prefectures".bold());
    for prefecture in &catalog.prefectures {
        let areas = catalog.areas_for(Some(prefecture.id)).len();
        println!(
            "  {:>4}  {} {}",
            prefecture.id,
            prefecture.name,
            format!("({} areas)", areas).dimmed()
        );
    }
    Ok(EXIT_SUCCESS)
}
