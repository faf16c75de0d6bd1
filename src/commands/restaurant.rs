//! # Restaurant Commands
//!
//! ```bash
//! ramendir restaurant 42     # detail, with thumbnail and comment eligibility
//! ramendir top --limit 5
//! ramendir frontpage
//! ```

use anyhow::Result;
use colored::Colorize;
use log::warn;

use crate::api::{Restaurant, SoupBaseEntry};
use crate::commands::CommandContext;
use crate::commands::ranking::print_row;
use crate::errors::report;
use crate::exit_codes::*;
use crate::query::browse;
use crate::submission::SubmissionWorkflow;

fn line(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        println!("  {:<14} {}", label.dimmed(), value);
    }
}

fn print_restaurant(restaurant: &Restaurant, thumbnail: Option<&str>) {
    let score = restaurant
        .score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string());
    println!("{}  {}", restaurant.name.bold(), score.yellow());
    println!("{}", "─".repeat(40).dimmed());

    let genres: Vec<&str> = restaurant.genres.iter().map(|g| g.name.as_str()).collect();
    let soup_bases: Vec<&str> = restaurant
        .soup_bases
        .iter()
        .map(SoupBaseEntry::name)
        .collect();
    line("Genres", Some(genres.join(", ").as_str()));
    line("Soup", Some(soup_bases.join(", ").as_str()));
    if let Some(address) = &restaurant.address {
        line("Address", address.full_address.as_deref());
        line("Postal code", address.postal_code.as_deref());
    }
    line("Hours", restaurant.opening_hours.as_deref());
    line("Closed", restaurant.rest_day.as_deref());
    line("Opened", restaurant.opening_date.as_deref());
    let seats = restaurant.seats.map(|s| s.to_string());
    line("Seats", seats.as_deref());
    line(
        "Queue",
        restaurant.queue_method.as_ref().map(|q| q.name.as_str()),
    );
    match restaurant.reservation_system {
        Some(true) => line("Reservations", Some("yes")),
        Some(false) => line("Reservations", Some("no")),
        None => {}
    }
    line("Menu", restaurant.menu_content.as_deref());
    line("Photo", thumbnail);
    if let Some(description) = &restaurant.description {
        println!();
        println!("{}", description);
    }
}

pub async fn execute_detail(restaurant_id: u64) -> Result<i32> {
    let mut ctx = CommandContext::open_restored().await?;
    let (restaurant, thumbnail) = tokio::join!(
        browse::restaurant(&ctx.api, restaurant_id),
        browse::thumbnail(&ctx.api, restaurant_id)
    );
    let restaurant = match restaurant {
        Ok(restaurant) => restaurant,
        Err(e) => return Ok(report(&e)),
    };
    print_restaurant(&restaurant, thumbnail.as_deref());

    if ctx.session.is_authenticated() {
        let workflow = SubmissionWorkflow::new();
        match workflow
            .can_comment(&ctx.api, &mut ctx.session, restaurant_id)
            .await
        {
            Ok(answer) if answer.can_comment => {
                println!();
                println!("{} You can comment on this restaurant.", "✓".green());
            }
            Ok(answer) => {
                println!();
                println!(
                    "{} {}",
                    "ℹ".blue(),
                    answer
                        .message
                        .unwrap_or_else(|| "You cannot comment here right now.".to_string())
                );
            }
            Err(e) => warn!("comment eligibility unavailable: {}", e),
        }
    }
    Ok(EXIT_SUCCESS)
}

pub async fn execute_top(limit: u32) -> Result<i32> {
    let ctx = CommandContext::open()?;
    match browse::top_restaurants(&ctx.api, limit).await {
        Ok(restaurants) => {
            for (i, restaurant) in restaurants.iter().enumerate() {
                print_row(i as u64 + 1, restaurant);
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

pub async fn execute_frontpage() -> Result<i32> {
    let ctx = CommandContext::open()?;
    let cards = match browse::frontpage(&ctx.api).await {
        Ok(cards) => cards,
        Err(e) => return Ok(report(&e)),
    };
    for card in &cards {
        let score = card
            .score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:>4}  {}  {}",
            card.name.bold(),
            score.yellow(),
            card.prefecture_name.as_deref().unwrap_or("").dimmed(),
            format!("#{}", card.id).dimmed()
        );
    }
    Ok(EXIT_SUCCESS)
}
