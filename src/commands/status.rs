//! # Status Command
//!
//! Shows the configured server, whether it answers, who is signed in and
//! the theme preference.
//!
//! ## Usage
//!
//! ```bash
//! ramendir status
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::commands::CommandContext;
use crate::config::{ClientStorage, storage_path};
use crate::exit_codes::*;
use crate::query::browse;

/// Execute the status command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Server reachable
/// * `Ok(EXIT_NETWORK_ERROR)` - Cannot reach the server
pub async fn execute() -> Result<i32> {
    println!("{}", "ramendir status".bold());
    println!("{}", "─".repeat(40).dimmed());
    println!();

    let mut ctx = CommandContext::open()?;
    println!(
        "{} API Endpoint: {}",
        "ℹ".blue(),
        ctx.config.base_url().cyan()
    );

    if let Err(e) = browse::top_restaurants(&ctx.api, 1).await {
        println!("{} API Status: {}", "✗".red().bold(), "Unreachable".red());
        println!("  {} {}", "Error:".dimmed(), e.to_string().dimmed());
        return Ok(EXIT_NETWORK_ERROR);
    }
    println!("{} API Status: {}", "✓".bright_green().bold(), "Reachable".green());

    println!();
    match ctx.session.restore_session(&ctx.api).await {
        Ok(Some(session)) => println!(
            "{} Signed in as {} (id {})",
            "✓".bright_green().bold(),
            session.user.username.bright_white().bold(),
            session.user.id
        ),
        Ok(None) => println!(
            "{} Not signed in. Run `ramendir login` to sign in.",
            "ℹ".blue()
        ),
        Err(e) => println!("{} {}", "⚠".yellow().bold(), e),
    }

    let theme = storage_path()
        .and_then(|path| ClientStorage::load_from(&path))
        .map(|storage| storage.theme_mode)
        .unwrap_or_default();
    println!("{} Theme: {}", "ℹ".blue(), theme.as_str());

    Ok(EXIT_SUCCESS)
}
