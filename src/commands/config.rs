//! # Config and Theme Commands
//!
//! ## Usage
//!
//! ```bash
//! ramendir config show
//! ramendir config set-url http://ramen.example.com
//! ramendir theme              # show
//! ramendir theme --toggle
//! ramendir theme --set light
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::config::{BASE_URL_ENV_VAR, ClientStorage, Config, ThemeMode, config_path, storage_path};
use crate::errors::{display_config_error, display_success};
use crate::exit_codes::*;

/// Execute the config show command
pub fn execute_show() -> Result<i32> {
    let config = Config::load_or_default();

    println!("{}", "Configuration".bold());
    println!("{}", "─".repeat(40).dimmed());
    if let Ok(path) = config_path() {
        println!("{} File: {}", "ℹ".blue(), path.display().to_string().dimmed());
    }
    println!("  Base URL:          {}", config.base_url().cyan());
    if std::env::var(BASE_URL_ENV_VAR).is_ok() {
        println!(
            "  {} overridden by {} (stored: {})",
            "→".cyan(),
            BASE_URL_ENV_VAR,
            config.stored_base_url()
        );
    }
    println!("  Comments per page: {}", config.comment_page_size);
    println!("  Gallery preview:   {}", config.gallery_preview);
    Ok(EXIT_SUCCESS)
}

/// Execute the config set-url command
pub fn execute_set_url(url: String) -> Result<i32> {
    let url = url.trim().trim_end_matches('/').to_string();
    if reqwest::Url::parse(&url).is_err() {
        display_config_error(&format!("'{}' is not a valid URL", url));
        return Ok(EXIT_INVALID_INPUT);
    }
    let mut config = Config::load_or_default();
    config.set_base_url(url.clone());
    if let Err(e) = config.save() {
        display_config_error(&format!("{:#}", e));
        return Ok(EXIT_CONFIG_ERROR);
    }
    display_success(&format!("Base URL set to {}", url));
    Ok(EXIT_SUCCESS)
}

#[derive(Debug)]
pub enum ThemeArgs {
    Show,
    Toggle,
    Set(ThemeMode),
}

/// Execute the theme command
pub fn execute_theme(args: ThemeArgs) -> Result<i32> {
    let path = storage_path()?;
    let mut storage = match ClientStorage::load_from(&path) {
        Ok(storage) => storage,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let next = match args {
        ThemeArgs::Show => {
            println!("{}", storage.theme_mode.as_str());
            return Ok(EXIT_SUCCESS);
        }
        ThemeArgs::Toggle => storage.theme_mode.toggled(),
        ThemeArgs::Set(mode) => mode,
    };
    storage.theme_mode = next;
    if let Err(e) = storage.save_to(&path) {
        display_config_error(&format!("{:#}", e));
        return Ok(EXIT_CONFIG_ERROR);
    }
    display_success(&format!("Theme set to {}", next.as_str()));
    Ok(EXIT_SUCCESS)
}
