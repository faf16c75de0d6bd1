//! # Configuration Management
//!
//! Loading and saving the client configuration and the small amount of
//! durable client state (auth token and theme preference).
//!
//! ## File Locations
//!
//! - `$XDG_CONFIG_HOME/ramendir/config.json`, falling back to
//!   `$HOME/.config/ramendir/config.json`
//! - `storage.json` beside it holds the persisted `token` and `themeMode`
//!
//! The `RAMENDIR_BASE_URL` environment variable overrides the stored server.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable for overriding the base URL
pub const BASE_URL_ENV_VAR: &str = "RAMENDIR_BASE_URL";

const DEFAULT_COMMENT_PAGE_SIZE: u32 = 5;
const DEFAULT_GALLERY_PREVIEW: usize = 5;

/// Client configuration
///
/// # Example
///
/// ```rust
/// use ramendir::config::Config;
///
/// let config = Config::new_with_url("http://ramen.example.com".to_string());
/// assert_eq!(config.comment_page_size, 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL for the API (stored in config file)
    #[serde(default = "stored_default_base_url")]
    stored_base_url: String,
    /// Comments shown per restaurant page
    #[serde(default = "default_comment_page_size")]
    pub comment_page_size: u32,
    /// Photos shown before the "+N more" overflow
    #[serde(default = "default_gallery_preview")]
    pub gallery_preview: usize,
}

fn stored_default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_comment_page_size() -> u32 {
    DEFAULT_COMMENT_PAGE_SIZE
}

fn default_gallery_preview() -> usize {
    DEFAULT_GALLERY_PREVIEW
}

impl Default for Config {
    fn default() -> Self {
        Self::new_with_url(DEFAULT_BASE_URL.to_string())
    }
}

impl Config {
    pub fn new_with_url(base_url: String) -> Self {
        Self {
            stored_base_url: base_url,
            comment_page_size: DEFAULT_COMMENT_PAGE_SIZE,
            gallery_preview: DEFAULT_GALLERY_PREVIEW,
        }
    }

    /// Get the effective base URL
    ///
    /// Environment variable `RAMENDIR_BASE_URL` takes precedence over the config file.
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| self.stored_base_url.clone())
    }

    pub fn stored_base_url(&self) -> &str {
        &self.stored_base_url
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.stored_base_url = base_url;
    }

    /// Load configuration from the default config file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(_)` - Configuration file not found or invalid
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load the config file if present, otherwise the defaults.
    pub fn load_or_default() -> Self {
        if !Self::exists() {
            return Self::default();
        }
        Self::load().unwrap_or_else(|e| {
            warn!("ignoring unreadable config: {:#}", e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default config file
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        write_file(path, &contents)
    }

    /// Check if a configuration file exists
    pub fn exists() -> bool {
        config_path().map(|p| p.exists()).unwrap_or(false)
    }
}

/// Get the default base URL
///
/// Checks the `RAMENDIR_BASE_URL` environment variable first,
/// then falls back to the local development server.
pub fn default_base_url() -> String {
    std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// UI colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

/// Durable client state, keyed by the fixed identifiers `token` and `themeMode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "themeMode", default)]
    pub theme_mode: ThemeMode,
}

impl ClientStorage {
    /// Read the storage file; a missing file is empty storage.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage file: {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize client storage")?;
        write_file(path, &contents)
    }
}

/// Where the session manager keeps the auth token between runs.
pub trait TokenStore: Send {
    fn load_token(&self) -> Option<String>;
    fn save_token(&mut self, token: &str) -> Result<()>;
    fn clear_token(&mut self) -> Result<()>;
}

/// Token persisted in `storage.json`, leaving `themeMode` untouched.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default `storage.json` location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(storage_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load_token(&self) -> Option<String> {
        match ClientStorage::load_from(&self.path) {
            Ok(storage) => storage.token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        }
    }

    fn save_token(&mut self, token: &str) -> Result<()> {
        let mut storage = ClientStorage::load_from(&self.path).unwrap_or_default();
        storage.token = Some(token.to_string());
        storage.save_to(&self.path)
    }

    fn clear_token(&mut self) -> Result<()> {
        let mut storage = ClientStorage::load_from(&self.path).unwrap_or_default();
        if storage.token.take().is_none() && !self.path.exists() {
            return Ok(());
        }
        storage.save_to(&self.path)
    }
}

/// Token kept only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn save_token(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&mut self) -> Result<()> {
        self.token = None;
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the path to the client storage file
pub fn storage_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("storage.json"))
}

fn app_dir() -> Result<PathBuf> {
    let config_dir = dirs_config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("ramendir"))
}

/// Get the config directory
///
/// Uses `$HOME/.config` on all platforms for consistency.
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())
                .map(|h| PathBuf::from(h).join(".config"))
        })
}
