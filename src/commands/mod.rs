//! # CLI Command Implementations
//!
//! Each submodule is one top-level command or command group. Commands return
//! a process exit code; component errors are printed through
//! [`crate::errors`] and mapped with [`crate::errors::exit_code_for`].
//!
//! ## Available Commands
//!
//! - [`login`] - Sign in, register, sign out
//! - [`status`] - Server, session and theme overview
//! - [`ranking`] - Filtered restaurant ranking
//! - [`search`] - Name search
//! - [`restaurant`] - Restaurant detail, front page and top list
//! - [`comments`] - Comment pages and the photo gallery
//! - [`comment`] - Write, edit, delete and report comments
//! - [`options`] - Filter reference data
//! - [`config`] - Base URL and theme settings

pub mod comment;
pub mod comments;
pub mod config;
pub mod login;
pub mod options;
pub mod ranking;
pub mod restaurant;
pub mod search;
pub mod status;

use anyhow::Result;
use log::debug;

use crate::api::ApiClient;
use crate::config::{Config, FileTokenStore};
use crate::errors::display_warning;
use crate::gallery::Gallery;
use crate::session::SessionManager;

/// Everything a command needs to talk to the server.
pub struct CommandContext {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionManager<FileTokenStore>,
}

impl CommandContext {
    /// Build the client from the stored config without touching the session.
    pub fn open() -> Result<Self> {
        let config = Config::load_or_default();
        let base_url = config.base_url();
        debug!("using API at {}", base_url);
        let api = ApiClient::new(base_url);
        let session = SessionManager::new(FileTokenStore::open_default()?);
        Ok(Self {
            config,
            api,
            session,
        })
    }

    /// Like [`Self::open`], then re-derive the signed-in user from the
    /// stored token. An expired token is cleared and the command continues
    /// signed out.
    pub async fn open_restored() -> Result<Self> {
        let mut ctx = Self::open()?;
        if let Err(e) = ctx.session.restore_session(&ctx.api).await {
            display_warning(&format!("{} (signed out)", e));
        }
        Ok(ctx)
    }

    /// A gallery sized from the config.
    pub fn gallery(&self, restaurant_id: u64) -> Gallery {
        Gallery::with_sizes(
            restaurant_id,
            self.config.comment_page_size,
            self.config.gallery_preview,
        )
    }
}
