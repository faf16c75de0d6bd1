//! # ramendir
//!
//! Client library for a ramen restaurant directory: sign in, rank and search
//! restaurants, read comment pages and photo galleries, and write scored
//! comments with photo attachments.
//!
//! ## Modules
//!
//! - [`api`] - HTTP adapter and the [`api::RamenApi`] seam
//! - [`session`] - Token and identity lifecycle
//! - [`query`] - Filtered ranking, name search, catalog reads
//! - [`submission`] - Comment drafts, photo staging, submit and delete
//! - [`gallery`] - Comment pages and the restaurant photo gallery
//! - [`config`] - Configuration and persisted client state
//! - [`error`] - Error taxonomy
//! - [`commands`] - CLI command implementations
//! - [`errors`] - Error display for the CLI
//! - [`exit_codes`] - Standard exit codes

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod errors;
pub mod exit_codes;
pub mod gallery;
pub mod query;
pub mod session;
pub mod submission;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, RamenApi};
pub use config::Config;
pub use error::{RamenError, ValidationError};
pub use gallery::Gallery;
pub use query::{NameSearch, OptionsCatalog, RankingEngine};
pub use session::{Session, SessionManager};
pub use submission::{SubmissionWorkflow, SubmitOutcome};
