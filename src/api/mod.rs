//! HTTP adapter for the ramen directory REST API.
//!
//! - `client` - ApiClient, ApiError and the shared request plumbing
//! - `auth` - login, registration, identity
//! - `restaurants` - catalog, ranking, search and reference data
//! - `comments` - comments, photos, reports
//! - `backend` - the `RamenApi` trait the client components depend on

pub mod auth;
pub mod backend;
pub mod client;
pub mod comments;
pub mod restaurants;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::LoginResponse;
pub use backend::RamenApi;
pub use client::{ApiClient, ApiError};
pub use restaurants::QueryParams;
pub use types::*;
