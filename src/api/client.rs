//! # API Client Core
//!
//! This module contains the main ApiClient structure and the HTTP plumbing
//! shared by every endpoint group: bearer-token attachment, status-code
//! normalization and request diagnostics.

use log::debug;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

/// Error types for API operations.
///
/// This enum distinguishes between different error conditions that can occur
/// during API calls, allowing callers to handle them appropriately.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication error (401 Unauthorized)
    ///
    /// The token is invalid, expired, or was not provided.
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Authorization error (403 Forbidden)
    #[error("Access denied: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Resource not found (404)
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Network error (connection failed, DNS error, timeout, etc.)
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// Server error (5xx status codes)
    #[error("Server error: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Client error (4xx status codes other than 401/403/404)
    #[error("Request error: {message}")]
    ClientError {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Response parsing error
    #[error("Failed to parse response: {message}")]
    ParseError {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Check if this is an authentication error (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Check if this is a network error.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// HTTP client for the ramen directory API
///
/// All REST resources live under `{base_url}/api`; login is served from
/// `{base_url}/auth/login`.
///
/// # Example
///
/// ```rust,no_run
/// use ramendir::api::ApiClient;
///
/// let client = ApiClient::new("http://localhost:8080".to_string());
/// ```
pub struct ApiClient {
    /// Server root (e.g., <http://localhost:8080>)
    pub base_url: String,
    /// Underlying HTTP client
    pub client: Client,
    /// Trace ID sent with every request of this client
    pub trace_id: String,
}

/// Version of the crate, used in User-Agent header
const VERSION: &str = env!("CARGO_PKG_VERSION");

impl ApiClient {
    /// Create a new API client
    ///
    /// The client is configured with:
    /// - User-Agent: `ramendir/<version>`
    /// - Accept: `application/json`
    /// - X-Request-Trace: a per-client trace id
    pub fn new(base_url: String) -> Self {
        let trace_id = generate_trace_id();

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("ramendir/{VERSION}"))
                .unwrap_or_else(|_| HeaderValue::from_static("ramendir/0.1.0")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(header_value) = HeaderValue::from_str(&trace_id) {
            headers.insert("X-Request-Trace", header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// URL of a REST resource under `/api`.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// URL outside the `/api` prefix (the login endpoint).
    pub(crate) fn root_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token (if any), send, and normalize non-2xx statuses.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let request = request.build().map_err(to_network_error)?;
        debug!(
            "{} {} (auth header: {})",
            request.method(),
            request.url().path(),
            if token.is_some() { "attached" } else { "none" }
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(to_network_error)?;

        let status = response.status();
        debug!("response {} from {}", status.as_u16(), response.url().path());
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 {
                debug!("authorization rejected; token may be invalid or expired");
            }
            return Err(to_http_error(status, error_text));
        }
        Ok(response)
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, token).await?;
        response.json().await.map_err(|e| ApiError::ParseError {
            message: format!("Failed to parse {} response: {}", what, e),
        })
    }
}

/// Generate a 128-bit trace ID as a 32-character hex string.
fn generate_trace_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub(crate) fn to_network_error(e: reqwest::Error) -> ApiError {
    ApiError::Network {
        message: e.to_string(),
    }
}

/// Map a non-success status and body to an [`ApiError`].
pub(crate) fn to_http_error(status: reqwest::StatusCode, error_text: String) -> ApiError {
    let status_code = status.as_u16();
    let message = extract_message(&error_text);

    match status_code {
        401 => ApiError::Unauthorized {
            message: message.unwrap_or_else(|| "Invalid or expired token".to_string()),
        },
        403 => ApiError::Forbidden {
            message: message.unwrap_or_else(|| "Access denied".to_string()),
        },
        404 => ApiError::NotFound {
            message: message.unwrap_or_else(|| "Resource not found".to_string()),
        },
        500..=599 => ApiError::Server {
            status: status_code,
            message: message.unwrap_or_else(|| format!("Server error ({})", status_code)),
        },
        _ => ApiError::ClientError {
            status: status_code,
            message: message.unwrap_or_else(|| format!("Request failed ({})", status_code)),
        },
    }
}

/// Error bodies are either plain text or `{"message": "..."}`.
fn extract_message(error_text: &str) -> Option<String> {
    let trimmed = error_text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(msg) = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
        {
            return Some(msg.to_string());
        }
    }
    Some(trimmed.to_string())
}
