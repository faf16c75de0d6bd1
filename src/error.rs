//! # Error Taxonomy
//!
//! [`RamenError`] is what the session, query, submission and gallery
//! components return. Transport-level [`ApiError`]s are folded into it at
//! the component boundary; [`ValidationError`]s are raised locally and
//! never reach the network.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by the client components.
#[derive(Debug, Error)]
pub enum RamenError {
    /// Bad credentials, missing token, or an expired session.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A local form or photo constraint was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure or a 5xx answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The restaurant or comment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other rejected request, or a body that could not be decoded.
    #[error("Request failed: {message}")]
    Request {
        status: Option<u16>,
        message: String,
    },
}

impl RamenError {
    pub fn is_auth(&self) -> bool {
        matches!(self, RamenError::Auth(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RamenError::Validation(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, RamenError::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RamenError::NotFound(_))
    }

    pub(crate) fn session_expired() -> Self {
        RamenError::Auth("session expired".to_string())
    }

    pub(crate) fn not_signed_in() -> Self {
        RamenError::Auth("not signed in".to_string())
    }
}

impl From<ApiError> for RamenError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized { message } | ApiError::Forbidden { message } => {
                RamenError::Auth(message)
            }
            ApiError::NotFound { message } => RamenError::NotFound(message),
            ApiError::Network { message } => RamenError::Network(message),
            ApiError::Server { status, message } => {
                RamenError::Network(format!("{} ({})", message, status))
            }
            ApiError::ClientError { status, message } => RamenError::Request {
                status: Some(status),
                message,
            },
            ApiError::ParseError { message } => RamenError::Request {
                status: None,
                message,
            },
        }
    }
}

/// Local constraint violations, checked before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} score is required")]
    MissingScore { field: &'static str },

    #[error("{field} score must be between 1 and 5, got {value}")]
    ScoreOutOfRange { field: &'static str, value: u8 },

    #[error("unsupported photo type '{mime}': only JPEG and PNG are accepted")]
    UnsupportedPhotoType { mime: String },

    #[error("a comment can carry at most {max} photos")]
    TooManyPhotos { max: usize },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("report reason must be between {min} and {max} characters")]
    ReasonLength { min: usize, max: usize },

    #[error("area {area_id} is not in prefecture {prefecture_id}")]
    AreaOutsidePrefecture { area_id: u64, prefecture_id: u64 },

    #[error("page numbers start at 1")]
    PageOutOfRange,

    #[error("no prefecture is selected")]
    NoPrefectureSelected,

    #[error("no comment draft is open")]
    DraftClosed,

    #[error("no deletion is awaiting confirmation")]
    NoDeletePending,

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("no photo at position {0}")]
    NoSuchPhoto(usize),
}

pub type Result<T, E = RamenError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_auth() {
        let err: RamenError = ApiError::Forbidden {
            message: "Access denied".into(),
        }
        .into();
        assert!(err.is_auth());
    }

    #[test]
    fn test_server_errors_are_network_errors() {
        let err: RamenError = ApiError::Server {
            status: 503,
            message: "Service Unavailable".into(),
        }
        .into();
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Network error: Service Unavailable (503)");
    }

    #[test]
    fn test_client_errors_keep_status() {
        let err: RamenError = ApiError::ClientError {
            status: 429,
            message: "Too many comments".into(),
        }
        .into();
        match err {
            RamenError::Request { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "Too many comments");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = RamenError::from(ValidationError::TooManyPhotos { max: 7 });
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "a comment can carry at most 7 photos");
    }
}
