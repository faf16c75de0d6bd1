//! # Exit Codes
//!
//! Process exit codes for the `ramendir` binary, following common Unix
//! conventions so scripts can tell failures apart.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 1;

/// Configuration error (unreadable or unwritable config/storage files)
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Authentication error (bad credentials, not signed in, session expired)
pub const EXIT_AUTH_ERROR: i32 = 3;

/// Network error (connection failed, timeout, 5xx)
pub const EXIT_NETWORK_ERROR: i32 = 4;

/// The comment was saved but some photos were not
pub const EXIT_PARTIAL_SUCCESS: i32 = 5;

/// Invalid input (bad arguments, failed form validation, rejected request)
pub const EXIT_INVALID_INPUT: i32 = 6;

/// The restaurant or comment does not exist
pub const EXIT_NOT_FOUND: i32 = 7;
