//! # Error Display
//!
//! User-facing rendering of errors for the `ramendir` binary, and the
//! mapping from [`RamenError`] to a process exit code.

use colored::Colorize;

use crate::error::RamenError;
use crate::exit_codes::*;

/// Display a network error with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_network_error(message: &str) {
    eprintln!("{} Network error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • The ramen directory server is not running");
    eprintln!("  • The configured base URL is wrong");
    eprintln!("  • The server failed while handling the request");
    eprintln!();
    eprintln!(
        "{} Check `ramendir config show` and try again.",
        "Tip:".cyan().bold()
    );
}

/// Display an authentication error with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_auth_error(message: &str) {
    eprintln!("{} Authentication error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • You haven't signed in yet");
    eprintln!("  • Your session has expired");
    eprintln!("  • The comment belongs to another user");
    eprintln!();
    eprintln!(
        "{} Run `ramendir login` to sign in.",
        "Tip:".cyan().bold()
    );
}

/// Display a configuration error with helpful suggestions
pub fn display_config_error(message: &str) {
    eprintln!("{} Configuration error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!(
        "{} Remove the ramendir config directory to start fresh.",
        "Tip:".cyan().bold()
    );
}

/// Display a validation error
pub fn display_validation_error(message: &str) {
    eprintln!("{} Invalid input: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!(
        "{} Check the command options and try again.",
        "Tip:".cyan().bold()
    );
}

pub fn display_not_found_error(message: &str) {
    eprintln!("{} Not found: {}", "✗".red().bold(), message);
}

/// Display a generic error
pub fn display_error(message: &str) {
    eprintln!("{} Error: {}", "✗".red().bold(), message);
}

/// Display a warning
pub fn display_warning(message: &str) {
    eprintln!("{} Warning: {}", "⚠".yellow().bold(), message);
}

/// Display a success message
pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Display an info message
pub fn display_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Exit code for a component error.
pub fn exit_code_for(err: &RamenError) -> i32 {
    match err {
        RamenError::Auth(_) => EXIT_AUTH_ERROR,
        RamenError::Validation(_) => EXIT_INVALID_INPUT,
        RamenError::Network(_) => EXIT_NETWORK_ERROR,
        RamenError::NotFound(_) => EXIT_NOT_FOUND,
        RamenError::Request { .. } => EXIT_INVALID_INPUT,
    }
}

/// Print `err` with the matching helper and return its exit code.
pub fn report(err: &RamenError) -> i32 {
    match err {
        RamenError::Auth(message) => display_auth_error(message),
        RamenError::Validation(e) => display_validation_error(&e.to_string()),
        RamenError::Network(message) => display_network_error(message),
        RamenError::NotFound(message) => display_not_found_error(message),
        RamenError::Request { status, message } => match status {
            Some(status) => display_error(&format!("{} ({})", message, status)),
            None => display_error(message),
        },
    }
    exit_code_for(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&RamenError::Auth("x".into())), EXIT_AUTH_ERROR);
        assert_eq!(
            exit_code_for(&ValidationError::PageOutOfRange.into()),
            EXIT_INVALID_INPUT
        );
        assert_eq!(
            exit_code_for(&RamenError::Network("down".into())),
            EXIT_NETWORK_ERROR
        );
        assert_eq!(
            exit_code_for(&RamenError::NotFound("comment 9".into())),
            EXIT_NOT_FOUND
        );
        assert_eq!(
            exit_code_for(&RamenError::Request {
                status: Some(409),
                message: "conflict".into()
            }),
            EXIT_INVALID_INPUT
        );
    }

    #[test]
    fn test_report_does_not_panic() {
        assert_eq!(report(&RamenError::Auth("session expired".into())), EXIT_AUTH_ERROR);
        display_warning("thumbnail missing");
        display_success("Signed in");
        display_info("page 1 of 3");
    }
}
