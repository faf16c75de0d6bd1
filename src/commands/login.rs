//! # Login, Register and Logout Commands
//!
//! ## Usage
//!
//! ```bash
//! ramendir login alice --password s3cret
//! ramendir register bob                # prompts for the password
//! ramendir logout
//! ```
//!
//! The token is written to `storage.json`; the signed-in identity is always
//! re-fetched from the server on the next command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::api::{LoginRequest, RegistrationRequest};
use crate::commands::CommandContext;
use crate::errors::{display_info, display_success, report};
use crate::exit_codes::*;

#[derive(Debug)]
pub struct LoginArgs {
    pub username: String,
    pub password: Option<String>,
    pub recaptcha: Option<String>,
}

/// Read the password from the terminal when it was not passed as a flag.
fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Execute the login command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Signed in and token stored
/// * `Ok(EXIT_AUTH_ERROR)` - Credentials rejected
/// * `Ok(EXIT_INVALID_INPUT)` - Empty username or password
/// * `Ok(EXIT_NETWORK_ERROR)` - Server unreachable
pub async fn execute_login(args: LoginArgs) -> Result<i32> {
    let mut ctx = CommandContext::open()?;
    let credentials = LoginRequest {
        username: args.username,
        password: read_password(args.password)?,
        recaptcha_response: args.recaptcha.unwrap_or_default(),
    };

    match ctx.session.login(&ctx.api, &credentials).await {
        Ok(session) => {
            display_success(&format!(
                "Signed in as {}",
                session.user.username.bright_white().bold()
            ));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

/// Execute the register command
///
/// Registration requires a CAPTCHA answer. Without `--recaptcha` the site
/// key is printed so the answer can be obtained, and nothing is sent.
pub async fn execute_register(args: LoginArgs) -> Result<i32> {
    let mut ctx = CommandContext::open()?;

    let Some(recaptcha) = args.recaptcha.filter(|r| !r.trim().is_empty()) else {
        match ctx.session.recaptcha_site_key(&ctx.api).await {
            Ok(key) => {
                display_info(&format!("reCAPTCHA site key: {}", key.cyan()));
                println!(
                    "  {} Solve the CAPTCHA and pass the answer with --recaptcha",
                    "→".cyan()
                );
                return Ok(EXIT_INVALID_INPUT);
            }
            Err(e) => return Ok(report(&e)),
        }
    };

    let data = RegistrationRequest {
        username: args.username,
        password: read_password(args.password)?,
        recaptcha_response: recaptcha,
    };
    match ctx.session.register(&ctx.api, &data).await {
        Ok(session) => {
            display_success(&format!(
                "Account created; signed in as {}",
                session.user.username.bright_white().bold()
            ));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

/// Execute the logout command. Works offline.
pub fn execute_logout() -> Result<i32> {
    let mut ctx = CommandContext::open()?;
    ctx.session.logout();
    display_success("Signed out");
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_flag_skips_prompt() {
        assert_eq!(read_password(Some("s3cret".into())).unwrap(), "s3cret");
    }
}
