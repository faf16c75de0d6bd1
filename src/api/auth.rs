//! # Authentication API
//!
//! Login, registration, identity lookup and the CAPTCHA site key.

use crate::api::client::{ApiClient, ApiError};
use crate::api::types::{LoginRequest, RegistrationRequest, UserIdentity};
use serde::Deserialize;

/// Body returned by `POST /auth/login`.
///
/// The server has shipped several shapes over time; each accepted shape is
/// one variant, tried in order. A body matching none of them is kept as
/// [`LoginResponse::Unrecognized`] so the caller can report it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    /// The token itself, as a JSON string or a raw text body.
    Bare(String),
    Token {
        token: String,
    },
    AccessToken {
        access_token: String,
    },
    Jwt {
        jwt: String,
    },
    AccessTokenCamel {
        #[serde(rename = "accessToken")]
        access_token: String,
    },
    Unrecognized(serde_json::Value),
}

impl LoginResponse {
    /// Parse a login body. Non-JSON text is taken as a bare token.
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        match serde_json::from_str::<LoginResponse>(trimmed) {
            Ok(parsed) => parsed,
            Err(_) if !trimmed.is_empty() && !trimmed.starts_with(['{', '[']) => {
                LoginResponse::Bare(trimmed.to_string())
            }
            Err(_) => LoginResponse::Unrecognized(serde_json::Value::String(trimmed.to_string())),
        }
    }

    /// The token carried by this response, if any. Empty strings do not count.
    pub fn into_token(self) -> Option<String> {
        let token = match self {
            LoginResponse::Bare(token)
            | LoginResponse::Token { token }
            | LoginResponse::AccessToken {
                access_token: token,
            }
            | LoginResponse::Jwt { jwt: token }
            | LoginResponse::AccessTokenCamel {
                access_token: token,
            } => token,
            LoginResponse::Unrecognized(_) => return None,
        };
        let token = token.trim().to_string();
        (!token.is_empty()).then_some(token)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteKeyResponse {
    site_key: String,
}

impl ApiClient {
    /// `POST /auth/login`
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - The server accepted the credentials
    /// * `Err(ApiError::Unauthorized)` - Credentials rejected
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.root_url("/auth/login");
        let response = self
            .send(self.client.post(&url).json(credentials), None)
            .await?;
        let body = response.text().await.map_err(|e| ApiError::ParseError {
            message: format!("Failed to read login response: {}", e),
        })?;
        Ok(LoginResponse::parse(&body))
    }

    /// `POST /users/register`
    pub async fn register(&self, data: &RegistrationRequest) -> Result<UserIdentity, ApiError> {
        let url = self.api_url("/users/register");
        self.send_json(self.client.post(&url).json(data), None, "registration")
            .await
    }

    /// `GET /users/me`
    pub async fn current_user(&self, token: &str) -> Result<UserIdentity, ApiError> {
        let url = self.api_url("/users/me");
        self.send_json(self.client.get(&url), Some(token), "identity")
            .await
    }

    /// `GET /recaptcha/sitekey`
    pub async fn recaptcha_site_key(&self) -> Result<String, ApiError> {
        let url = self.api_url("/recaptcha/sitekey");
        let response: SiteKeyResponse = self
            .send_json(self.client.get(&url), None, "site key")
            .await?;
        Ok(response.site_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json_string() {
        let parsed = LoginResponse::parse(r#""abc.def.ghi""#);
        assert_eq!(parsed, LoginResponse::Bare("abc.def.ghi".into()));
        assert_eq!(parsed.into_token().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_raw_text_body() {
        let parsed = LoginResponse::parse("abc.def.ghi\n");
        assert_eq!(parsed.into_token().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_object_shapes() {
        let cases = [
            r#"{"token":"t1","userId":1,"username":"alice"}"#,
            r#"{"access_token":"t1"}"#,
            r#"{"jwt":"t1"}"#,
            r#"{"accessToken":"t1"}"#,
        ];
        for body in cases {
            assert_eq!(
                LoginResponse::parse(body).into_token().as_deref(),
                Some("t1"),
                "body {body}"
            );
        }
    }

    #[test]
    fn test_token_field_wins_over_others() {
        let parsed = LoginResponse::parse(r#"{"jwt":"second","token":"first"}"#);
        assert_eq!(parsed.into_token().as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(LoginResponse::parse(r#"{"userId":1}"#).into_token(), None);
        assert_eq!(LoginResponse::parse(r#"{"token":""}"#).into_token(), None);
        assert_eq!(LoginResponse::parse("").into_token(), None);
        assert_eq!(LoginResponse::parse("[1,2]").into_token(), None);
    }
}
