//! # Session Manager
//!
//! Owns the auth token and the identity it resolves to. The two are held
//! together in one [`Session`] value, so there is never a token without a
//! user or a user without a token in memory. The token is persisted through
//! a [`TokenStore`]; identity is always re-fetched from the server.
//!
//! Authenticated calls elsewhere in the crate go through
//! [`SessionManager::require_token`] before the request and
//! [`SessionManager::observe`] after it, which turns a 401/403 into a
//! cleared session.

use log::{debug, info, warn};

use crate::api::{ApiError, Comment, LoginRequest, RamenApi, RegistrationRequest, UserIdentity};
use crate::config::TokenStore;
use crate::error::{RamenError, Result, ValidationError};

/// An authenticated pairing of token and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserIdentity,
}

pub struct SessionManager<S: TokenStore> {
    store: S,
    session: Option<Session>,
}

impl<S: TokenStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authenticate, persist the token, then confirm identity.
    ///
    /// Login is complete only once `GET /users/me` succeeds; if it fails the
    /// persisted token is removed again and the error is returned.
    pub async fn login<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        credentials: &LoginRequest,
    ) -> Result<&Session> {
        if credentials.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if credentials.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let response = api
            .login(credentials)
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => {
                    RamenError::Auth("invalid username or password".to_string())
                }
                other => RamenError::from(other),
            })?;
        let token = response
            .into_token()
            .ok_or_else(|| RamenError::Auth("no token in login response".to_string()))?;
        debug!("login accepted for {}", credentials.username);

        self.session = None;
        if let Err(e) = self.store.save_token(&token) {
            warn!("could not persist token: {:#}", e);
        }

        match api.current_user(&token).await {
            Ok(user) => {
                info!("signed in as {}", user.username);
                let session = self.session.insert(Session { token, user });
                Ok(&*session)
            }
            Err(e) => {
                self.clear_store();
                Err(e.into())
            }
        }
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn register<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        data: &RegistrationRequest,
    ) -> Result<&Session> {
        if data.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if data.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        let created = api.register(data).await?;
        debug!("registered account {} ({})", created.username, created.id);
        self.login(api, &LoginRequest::from(data)).await
    }

    /// Drop the session and the persisted token. Never fails.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("signed out {}", session.user.username);
        }
        self.clear_store();
    }

    /// Resume from a persisted token, if there is one.
    ///
    /// Any failure to confirm identity clears the token and reports
    /// "session expired".
    pub async fn restore_session<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<Option<&Session>> {
        let Some(token) = self.store.load_token() else {
            return Ok(None);
        };
        match api.current_user(&token).await {
            Ok(user) => {
                debug!("restored session for {}", user.username);
                let session = self.session.insert(Session { token, user });
                Ok(Some(&*session))
            }
            Err(e) => {
                debug!("stored token rejected: {}", e);
                self.session = None;
                self.clear_store();
                Err(RamenError::session_expired())
            }
        }
    }

    /// Token for an authenticated call, or an auth error before any request is made.
    pub fn require_token(&self) -> Result<String> {
        self.token()
            .map(str::to_string)
            .ok_or_else(RamenError::not_signed_in)
    }

    /// Fold the result of an authenticated call, clearing the session on 401/403.
    pub fn observe<T>(&mut self, result: std::result::Result<T, ApiError>) -> Result<T> {
        result.map_err(|e| self.handle_error(e))
    }

    /// Convert an error from an authenticated call. Authorization failures
    /// end the session and read as "session expired".
    pub fn handle_error(&mut self, e: ApiError) -> RamenError {
        if e.is_auth_error() {
            warn!("authorization rejected ({}), clearing session", e);
            self.logout();
            return RamenError::session_expired();
        }
        e.into()
    }

    /// Whether the signed-in user wrote `comment` and may edit or delete it.
    pub fn owns(&self, comment: &Comment) -> bool {
        self.user().is_some_and(|u| u.id == comment.user_id)
    }

    pub async fn recaptcha_site_key<A: RamenApi + ?Sized>(&self, api: &A) -> Result<String> {
        Ok(api.recaptcha_site_key().await?)
    }

    fn clear_store(&mut self) {
        if let Err(e) = self.store.clear_token() {
            warn!("could not clear persisted token: {:#}", e);
        }
    }
}
