//! Session Provider
//!
//! The seam other crates authenticate through: request headers in,
//! principal (or nothing) out.

use axum::http::HeaderMap;
use kernel::principal::Principal;
use std::sync::Arc;

use platform::client::extract_bearer_token;
use platform::cookie::extract_cookie;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Resolve the caller of a request
#[trait_variant::make(SessionProvider: Send)]
pub trait LocalSessionProvider {
    /// `Ok(None)` means "not signed in"; `Err` is reserved for lookup
    /// failures (e.g. the session store is down).
    async fn get_session(&self, headers: &HeaderMap) -> AuthResult<Option<Principal>>;
}

/// Session token from the cookie, falling back to `Authorization: Bearer`
pub fn session_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    extract_cookie(headers, &config.session_cookie_name).or_else(|| extract_bearer_token(headers))
}

/// [`SessionProvider`] backed by the auth session store
pub struct AuthSessionProvider<S> {
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> AuthSessionProvider<S> {
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }
}

impl<S> Clone for AuthSessionProvider<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SessionProvider for AuthSessionProvider<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    async fn get_session(&self, headers: &HeaderMap) -> AuthResult<Option<Principal>> {
        let Some(token) = session_token(headers, &self.config) else {
            return Ok(None);
        };

        let use_case = CheckSessionUseCase::new(self.sessions.clone(), self.config.clone());
        match use_case.get_session(&token).await {
            Ok(session) => Ok(Some(session.principal())),
            Err(AuthError::SessionInvalid) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
