//! In-memory repository for development and testing.
//!
//! Mirrors the PostgreSQL semantics the use cases rely on: unique emails,
//! atomic user + credentials creation, cascade of credentials and sessions
//! on user deletion. Not suitable for production use.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{SessionId, UserId};
use tokio::sync::Mutex;

use crate::domain::entity::{auth_session::AuthSession, credentials::Credentials, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Credentials>,
    sessions: HashMap<SessionId, AuthSession>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// Overwrite a user's role (e.g. to seed an admin)
    pub async fn set_role(&self, user_id: &UserId, role: kernel::principal::Role) {
        if let Some(user) = self.state.lock().await.users.get_mut(user_id) {
            user.role = role;
            user.updated_at = Utc::now();
        }
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User, credentials: &Credentials) -> AuthResult<()> {
        let mut state = self.state.lock().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.users.insert(user.user_id, user.clone());
        state.credentials.insert(user.user_id, credentials.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.state.lock().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let mut state = self.state.lock().await;

        let existed = state.users.remove(user_id).is_some();
        state.credentials.remove(user_id);
        state.sessions.retain(|_, s| &s.user_id != user_id);
        Ok(existed)
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        Ok(self.state.lock().await.credentials.get(user_id).cloned())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        state.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.state.lock().await.sessions.get(session_id).cloned())
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        if let Some(stored) = state.sessions.get_mut(&session.session_id) {
            stored.expires_at_ms = session.expires_at_ms;
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.state.lock().await.sessions.remove(session_id);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| &s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired());
        Ok((before - state.sessions.len()) as u64)
    }
}
