//! Auth Session Entity
//!
//! Server-side session referenced by a signed token.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};
use kernel::principal::{Principal, Role};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Email at session creation
    pub email: String,
    /// Role at session creation
    pub role: Role,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Whether "Remember Me" was checked
    pub remember_me: bool,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// Request-side metadata recorded on a new session
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL は呼び出し側 (config) から渡す。
    pub fn new(
        user_id: UserId,
        email: String,
        role: Role,
        remember_me: bool,
        client: ClientInfo,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            email,
            role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            client_ip: client.ip,
            user_agent: client.user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Slide the expiry of a "Remember Me" session forward once less than
    /// half of `ttl_long` remains.
    pub fn extend_if_needed(&mut self, ttl_long: Duration) {
        if !self.remember_me {
            return;
        }

        let now = Utc::now();
        if self.expires_at_ms < (now + ttl_long / 2).timestamp_millis() {
            self.expires_at_ms = (now + ttl_long).timestamp_millis();
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.expires_at_ms).unwrap_or_default()
    }

    /// Identity handed to other crates
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            session_id: self.session_id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}
