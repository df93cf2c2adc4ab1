//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use kernel::principal::Role;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{auth_session::AuthSession, user::User};

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    /// 省略時は true
    #[serde(default)]
    pub remember_me: Option<bool>,
}

/// Delete user request
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub referral_code: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            phone_number: user.phone_number.clone(),
            referral_code: user.referral_code.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public view of a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: SessionId,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AuthSession> for SessionResponse {
    fn from(session: &AuthSession) -> Self {
        Self {
            id: session.session_id,
            user_id: session.user_id,
            expires_at: session.expires_at(),
            ip_address: session.client_ip.clone(),
            user_agent: session.user_agent.clone(),
            created_at: session.created_at,
            updated_at: session.last_activity_at,
        }
    }
}

/// Sign up / sign in response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Same value as the session cookie, for bearer use by native clients
    pub token: String,
    pub user: UserResponse,
}

/// `GET /get-session` response (`null` when signed out)
#[derive(Debug, Clone, Serialize)]
pub struct GetSessionResponse {
    pub session: SessionResponse,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
