//! Authenticated principal
//!
//! What the session provider attaches to a request. Domain crates only ever
//! see this type, never the token or the session row behind it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{SessionId, UserId};

/// Role carried by a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Database / wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Unknown codes fall back to the least privileged role
    pub fn from_code(code: &str) -> Self {
        match code {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::from_code("admin"), Role::Admin);
        assert_eq!(Role::from_code("user"), Role::User);
        assert_eq!(Role::from_code("root"), Role::User);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
