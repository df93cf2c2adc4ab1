//! User Entity
//!
//! Profile side of a user row. The balance column on the same row belongs
//! to the ledger and is never read or written here.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::principal::Role;

use crate::domain::value_object::email::Email;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    /// Unique, lowercased
    pub email: Email,
    pub phone_number: Option<String>,
    pub referral_code: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(
        name: String,
        email: Email,
        phone_number: Option<String>,
        referral_code: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            phone_number,
            referral_code,
            role: Role::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
