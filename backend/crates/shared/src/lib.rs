//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth`, `ledger` and `settings` crates:
//! - Unified error type, error kinds and result aliases
//! - Typed entity IDs
//! - Fixed-point money
//! - The authenticated principal handed out by the session provider
//! - Bounded retry for idempotent reads
//!
//! Only things whose meaning is identical in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod money;
pub mod principal;
pub mod retry;
