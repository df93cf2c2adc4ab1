//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, session provider, config
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Email + password sign-up / sign-in (with phone number and referral code)
//! - Server-side sessions referenced by an HMAC-signed token, sent as an
//!   HTTP-only cookie or an `Authorization: Bearer` header
//! - [`SessionProvider`]: the interface other crates use to resolve the
//!   caller of a request into a [`kernel::principal::Principal`]
//! - Account deletion (password re-entry required)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Tokens verified in constant time before any database lookup
//! - Internal errors never leak detail to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_provider::{AuthSessionProvider, LocalSessionProvider, SessionProvider};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
