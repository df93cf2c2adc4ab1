//! Settings Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and file store traits
//! - `application/` - Use cases, config
//! - `infra/` - PostgreSQL, in-memory and upload-directory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Bank and crypto payout details (singletons, empty until first saved)
//! - Append-only price log; the current price is the newest quote
//! - QR image upload with write-new / commit / delete-old replacement

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SettingsConfig;
pub use error::{SettingsError, SettingsResult};
pub use infra::disk::DiskFileStore;
pub use infra::memory::InMemorySettingsRepository;
pub use infra::postgres::PgSettingsRepository;
pub use presentation::router::{settings_router, settings_router_generic};
