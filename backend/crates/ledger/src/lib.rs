//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, config
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Withdrawal requests: validated up front, then balance decrement and
//!   withdrawal record applied as one atomic unit
//! - Current price snapshotted into each withdrawal
//! - Administrative balance override (admin principal only)
//! - Newest-first listings of users and withdrawals
//!
//! Callers are resolved through [`auth::SessionProvider`]; this crate never
//! sees tokens or cookies.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use infra::memory::InMemoryLedgerRepository;
pub use infra::postgres::PgLedgerRepository;
pub use presentation::router::{ledger_router, ledger_router_generic};
