//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (LedgerUser, WithdrawRequest)
//! - Domain value objects (PayoutDetails, Page)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
