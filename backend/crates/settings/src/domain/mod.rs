//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (BankDetails, CryptoDetails, PriceQuote, QrImage)
//! - Domain value objects (Price, QrUpload)
//! - Repository and file store traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
