//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod details;
pub mod price;
pub mod qr_image;

pub use config::SettingsConfig;
pub use details::PayoutDetailsUseCase;
pub use price::PriceUseCase;
pub use qr_image::{QrImageStatus, QrImageUseCase};
