//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{BankDetails, CryptoDetails, PriceQuote, QrImage};
use crate::error::SettingsResult;

/// Payout details repository trait (bank and crypto singletons)
#[trait_variant::make(DetailsRepository: Send)]
pub trait LocalDetailsRepository {
    async fn get_bank_details(&self) -> SettingsResult<Option<BankDetails>>;

    /// Atomic upsert of the single row
    async fn upsert_bank_details(&self, details: &BankDetails) -> SettingsResult<BankDetails>;

    async fn get_crypto_details(&self) -> SettingsResult<Option<CryptoDetails>>;

    /// Atomic upsert of the single row
    async fn upsert_crypto_details(&self, details: &CryptoDetails)
    -> SettingsResult<CryptoDetails>;
}

/// Price history repository trait (append-only)
#[trait_variant::make(PriceRepository: Send)]
pub trait LocalPriceRepository {
    /// Most recently created quote
    async fn latest_price(&self) -> SettingsResult<Option<PriceQuote>>;

    /// Append a quote; the returned copy carries the store's timestamp
    async fn record_price(&self, quote: &PriceQuote) -> SettingsResult<PriceQuote>;
}

/// QR image metadata repository trait (singleton)
#[trait_variant::make(QrImageRepository: Send)]
pub trait LocalQrImageRepository {
    async fn get_qr_image(&self) -> SettingsResult<Option<QrImage>>;

    /// Replace the single record and return the one it replaced
    async fn replace_qr_image(&self, image: &QrImage) -> SettingsResult<Option<QrImage>>;
}

/// Byte storage for uploaded files, keyed by filename
#[trait_variant::make(FileStore: Send)]
pub trait LocalFileStore {
    /// Write the whole file or nothing
    async fn write(&self, filename: &str, bytes: &[u8]) -> SettingsResult<()>;

    /// Remove a file; a missing file is not an error
    async fn remove(&self, filename: &str) -> SettingsResult<()>;

    async fn exists(&self, filename: &str) -> SettingsResult<bool>;
}
