//! Domain Entities
//!
//! Singleton records (payout details, QR image) and the append-only price
//! log.

use chrono::{DateTime, Utc};
use kernel::id::{PriceQuoteId, SettingId};
use rust_decimal::Decimal;

/// Bank payout details. Empty strings until first saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Crypto payout details. Empty strings until first saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptoDetails {
    pub wallet_address: String,
    pub currency_name: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of the price history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub id: PriceQuoteId,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(price: Decimal) -> Self {
        Self {
            id: PriceQuoteId::new(),
            price,
            created_at: Utc::now(),
        }
    }
}

/// Metadata of the stored QR image; the bytes live in the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub id: SettingId,
    pub filename: String,
    /// Public path the file is served under
    pub filepath: String,
    pub mimetype: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}
