//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{BankDetails, CryptoDetails, QrImage};

/// Request for PATCH /api/bank-details
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailsRequest {
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_no: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailsResponse {
    pub bank_name: String,
    pub account_name: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<BankDetails> for BankDetailsResponse {
    fn from(d: BankDetails) -> Self {
        Self {
            bank_name: d.bank_name,
            account_name: d.account_name,
            account_no: d.account_no,
            ifsc_code: d.ifsc_code,
            updated_at: d.updated_at,
        }
    }
}

/// Request for PATCH /api/crypto-details
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoDetailsRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub currency_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoDetailsResponse {
    pub wallet_address: String,
    pub currency_name: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CryptoDetails> for CryptoDetailsResponse {
    fn from(d: CryptoDetails) -> Self {
        Self {
            wallet_address: d.wallet_address,
            currency_name: d.currency_name,
            updated_at: d.updated_at,
        }
    }
}

/// Request for PATCH /api/price
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRequest {
    /// JSON number or numeric string
    #[serde(default)]
    pub price: Option<Value>,
}

/// Response for GET/PATCH /api/price
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Stored QR image metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrImageMetadata {
    pub id: Uuid,
    pub filename: String,
    pub filepath: String,
    pub mimetype: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl From<QrImage> for QrImageMetadata {
    fn from(image: QrImage) -> Self {
        Self {
            id: image.id.into_uuid(),
            filename: image.filename,
            filepath: image.filepath,
            mimetype: image.mimetype,
            size: image.size,
            created_at: image.created_at,
        }
    }
}

/// Response for GET /api/qr-image
#[derive(Debug, Clone, Serialize)]
pub struct QrImageResponse {
    pub exists: bool,
    #[serde(flatten)]
    pub image: Option<QrImageMetadata>,
}
