//! Domain Value Objects
//!
//! Validated input for the settings domain.

use chrono::{DateTime, Utc};
use kernel::id::SettingId;
use kernel::money::{ensure_integer_digits, ensure_scale, parse_decimal};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::entities::{BankDetails, CryptoDetails};
use crate::error::{SettingsError, SettingsResult};

/// Fractional digits a price may carry
pub const PRICE_SCALE: u32 = 8;

/// Integer digits that fit a `NUMERIC(20,8)` column
pub const PRICE_INTEGER_DIGITS: u32 = 12;

/// Validated price: a non-negative decimal with at most 8 fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// JSON number or numeric string
    pub fn from_json(value: &Value) -> SettingsResult<Self> {
        let price = parse_decimal(value)
            .and_then(|d| ensure_scale(d, PRICE_SCALE))
            .and_then(|d| ensure_integer_digits(d, PRICE_INTEGER_DIGITS))
            .map_err(|e| SettingsError::InvalidArgument(format!("Invalid price: {e}")))?;

        if price.is_sign_negative() && !price.is_zero() {
            return Err(SettingsError::InvalidArgument(
                "Invalid price: Value must not be negative".to_string(),
            ));
        }

        Ok(Self(price))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

fn required(field: &str, value: Option<&str>) -> SettingsResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SettingsError::InvalidArgument(format!("{field} is required")))
}

impl BankDetails {
    /// All four fields are required
    pub fn new(
        bank_name: Option<&str>,
        account_name: Option<&str>,
        account_no: Option<&str>,
        ifsc_code: Option<&str>,
    ) -> SettingsResult<Self> {
        Ok(Self {
            bank_name: required("bankName", bank_name)?,
            account_name: required("accountName", account_name)?,
            account_no: required("accountNo", account_no)?,
            ifsc_code: required("ifscCode", ifsc_code)?,
            updated_at: Some(Utc::now()),
        })
    }
}

impl CryptoDetails {
    pub fn new(wallet_address: Option<&str>, currency_name: Option<&str>) -> SettingsResult<Self> {
        Ok(Self {
            wallet_address: required("walletAddress", wallet_address)?,
            currency_name: required("currencyName", currency_name)?,
            updated_at: Some(Utc::now()),
        })
    }
}

/// Uploaded QR image, before it is written anywhere
#[derive(Debug, Clone)]
pub struct QrUpload {
    pub bytes: Vec<u8>,
    pub original_name: Option<String>,
    pub mime_type: String,
}

impl QrUpload {
    pub fn new(
        bytes: Vec<u8>,
        original_name: Option<String>,
        mime_type: Option<String>,
        max_bytes: usize,
    ) -> SettingsResult<Self> {
        if bytes.is_empty() {
            return Err(SettingsError::InvalidArgument(
                "Uploaded file is empty".to_string(),
            ));
        }
        if bytes.len() > max_bytes {
            return Err(SettingsError::InvalidArgument(format!(
                "File too large (max {max_bytes} bytes)"
            )));
        }

        let mime_type = mime_type
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !mime_type.starts_with("image/") {
            return Err(SettingsError::InvalidArgument(
                "Only image files are allowed".to_string(),
            ));
        }
        // Uploads are served from our own origin; SVG can carry script
        if mime_type == "image/svg+xml" {
            return Err(SettingsError::InvalidArgument(
                "SVG images are not allowed".to_string(),
            ));
        }

        Ok(Self {
            bytes,
            original_name,
            mime_type,
        })
    }

    /// Extension from the original name when it is a raster image
    /// extension, else from the MIME type
    pub fn extension(&self) -> String {
        self.original_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| RASTER_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or_else(|| extension_for_mime(&self.mime_type).to_string())
    }

    /// `qr-code-<version>.<ext>`
    ///
    /// The version is the upload time plus a short random suffix, so two
    /// uploads never share a filename.
    pub fn filename(&self, id: &SettingId, at: DateTime<Utc>) -> String {
        let suffix: String = id.as_uuid().simple().to_string().chars().take(8).collect();
        format!(
            "qr-code-{}-{}.{}",
            at.timestamp_millis(),
            suffix,
            self.extension()
        )
    }
}

/// Extensions `/uploads` may serve under an image content type
const RASTER_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        _ => "img",
    }
}
