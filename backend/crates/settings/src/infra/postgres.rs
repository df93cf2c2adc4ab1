//! PostgreSQL Repository Implementations
//!
//! Singleton tables carry a fixed `singleton = 1` primary key so every
//! write is a single `INSERT ... ON CONFLICT (singleton) DO UPDATE`.

use chrono::{DateTime, Utc};
use kernel::id::{PriceQuoteId, SettingId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{BankDetails, CryptoDetails, PriceQuote, QrImage};
use crate::domain::repository::{DetailsRepository, PriceRepository, QrImageRepository};
use crate::error::SettingsResult;

/// PostgreSQL-backed settings repository
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Details Repository Implementation
// ============================================================================

impl DetailsRepository for PgSettingsRepository {
    async fn get_bank_details(&self) -> SettingsResult<Option<BankDetails>> {
        let row = sqlx::query_as::<_, BankDetailsRow>(
            r#"
            SELECT bank_name, account_name, account_no, ifsc_code, updated_at
            FROM bank_details
            WHERE singleton = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BankDetailsRow::into_details))
    }

    async fn upsert_bank_details(&self, details: &BankDetails) -> SettingsResult<BankDetails> {
        let row = sqlx::query_as::<_, BankDetailsRow>(
            r#"
            INSERT INTO bank_details (
                singleton,
                bank_name,
                account_name,
                account_no,
                ifsc_code,
                updated_at
            ) VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (singleton) DO UPDATE SET
                bank_name = EXCLUDED.bank_name,
                account_name = EXCLUDED.account_name,
                account_no = EXCLUDED.account_no,
                ifsc_code = EXCLUDED.ifsc_code,
                updated_at = EXCLUDED.updated_at
            RETURNING bank_name, account_name, account_no, ifsc_code, updated_at
            "#,
        )
        .bind(&details.bank_name)
        .bind(&details.account_name)
        .bind(&details.account_no)
        .bind(&details.ifsc_code)
        .bind(details.updated_at.unwrap_or_else(Utc::now))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_details())
    }

    async fn get_crypto_details(&self) -> SettingsResult<Option<CryptoDetails>> {
        let row = sqlx::query_as::<_, CryptoDetailsRow>(
            r#"
            SELECT wallet_address, currency_name, updated_at
            FROM crypto_details
            WHERE singleton = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CryptoDetailsRow::into_details))
    }

    async fn upsert_crypto_details(
        &self,
        details: &CryptoDetails,
    ) -> SettingsResult<CryptoDetails> {
        let row = sqlx::query_as::<_, CryptoDetailsRow>(
            r#"
            INSERT INTO crypto_details (
                singleton,
                wallet_address,
                currency_name,
                updated_at
            ) VALUES (1, $1, $2, $3)
            ON CONFLICT (singleton) DO UPDATE SET
                wallet_address = EXCLUDED.wallet_address,
                currency_name = EXCLUDED.currency_name,
                updated_at = EXCLUDED.updated_at
            RETURNING wallet_address, currency_name, updated_at
            "#,
        )
        .bind(&details.wallet_address)
        .bind(&details.currency_name)
        .bind(details.updated_at.unwrap_or_else(Utc::now))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_details())
    }
}

// ============================================================================
// Price Repository Implementation
// ============================================================================

impl PriceRepository for PgSettingsRepository {
    async fn latest_price(&self) -> SettingsResult<Option<PriceQuote>> {
        let row = sqlx::query_as::<_, PriceQuoteRow>(
            "SELECT id, price, created_at FROM price_quotes ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PriceQuoteRow::into_quote))
    }

    async fn record_price(&self, quote: &PriceQuote) -> SettingsResult<PriceQuote> {
        // created_at はDB側の clock_timestamp() に任せる
        let row = sqlx::query_as::<_, PriceQuoteRow>(
            "INSERT INTO price_quotes (id, price) VALUES ($1, $2) RETURNING id, price, created_at",
        )
        .bind(quote.id.as_uuid())
        .bind(quote.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_quote())
    }
}

// ============================================================================
// QR Image Repository Implementation
// ============================================================================

const QR_COLUMNS: &str = "id, filename, filepath, mimetype, size, created_at";

impl QrImageRepository for PgSettingsRepository {
    async fn get_qr_image(&self) -> SettingsResult<Option<QrImage>> {
        let sql = format!("SELECT {QR_COLUMNS} FROM qr_images WHERE singleton = 1");
        let row = sqlx::query_as::<_, QrImageRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(QrImageRow::into_image))
    }

    async fn replace_qr_image(&self, image: &QrImage) -> SettingsResult<Option<QrImage>> {
        let mut tx = self.pool.begin().await?;

        // 行ロックで並行する置き換えを直列化する
        let sql = format!("SELECT {QR_COLUMNS} FROM qr_images WHERE singleton = 1 FOR UPDATE");
        let previous = sqlx::query_as::<_, QrImageRow>(&sql)
            .fetch_optional(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO qr_images (
                singleton,
                id,
                filename,
                filepath,
                mimetype,
                size,
                created_at
            ) VALUES (1, $1, $2, $3, $4, $5, $6)
            ON CONFLICT (singleton) DO UPDATE SET
                id = EXCLUDED.id,
                filename = EXCLUDED.filename,
                filepath = EXCLUDED.filepath,
                mimetype = EXCLUDED.mimetype,
                size = EXCLUDED.size,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(image.id.as_uuid())
        .bind(&image.filename)
        .bind(&image.filepath)
        .bind(&image.mimetype)
        .bind(image.size)
        .bind(image.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(previous.map(QrImageRow::into_image))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct BankDetailsRow {
    bank_name: String,
    account_name: String,
    account_no: String,
    ifsc_code: String,
    updated_at: DateTime<Utc>,
}

impl BankDetailsRow {
    fn into_details(self) -> BankDetails {
        BankDetails {
            bank_name: self.bank_name,
            account_name: self.account_name,
            account_no: self.account_no,
            ifsc_code: self.ifsc_code,
            updated_at: Some(self.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CryptoDetailsRow {
    wallet_address: String,
    currency_name: String,
    updated_at: DateTime<Utc>,
}

impl CryptoDetailsRow {
    fn into_details(self) -> CryptoDetails {
        CryptoDetails {
            wallet_address: self.wallet_address,
            currency_name: self.currency_name,
            updated_at: Some(self.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PriceQuoteRow {
    id: Uuid,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl PriceQuoteRow {
    fn into_quote(self) -> PriceQuote {
        PriceQuote {
            id: PriceQuoteId::from_uuid(self.id),
            price: self.price.normalize(),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QrImageRow {
    id: Uuid,
    filename: String,
    filepath: String,
    mimetype: String,
    size: i64,
    created_at: DateTime<Utc>,
}

impl QrImageRow {
    fn into_image(self) -> QrImage {
        QrImage {
            id: SettingId::from_uuid(self.id),
            filename: self.filename,
            filepath: self.filepath,
            mimetype: self.mimetype,
            size: self.size,
            created_at: self.created_at,
        }
    }
}
