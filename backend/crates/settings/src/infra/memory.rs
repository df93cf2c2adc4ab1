//! In-memory repository for development and testing.
//! Not suitable for production use.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::domain::entities::{BankDetails, CryptoDetails, PriceQuote, QrImage};
use crate::domain::repository::{DetailsRepository, PriceRepository, QrImageRepository};
use crate::error::{SettingsError, SettingsResult};

#[derive(Default)]
struct State {
    bank: Option<BankDetails>,
    crypto: Option<CryptoDetails>,
    /// Append-only, oldest first
    prices: Vec<PriceQuote>,
    qr_image: Option<QrImage>,
}

/// In-memory settings repository
#[derive(Clone, Default)]
pub struct InMemorySettingsRepository {
    state: Arc<Mutex<State>>,
    fail_qr_commit: Arc<AtomicBool>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next QR record replacement fail (simulates a failed commit)
    pub fn fail_next_qr_commit(&self) {
        self.fail_qr_commit.store(true, Ordering::SeqCst);
    }

    pub async fn price_count(&self) -> usize {
        self.state.lock().await.prices.len()
    }
}

impl DetailsRepository for InMemorySettingsRepository {
    async fn get_bank_details(&self) -> SettingsResult<Option<BankDetails>> {
        Ok(self.state.lock().await.bank.clone())
    }

    async fn upsert_bank_details(&self, details: &BankDetails) -> SettingsResult<BankDetails> {
        self.state.lock().await.bank = Some(details.clone());
        Ok(details.clone())
    }

    async fn get_crypto_details(&self) -> SettingsResult<Option<CryptoDetails>> {
        Ok(self.state.lock().await.crypto.clone())
    }

    async fn upsert_crypto_details(
        &self,
        details: &CryptoDetails,
    ) -> SettingsResult<CryptoDetails> {
        self.state.lock().await.crypto = Some(details.clone());
        Ok(details.clone())
    }
}

impl PriceRepository for InMemorySettingsRepository {
    async fn latest_price(&self) -> SettingsResult<Option<PriceQuote>> {
        Ok(self.state.lock().await.prices.last().cloned())
    }

    async fn record_price(&self, quote: &PriceQuote) -> SettingsResult<PriceQuote> {
        self.state.lock().await.prices.push(quote.clone());
        Ok(quote.clone())
    }
}

impl QrImageRepository for InMemorySettingsRepository {
    async fn get_qr_image(&self) -> SettingsResult<Option<QrImage>> {
        Ok(self.state.lock().await.qr_image.clone())
    }

    async fn replace_qr_image(&self, image: &QrImage) -> SettingsResult<Option<QrImage>> {
        if self.fail_qr_commit.swap(false, Ordering::SeqCst) {
            return Err(SettingsError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.state.lock().await.qr_image.replace(image.clone()))
    }
}
