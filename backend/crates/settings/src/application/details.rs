//! Payout Details Use Case
//!
//! Bank and crypto details are singletons: reads fall back to empty
//! defaults, writes are whole-record upserts.

use std::sync::Arc;

use kernel::retry::retry_idempotent;

use crate::application::config::SettingsConfig;
use crate::domain::entities::{BankDetails, CryptoDetails};
use crate::domain::repository::DetailsRepository;
use crate::error::{SettingsError, SettingsResult};

pub struct PayoutDetailsUseCase<R>
where
    R: DetailsRepository,
{
    repo: Arc<R>,
    config: Arc<SettingsConfig>,
}

impl<R> PayoutDetailsUseCase<R>
where
    R: DetailsRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<SettingsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn get_bank(&self) -> SettingsResult<BankDetails> {
        let details = retry_idempotent(self.config.read_retry, SettingsError::is_transient, || {
            self.config.bounded(self.repo.get_bank_details())
        })
        .await?;

        Ok(details.unwrap_or_default())
    }

    pub async fn update_bank(&self, details: BankDetails) -> SettingsResult<BankDetails> {
        let saved = self
            .config
            .bounded(self.repo.upsert_bank_details(&details))
            .await?;

        tracing::info!(bank_name = %saved.bank_name, "Bank details updated");

        Ok(saved)
    }

    pub async fn get_crypto(&self) -> SettingsResult<CryptoDetails> {
        let details = retry_idempotent(self.config.read_retry, SettingsError::is_transient, || {
            self.config.bounded(self.repo.get_crypto_details())
        })
        .await?;

        Ok(details.unwrap_or_default())
    }

    pub async fn update_crypto(&self, details: CryptoDetails) -> SettingsResult<CryptoDetails> {
        let saved = self
            .config
            .bounded(self.repo.upsert_crypto_details(&details))
            .await?;

        tracing::info!(currency = %saved.currency_name, "Crypto details updated");

        Ok(saved)
    }
}
