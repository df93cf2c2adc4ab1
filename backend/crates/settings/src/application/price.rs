//! Price Use Case

use std::sync::Arc;

use kernel::retry::retry_idempotent;
use rust_decimal::Decimal;

use crate::application::config::SettingsConfig;
use crate::domain::entities::PriceQuote;
use crate::domain::repository::PriceRepository;
use crate::domain::value_objects::Price;
use crate::error::{SettingsError, SettingsResult};

pub struct PriceUseCase<R>
where
    R: PriceRepository,
{
    repo: Arc<R>,
    config: Arc<SettingsConfig>,
}

impl<R> PriceUseCase<R>
where
    R: PriceRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<SettingsConfig>) -> Self {
        Self { repo, config }
    }

    /// 見積もりが無ければ 0
    pub async fn current(&self) -> SettingsResult<Decimal> {
        let quote = retry_idempotent(self.config.read_retry, SettingsError::is_transient, || {
            self.config.bounded(self.repo.latest_price())
        })
        .await?;

        Ok(quote.map(|q| q.price).unwrap_or(Decimal::ZERO))
    }

    /// Append a new quote; history is never rewritten
    pub async fn record(&self, price: Price) -> SettingsResult<PriceQuote> {
        let quote = self
            .config
            .bounded(self.repo.record_price(&PriceQuote::new(price.value())))
            .await?;

        tracing::info!(quote_id = %quote.id, price = %quote.price, "Price recorded");

        Ok(quote)
    }
}
