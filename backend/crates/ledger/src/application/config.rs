//! Application Configuration
//!
//! Configuration for the ledger application layer.

use std::future::Future;
use std::time::Duration;

use kernel::retry::RetryPolicy;

use crate::error::{LedgerError, LedgerResult};

/// Ledger application configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Upper bound for a single store call
    pub store_timeout: Duration,
    /// Retry policy for read-only queries
    pub read_retry: RetryPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_millis(5000),
            read_retry: RetryPolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// Run a store call under [`LedgerConfig::store_timeout`].
    ///
    /// An expired call drops its future, which rolls back any open
    /// transaction.
    pub async fn bounded<T, F>(&self, op: F) -> LedgerResult<T>
    where
        F: Future<Output = LedgerResult<T>>,
    {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| LedgerError::StorageTimeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_times_out() {
        let config = LedgerConfig {
            store_timeout: Duration::from_millis(5),
            ..Default::default()
        };

        let result: LedgerResult<()> = config
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(LedgerError::StorageTimeout)));
    }

    #[tokio::test]
    async fn test_bounded_passes_through() {
        let config = LedgerConfig::default();
        let result = config.bounded(async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
