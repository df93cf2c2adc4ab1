//! Application Configuration
//!
//! Configuration for the settings application layer.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use kernel::retry::RetryPolicy;

use crate::error::{SettingsError, SettingsResult};

/// Settings application configuration
#[derive(Debug, Clone)]
pub struct SettingsConfig {
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under
    pub public_prefix: String,
    /// Largest accepted upload
    pub max_upload_bytes: usize,
    /// Upper bound for a single store call
    pub store_timeout: Duration,
    /// Retry policy for read-only queries
    pub read_retry: RetryPolicy,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            store_timeout: Duration::from_millis(5000),
            read_retry: RetryPolicy::default(),
        }
    }
}

impl SettingsConfig {
    /// Public path of an uploaded file
    pub fn public_path(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename)
    }

    /// Run a store call under [`SettingsConfig::store_timeout`]
    pub async fn bounded<T, F>(&self, op: F) -> SettingsResult<T>
    where
        F: Future<Output = SettingsResult<T>>,
    {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| SettingsError::StorageTimeout)?
    }
}
