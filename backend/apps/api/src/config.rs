//! Process configuration
//!
//! Everything is read once at startup from the environment (after
//! `.env` is loaded) and handed to each crate as its own config struct.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use kernel::retry::RetryPolicy;
use ledger::LedgerConfig;
use settings::SettingsConfig;

/// `NODE_ENV` value that switches off development behaviour
const PRODUCTION: &str = "PRODUCTION";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub node_env: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub store_timeout: Duration,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub frontend_origins: Vec<String>,
    /// `None` outside production means "generate one per process"
    pub session_secret: Option<[u8; 32]>,
    pub password_pepper: Option<Vec<u8>>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let node_env = get("NODE_ENV").unwrap_or_else(|| "development".to_string());
        let is_production = node_env == PRODUCTION;

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => Some(decode_secret(&encoded)?),
            None if is_production => bail!("SESSION_SECRET must be set in production"),
            None => None,
        };

        Ok(Self {
            port: parse_or(&get, "PORT", 3000)?,
            node_env,
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            store_timeout: Duration::from_millis(parse_or(&get, "STORE_TIMEOUT_MS", 5000)?),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            frontend_origins: get("FRONTEND_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8081".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            session_secret,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
        })
    }

    pub fn is_production(&self) -> bool {
        self.node_env == PRODUCTION
    }

    pub fn auth_config(&self) -> AuthConfig {
        let base = if self.is_production() {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };

        AuthConfig {
            session_secret: self.session_secret.unwrap_or(base.session_secret),
            password_pepper: self.password_pepper.clone(),
            ..base
        }
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            store_timeout: self.store_timeout,
            read_retry: RetryPolicy::default(),
        }
    }

    pub fn settings_config(&self) -> SettingsConfig {
        SettingsConfig {
            upload_dir: self.upload_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
            store_timeout: self.store_timeout,
            ..SettingsConfig::default()
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid value: {value}")),
        None => Ok(default),
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_SECRET must be base64")?;

    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must be 32 bytes, got {}", bytes.len()))
}
