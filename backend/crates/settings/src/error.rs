//! Settings Error Types
//!
//! Settings-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::money::MoneyError;
use thiserror::Error;

/// Settings-specific result type alias
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings-specific error variants
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Malformed or missing input
    #[error("{0}")]
    InvalidArgument(String),

    /// Store call exceeded the configured timeout
    #[error("Storage operation timed out")]
    StorageTimeout,

    /// Upload directory I/O failure
    #[error("File store error: {0}")]
    FileStore(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SettingsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettingsError::InvalidArgument(_) => ErrorKind::BadRequest,
            SettingsError::StorageTimeout
            | SettingsError::FileStore(_)
            | SettingsError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            SettingsError::InvalidArgument(msg) => AppError::bad_request(msg.clone()),
            _ => AppError::internal("Internal server error"),
        }
    }

    /// Transient storage failures worth retrying on idempotent reads
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SettingsError::StorageTimeout
                | SettingsError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
        )
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SettingsError::Database(e) => {
                tracing::error!(error = %e, "Settings database error");
            }
            SettingsError::FileStore(e) => {
                tracing::error!(error = %e, "Upload directory error");
            }
            SettingsError::StorageTimeout => {
                tracing::error!("Settings storage operation timed out");
            }
            SettingsError::InvalidArgument(msg) => {
                tracing::debug!(error = %msg, "Invalid settings input");
            }
        }
    }
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<MoneyError> for SettingsError {
    fn from(err: MoneyError) -> Self {
        SettingsError::InvalidArgument(err.to_string())
    }
}
