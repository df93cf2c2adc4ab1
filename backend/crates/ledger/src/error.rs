//! Ledger Error Types
//!
//! Ledger-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::money::MoneyError;
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No authenticated principal
    #[error("Unauthorized")]
    Unauthenticated,

    /// Authenticated but not allowed
    #[error("Forbidden")]
    Forbidden,

    /// Malformed or out-of-range input
    #[error("{0}")]
    InvalidArgument(String),

    /// Balance lower than the requested amount
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Target user does not exist
    #[error("User not found")]
    UserNotFound,

    /// No price quote recorded yet
    #[error("No price data available")]
    NoPriceData,

    /// Store call exceeded the configured timeout
    #[error("Storage operation timed out")]
    StorageTimeout,

    /// Session lookup failed (not the same as "no session")
    #[error("Session lookup failed: {0}")]
    Session(#[from] auth::AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LedgerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Unauthenticated => ErrorKind::Unauthorized,
            LedgerError::Forbidden => ErrorKind::Forbidden,
            LedgerError::InvalidArgument(_) | LedgerError::InsufficientBalance => {
                ErrorKind::BadRequest
            }
            LedgerError::UserNotFound => ErrorKind::NotFound,
            // Clients of the withdraw endpoint expect 500 for a missing price.
            LedgerError::NoPriceData => ErrorKind::InternalServerError,
            LedgerError::StorageTimeout | LedgerError::Session(_) | LedgerError::Database(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// ストレージ由来のエラーは詳細を隠し、汎用メッセージにする。
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::StorageTimeout | LedgerError::Session(_) | LedgerError::Database(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Transient storage failures worth retrying on idempotent reads
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LedgerError::StorageTimeout
                | LedgerError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
        )
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "Ledger database error");
            }
            LedgerError::Session(e) => {
                tracing::error!(error = %e, "Ledger session lookup failed");
            }
            LedgerError::StorageTimeout => {
                tracing::error!("Ledger storage operation timed out");
            }
            LedgerError::NoPriceData => {
                tracing::warn!("Withdrawal rejected: no price data");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        LedgerError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(LedgerError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(LedgerError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            LedgerError::InsufficientBalance.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(LedgerError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            LedgerError::NoPriceData.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_detail_hidden() {
        let app = LedgerError::Database(sqlx::Error::PoolTimedOut).to_app_error();
        assert_eq!(app.message(), "Internal server error");

        let app = LedgerError::NoPriceData.to_app_error();
        assert_eq!(app.message(), "No price data available");
    }

    #[test]
    fn test_transient_classification() {
        assert!(LedgerError::StorageTimeout.is_transient());
        assert!(LedgerError::Database(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!LedgerError::Database(sqlx::Error::RowNotFound).is_transient());
        assert!(!LedgerError::InsufficientBalance.is_transient());
    }
}
