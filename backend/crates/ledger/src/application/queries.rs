//! Read-only use cases
//!
//! Reads are idempotent, so transient store failures are retried under
//! [`LedgerConfig::read_retry`].

use std::sync::Arc;

use kernel::retry::retry_idempotent;

use crate::application::config::LedgerConfig;
use crate::domain::entities::{LedgerUser, WithdrawRequest};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::Page;
use crate::error::{LedgerError, LedgerResult};

/// List withdrawals, newest first
pub struct ListWithdrawalsUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
}

impl<R> ListWithdrawalsUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, page: Page) -> LedgerResult<Vec<WithdrawRequest>> {
        retry_idempotent(self.config.read_retry, LedgerError::is_transient, || {
            self.config.bounded(self.repo.list_withdrawals(page))
        })
        .await
    }
}

/// List users, newest first
pub struct ListUsersUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
}

impl<R> ListUsersUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self) -> LedgerResult<Vec<LedgerUser>> {
        retry_idempotent(self.config.read_retry, LedgerError::is_transient, || {
            self.config.bounded(self.repo.list_users())
        })
        .await
    }
}
