//! Set User Balance Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::money::Money;
use kernel::principal::Principal;
use serde_json::Value;

use crate::application::config::LedgerConfig;
use crate::domain::entities::LedgerUser;
use crate::domain::repository::LedgerRepository;
use crate::error::{LedgerError, LedgerResult};

/// Administrative balance override
pub struct SetUserBalanceUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
}

impl<R> SetUserBalanceUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        principal: Option<&Principal>,
        user_id: &str,
        balance: Option<&Value>,
    ) -> LedgerResult<LedgerUser> {
        let principal = principal.ok_or(LedgerError::Unauthenticated)?;
        if !principal.is_admin() {
            tracing::warn!(
                user_id = %principal.user_id,
                "Balance override attempted by non-admin"
            );
            return Err(LedgerError::Forbidden);
        }

        let target: UserId = user_id
            .parse()
            .map_err(|_| LedgerError::InvalidArgument("Invalid user id".to_string()))?;

        let balance = balance
            .ok_or_else(|| LedgerError::InvalidArgument("balance is required".to_string()))
            .and_then(|value| {
                Money::from_json(value)
                    .and_then(Money::non_negative)
                    .map_err(|e| LedgerError::InvalidArgument(format!("Invalid balance: {e}")))
            })?;

        let user = self
            .config
            .bounded(self.repo.set_balance(&target, balance))
            .await?;

        tracing::info!(
            admin_id = %principal.user_id,
            user_id = %target,
            balance = %balance,
            "User balance overridden"
        );

        Ok(user)
    }
}
