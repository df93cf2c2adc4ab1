//! Request Withdrawal Use Case

use std::sync::Arc;

use kernel::money::Money;
use kernel::principal::Principal;
use serde_json::Value;

use crate::application::config::LedgerConfig;
use crate::domain::entities::{NewWithdrawal, WithdrawRequest};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::PayoutDetails;
use crate::error::{LedgerError, LedgerResult};

/// Input DTO for request withdrawal
#[derive(Debug, Clone, Default)]
pub struct RequestWithdrawalInput {
    /// JSON number or numeric string
    pub amount: Option<Value>,
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_no: Option<String>,
    pub ifsc_code: Option<String>,
}

/// Request Withdrawal Use Case
pub struct RequestWithdrawalUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<LedgerConfig>,
}

impl<R> RequestWithdrawalUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LedgerConfig>) -> Self {
        Self { repo, config }
    }

    /// 検証はすべて変更の前に行う。書き込みはリトライしない。
    pub async fn execute(
        &self,
        principal: Option<&Principal>,
        input: RequestWithdrawalInput,
    ) -> LedgerResult<WithdrawRequest> {
        let principal = principal.ok_or(LedgerError::Unauthenticated)?;

        let amount = input
            .amount
            .as_ref()
            .ok_or_else(|| LedgerError::InvalidArgument("amount is required".to_string()))
            .and_then(|value| {
                Money::from_json(value)
                    .and_then(Money::positive)
                    .map_err(|e| LedgerError::InvalidArgument(format!("Invalid amount: {e}")))
            })?;

        let payout = PayoutDetails::new(
            input.bank_name.as_deref(),
            input.account_name.as_deref(),
            input.account_no.as_deref(),
            input.ifsc_code.as_deref(),
        )?;

        let request = NewWithdrawal {
            user_id: principal.user_id,
            amount,
            payout,
        };

        let applied = self
            .config
            .bounded(self.repo.apply_withdrawal(&request))
            .await?;

        tracing::info!(
            withdrawal_id = %applied.withdrawal.id,
            user_id = %principal.user_id,
            amount = %amount,
            new_balance = %applied.new_balance,
            price_at_request = %applied.withdrawal.price_at_request,
            "Withdrawal recorded"
        );

        Ok(applied.withdrawal)
    }
}
