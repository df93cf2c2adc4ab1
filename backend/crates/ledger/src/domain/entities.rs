//! Domain Entities
//!
//! Core business entities for the ledger domain.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WithdrawalId};
use kernel::money::Money;
use rust_decimal::Decimal;

use crate::domain::value_objects::PayoutDetails;
use crate::error::{LedgerError, LedgerResult};

/// User as seen by the ledger: identity plus balance
#[derive(Debug, Clone)]
pub struct LedgerUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerUser {
    /// Decrement the balance, refusing to go negative
    pub fn debit(&mut self, amount: Money) -> LedgerResult<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Administrative overwrite
    pub fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
        self.updated_at = Utc::now();
    }
}

/// Validated withdrawal command, before the price snapshot is taken
#[derive(Debug, Clone)]
pub struct NewWithdrawal {
    pub user_id: UserId,
    pub amount: Money,
    pub payout: PayoutDetails,
}

/// Recorded withdrawal request (immutable)
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub id: WithdrawalId,
    pub user_id: UserId,
    pub amount: Money,
    /// Price quote current at request time; informational only
    pub price_at_request: Decimal,
    pub payout: PayoutDetails,
    pub created_at: DateTime<Utc>,
}

impl WithdrawRequest {
    pub fn new(request: NewWithdrawal, price_at_request: Decimal) -> Self {
        Self {
            id: WithdrawalId::new(),
            user_id: request.user_id,
            amount: request.amount,
            price_at_request,
            payout: request.payout,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of an applied withdrawal
#[derive(Debug, Clone)]
pub struct AppliedWithdrawal {
    pub withdrawal: WithdrawRequest,
    pub new_balance: Money,
}
