//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use kernel::money::Money;

use crate::domain::entities::{AppliedWithdrawal, LedgerUser, NewWithdrawal, WithdrawRequest};
use crate::domain::value_objects::Page;
use crate::error::LedgerResult;

/// Ledger repository trait
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    /// Snapshot the current price, decrement the balance, and record the
    /// withdrawal as one atomic unit.
    ///
    /// Errors leave the store unchanged:
    /// - `NoPriceData` when no price quote exists
    /// - `UserNotFound` when the user row is gone
    /// - `InsufficientBalance` when balance < amount
    async fn apply_withdrawal(&self, request: &NewWithdrawal) -> LedgerResult<AppliedWithdrawal>;

    /// Withdrawals, newest first
    async fn list_withdrawals(&self, page: Page) -> LedgerResult<Vec<WithdrawRequest>>;

    /// Users, newest first
    async fn list_users(&self) -> LedgerResult<Vec<LedgerUser>>;

    /// Overwrite a balance; `UserNotFound` when absent
    async fn set_balance(&self, user_id: &UserId, balance: Money) -> LedgerResult<LedgerUser>;
}
