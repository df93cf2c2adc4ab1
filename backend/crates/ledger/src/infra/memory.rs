//! In-memory repository for development and testing.
//!
//! One lock guards the whole store, so a withdrawal's check, decrement and
//! insert happen as a unit just like the PostgreSQL transaction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use kernel::money::Money;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::domain::entities::{AppliedWithdrawal, LedgerUser, NewWithdrawal, WithdrawRequest};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::Page;
use crate::error::{LedgerError, LedgerResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, LedgerUser>,
    /// Insertion order (oldest first)
    withdrawals: Vec<WithdrawRequest>,
    price: Option<Decimal>,
}

/// In-memory ledger repository
#[derive(Clone, Default)]
pub struct InMemoryLedgerRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with a starting balance
    pub async fn insert_user(&self, user_id: UserId, name: &str, email: &str, balance: Money) {
        let now = Utc::now();
        self.state.lock().await.users.insert(
            user_id,
            LedgerUser {
                user_id,
                name: name.to_string(),
                email: email.to_string(),
                balance,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Record the current price quote
    pub async fn set_price(&self, price: Decimal) {
        self.state.lock().await.price = Some(price);
    }

    pub async fn balance_of(&self, user_id: &UserId) -> Option<Money> {
        self.state.lock().await.users.get(user_id).map(|u| u.balance)
    }

    pub async fn withdrawal_count(&self) -> usize {
        self.state.lock().await.withdrawals.len()
    }
}

impl LedgerRepository for InMemoryLedgerRepository {
    async fn apply_withdrawal(&self, request: &NewWithdrawal) -> LedgerResult<AppliedWithdrawal> {
        let mut state = self.state.lock().await;

        let price = state.price.ok_or(LedgerError::NoPriceData)?;
        let user = state
            .users
            .get_mut(&request.user_id)
            .ok_or(LedgerError::UserNotFound)?;

        user.debit(request.amount)?;
        let new_balance = user.balance;

        let withdrawal = WithdrawRequest::new(request.clone(), price);
        state.withdrawals.push(withdrawal.clone());

        Ok(AppliedWithdrawal {
            withdrawal,
            new_balance,
        })
    }

    async fn list_withdrawals(&self, page: Page) -> LedgerResult<Vec<WithdrawRequest>> {
        let state = self.state.lock().await;
        let newest_first: Vec<_> = state.withdrawals.iter().rev().cloned().collect();
        Ok(page.slice(&newest_first))
    }

    async fn list_users(&self) -> LedgerResult<Vec<LedgerUser>> {
        let state = self.state.lock().await;
        let mut users: Vec<_> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn set_balance(&self, user_id: &UserId, balance: Money) -> LedgerResult<LedgerUser> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or(LedgerError::UserNotFound)?;

        user.set_balance(balance);
        Ok(user.clone())
    }
}
