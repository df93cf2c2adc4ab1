//! PostgreSQL Repository Implementation
//!
//! Withdrawals run as one transaction: price snapshot, conditional
//! decrement, insert. The decrement is a single
//! `UPDATE ... WHERE balance >= amount`, so concurrent withdrawals for the
//! same user serialize on the row lock and can never both pass the check.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WithdrawalId};
use kernel::money::Money;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{AppliedWithdrawal, LedgerUser, NewWithdrawal, WithdrawRequest};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::{Page, PayoutDetails};
use crate::error::{LedgerError, LedgerResult};

/// PostgreSQL-backed ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "user_id, name, email, balance, created_at, updated_at";

const WITHDRAWAL_COLUMNS: &str = r#"
    id,
    user_id,
    amount,
    price_at_request,
    bank_name,
    account_name,
    account_no,
    ifsc_code,
    created_at
"#;

impl LedgerRepository for PgLedgerRepository {
    async fn apply_withdrawal(&self, request: &NewWithdrawal) -> LedgerResult<AppliedWithdrawal> {
        // Dropped without commit => rolled back.
        let mut tx = self.pool.begin().await?;

        let price: Option<Decimal> = sqlx::query_scalar(
            "SELECT price FROM price_quotes ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;
        let price = price.ok_or(LedgerError::NoPriceData)?.normalize();

        let withdrawal = WithdrawRequest::new(request.clone(), price);

        let new_balance: Option<Decimal> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET balance = balance - $2,
                updated_at = $3
            WHERE user_id = $1
              AND balance >= $2
            RETURNING balance
            "#,
        )
        .bind(request.user_id.as_uuid())
        .bind(request.amount.amount())
        .bind(withdrawal.created_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(new_balance) = new_balance else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                    .bind(request.user_id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await?;

            return Err(if exists {
                LedgerError::InsufficientBalance
            } else {
                LedgerError::UserNotFound
            });
        };

        sqlx::query(
            r#"
            INSERT INTO withdraw_requests (
                id,
                user_id,
                amount,
                price_at_request,
                bank_name,
                account_name,
                account_no,
                ifsc_code,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(withdrawal.id.as_uuid())
        .bind(withdrawal.user_id.as_uuid())
        .bind(withdrawal.amount.amount())
        .bind(withdrawal.price_at_request)
        .bind(&withdrawal.payout.bank_name)
        .bind(&withdrawal.payout.account_name)
        .bind(&withdrawal.payout.account_no)
        .bind(&withdrawal.payout.ifsc_code)
        .bind(withdrawal.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AppliedWithdrawal {
            withdrawal,
            new_balance: Money::from_db(new_balance),
        })
    }

    async fn list_withdrawals(&self, page: Page) -> LedgerResult<Vec<WithdrawRequest>> {
        // LIMIT NULL は無制限
        let sql = format!(
            "SELECT {WITHDRAWAL_COLUMNS} FROM withdraw_requests \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, WithdrawRequestRow>(&sql)
            .bind(page.limit.map(i64::from))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(WithdrawRequestRow::into_withdrawal).collect())
    }

    async fn list_users(&self) -> LedgerResult<Vec<LedgerUser>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, LedgerUserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(LedgerUserRow::into_user).collect())
    }

    async fn set_balance(&self, user_id: &UserId, balance: Money) -> LedgerResult<LedgerUser> {
        let sql = format!(
            "UPDATE users SET balance = $2, updated_at = $3 WHERE user_id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, LedgerUserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(balance.amount())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        row.map(LedgerUserRow::into_user)
            .ok_or(LedgerError::UserNotFound)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct LedgerUserRow {
    user_id: Uuid,
    name: String,
    email: String,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LedgerUserRow {
    fn into_user(self) -> LedgerUser {
        LedgerUser {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: self.email,
            balance: Money::from_db(self.balance),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawRequestRow {
    id: Uuid,
    user_id: Uuid,
    amount: Decimal,
    price_at_request: Decimal,
    bank_name: String,
    account_name: String,
    account_no: String,
    ifsc_code: String,
    created_at: DateTime<Utc>,
}

impl WithdrawRequestRow {
    fn into_withdrawal(self) -> WithdrawRequest {
        WithdrawRequest {
            id: WithdrawalId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            amount: Money::from_db(self.amount),
            price_at_request: self.price_at_request.normalize(),
            payout: PayoutDetails {
                bank_name: self.bank_name,
                account_name: self.account_name,
                account_no: self.account_no,
                ifsc_code: self.ifsc_code,
            },
            created_at: self.created_at,
        }
    }
}
