//! API DTOs (Data Transfer Objects)
//!
//! Decimals go over the wire as strings.

use chrono::{DateTime, Utc};
use kernel::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{LedgerUser, WithdrawRequest};

/// Request for POST /api/withdraws
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawRequest {
    /// JSON number or numeric string
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_no: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

/// Query for GET /api/withdraws
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListWithdrawsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Request for PATCH /api/users/{id}/balance
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBalanceRequest {
    #[serde(default)]
    pub balance: Option<Value>,
}

/// Withdrawal as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Money,
    pub price_at_request: Decimal,
    pub bank_name: String,
    pub account_name: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<WithdrawRequest> for WithdrawResponse {
    fn from(w: WithdrawRequest) -> Self {
        Self {
            id: w.id.into_uuid(),
            user_id: w.user_id.into_uuid(),
            amount: w.amount,
            price_at_request: w.price_at_request,
            bank_name: w.payout.bank_name,
            account_name: w.payout.account_name,
            account_no: w.payout.account_no,
            ifsc_code: w.payout.ifsc_code,
            created_at: w.created_at,
        }
    }
}

/// User row for GET /api/users
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LedgerUser> for UserResponse {
    fn from(u: LedgerUser) -> Self {
        Self {
            id: u.user_id.into_uuid(),
            name: u.name,
            email: u.email,
            balance: u.balance,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Trimmed user returned after a balance override
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub balance: Money,
}

impl From<LedgerUser> for BalanceResponse {
    fn from(u: LedgerUser) -> Self {
        Self {
            id: u.user_id.into_uuid(),
            name: u.name,
            email: u.email,
            balance: u.balance,
        }
    }
}
