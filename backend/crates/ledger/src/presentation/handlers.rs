//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use auth::SessionProvider;
use kernel::principal::Principal;
use std::sync::Arc;

use crate::application::{
    LedgerConfig, ListUsersUseCase, ListWithdrawalsUseCase, RequestWithdrawalInput,
    RequestWithdrawalUseCase, SetUserBalanceUseCase,
};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::Page;
use crate::error::{LedgerError, LedgerResult};
use crate::presentation::dto::{
    BalanceResponse, CreateWithdrawRequest, ListWithdrawsQuery, UpdateBalanceRequest,
    UserResponse, WithdrawResponse,
};

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R, P>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub sessions: Arc<P>,
    pub config: Arc<LedgerConfig>,
}

/// GET /api/withdraws
pub async fn list_withdraws<R, P>(
    State(state): State<LedgerAppState<R, P>>,
    query: Result<Query<ListWithdrawsQuery>, QueryRejection>,
) -> LedgerResult<Json<Vec<WithdrawResponse>>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    let Query(query) =
        query.map_err(|rejection| LedgerError::InvalidArgument(rejection.body_text()))?;
    let page = Page::new(query.limit, query.offset)?;

    let use_case = ListWithdrawalsUseCase::new(state.repo.clone(), state.config.clone());
    let withdrawals = use_case.execute(page).await?;

    Ok(Json(
        withdrawals.into_iter().map(WithdrawResponse::from).collect(),
    ))
}

/// POST /api/withdraws
pub async fn create_withdraw<R, P>(
    State(state): State<LedgerAppState<R, P>>,
    headers: HeaderMap,
    payload: Result<Json<CreateWithdrawRequest>, JsonRejection>,
) -> LedgerResult<impl IntoResponse>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    let principal = current_principal(&state, &headers).await?;
    // 未認証なら body の検証より先に 401
    if principal.is_none() {
        return Err(LedgerError::Unauthenticated);
    }
    let Json(req) = payload.map_err(invalid_body)?;

    let input = RequestWithdrawalInput {
        amount: req.amount,
        bank_name: req.bank_name,
        account_name: req.account_name,
        account_no: req.account_no,
        ifsc_code: req.ifsc_code,
    };

    let use_case = RequestWithdrawalUseCase::new(state.repo.clone(), state.config.clone());
    let withdrawal = use_case.execute(principal.as_ref(), input).await?;

    Ok((StatusCode::CREATED, Json(WithdrawResponse::from(withdrawal))))
}

/// GET /api/users
pub async fn list_users<R, P>(
    State(state): State<LedgerAppState<R, P>>,
) -> LedgerResult<Json<Vec<UserResponse>>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    let use_case = ListUsersUseCase::new(state.repo.clone(), state.config.clone());
    let users = use_case.execute().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /api/users/{id}/balance
pub async fn update_balance<R, P>(
    State(state): State<LedgerAppState<R, P>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<UpdateBalanceRequest>, JsonRejection>,
) -> LedgerResult<Json<BalanceResponse>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    let principal = current_principal(&state, &headers).await?;
    let body = match payload {
        Ok(Json(body)) => Some(body),
        // 401/403 takes precedence over a malformed body
        Err(rejection) if principal.as_ref().is_some_and(Principal::is_admin) => {
            return Err(invalid_body(rejection));
        }
        Err(_) => None,
    };

    let use_case = SetUserBalanceUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(
            principal.as_ref(),
            &user_id,
            body.as_ref().and_then(|b| b.balance.as_ref()),
        )
        .await?;

    Ok(Json(BalanceResponse::from(user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn current_principal<R, P>(
    state: &LedgerAppState<R, P>,
    headers: &HeaderMap,
) -> LedgerResult<Option<Principal>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    Ok(state.sessions.get_session(headers).await?)
}

fn invalid_body(rejection: JsonRejection) -> LedgerError {
    LedgerError::InvalidArgument(rejection.body_text())
}
