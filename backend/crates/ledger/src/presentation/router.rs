//! Ledger Router

use auth::SessionProvider;
use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

use crate::application::config::LedgerConfig;
use crate::domain::repository::LedgerRepository;
use crate::infra::postgres::PgLedgerRepository;
use crate::presentation::handlers::{self, LedgerAppState};

/// Create the ledger router with PostgreSQL repository
pub fn ledger_router<P>(repo: PgLedgerRepository, sessions: P, config: LedgerConfig) -> Router
where
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    ledger_router_generic(repo, sessions, config)
}

/// Create a generic ledger router for any repository / session provider
pub fn ledger_router_generic<R, P>(repo: R, sessions: P, config: LedgerConfig) -> Router
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
    P: SessionProvider + Clone + Send + Sync + 'static,
{
    let state = LedgerAppState {
        repo: Arc::new(repo),
        sessions: Arc::new(sessions),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/withdraws",
            get(handlers::list_withdraws::<R, P>).post(handlers::create_withdraw::<R, P>),
        )
        .route("/users", get(handlers::list_users::<R, P>))
        .route(
            "/users/{id}/balance",
            patch(handlers::update_balance::<R, P>),
        )
        .with_state(state)
}
