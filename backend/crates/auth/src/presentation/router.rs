//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthStore};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R: AuthStore>(repo: R, config: AuthConfig) -> Router {
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/sign-up/email", post(handlers::sign_up::<R>))
        .route("/sign-in/email", post(handlers::sign_in::<R>))
        .route("/sign-out", post(handlers::sign_out::<R>))
        .route("/get-session", get(handlers::get_session::<R>))
        .route("/delete-user", post(handlers::delete_user::<R>))
        .with_state(state)
}
