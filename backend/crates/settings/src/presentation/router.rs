//! Settings Router

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use std::sync::Arc;

use crate::application::config::SettingsConfig;
use crate::domain::repository::FileStore;
use crate::infra::disk::DiskFileStore;
use crate::infra::postgres::PgSettingsRepository;
use crate::presentation::handlers::{self, SettingsAppState, SettingsStore};

/// Multipart framing allowance on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the settings router with PostgreSQL repository and the upload
/// directory
pub fn settings_router(
    repo: PgSettingsRepository,
    files: DiskFileStore,
    config: SettingsConfig,
) -> Router {
    settings_router_generic(repo, files, config)
}

/// Create a generic settings router for any repository / file store
pub fn settings_router_generic<R, F>(repo: R, files: F, config: SettingsConfig) -> Router
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let upload_limit = config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let state = SettingsAppState {
        repo: Arc::new(repo),
        files: Arc::new(files),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/bank-details",
            get(handlers::get_bank_details::<R, F>).patch(handlers::update_bank_details::<R, F>),
        )
        .route(
            "/crypto-details",
            get(handlers::get_crypto_details::<R, F>)
                .patch(handlers::update_crypto_details::<R, F>),
        )
        .route(
            "/price",
            get(handlers::get_price::<R, F>).patch(handlers::update_price::<R, F>),
        )
        .route(
            "/qr-image",
            get(handlers::get_qr_image::<R, F>)
                .patch(handlers::update_qr_image::<R, F>)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
