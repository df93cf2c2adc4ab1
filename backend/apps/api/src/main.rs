//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod etag;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use auth::{AuthSessionProvider, PgAuthRepository, auth_router};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::{
    Router, http,
    http::{Method, header},
};
use ledger::{PgLedgerRepository, ledger_router};
use settings::{DiskFileStore, PgSettingsRepository, settings_router};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// JSON bodies outside the upload route
const JSON_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,ledger=info,settings=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if !config.is_production() && config.session_secret.is_none() {
        tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
    }

    // Database connection; statement_timeout bounds every query server-side
    let connect_options = PgConnectOptions::from_str(&config.database_url)?.options([(
        "statement_timeout",
        config.store_timeout.as_millis().to_string(),
    )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired auth sessions
    // Errors here should not prevent server startup
    let auth_store_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(
                sessions_deleted = sessions,
                "Auth session cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth session cleanup failed, continuing anyway"
            );
        }
    }

    let files = DiskFileStore::new(&config.upload_dir);
    files.ensure_root().await?;

    let app = build_app(&config, pool, files);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_app(config: &AppConfig, pool: PgPool, files: DiskFileStore) -> Router {
    let auth_config = config.auth_config();
    let auth_repo = PgAuthRepository::new(pool.clone());
    let sessions = AuthSessionProvider::new(Arc::new(auth_repo.clone()), Arc::new(auth_config.clone()));

    let settings_config = config.settings_config();
    let upload_dir = settings_config.upload_dir.clone();

    let api = ledger_router(
        PgLedgerRepository::new(pool.clone()),
        sessions,
        config.ledger_config(),
    )
    .merge(settings_router(
        PgSettingsRepository::new(pool),
        files,
        settings_config,
    ));

    let routes = Router::new()
        .route("/", get(|| async { "Hello, world!" }))
        .nest("/api/auth", auth_router(auth_repo, auth_config))
        .nest("/api", api);

    // ETags in development only; ServeDir has its own conditional handling
    let routes = if config.is_production() {
        routes
    } else {
        routes.layer(middleware::from_fn(etag::etag))
    };

    let app = routes
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT_BYTES));

    // Request logs in development only
    let app = if config.is_production() {
        app
    } else {
        app.layer(TraceLayer::new_for_http())
    };

    app.layer(cors_layer(config))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers(ExposeHeaders::list([header::CONTENT_LENGTH]))
        .max_age(Duration::from_secs(600))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn test_config(upload_dir: PathBuf) -> AppConfig {
        AppConfig {
            port: 0,
            node_env: "test".to_string(),
            database_url: "postgres://localhost/unused".to_string(),
            database_max_connections: 1,
            store_timeout: Duration::from_millis(100),
            upload_dir,
            max_upload_bytes: 1024,
            frontend_origins: vec!["http://localhost:8081".to_string()],
            session_secret: None,
            password_pepper: None,
        }
    }

    fn test_app(upload_dir: PathBuf) -> Router {
        app_with_config(test_config(upload_dir))
    }

    fn app_with_config(config: AppConfig) -> Router {
        let upload_dir = config.upload_dir.clone();
        // Lazy pool: routes below never reach the database.
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        build_app(&config, pool, DiskFileStore::new(upload_dir))
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let app = test_app(PathBuf::from("uploads"));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello, world!");
    }

    #[tokio::test]
    async fn test_development_responses_carry_etag() {
        let app = test_app(PathBuf::from("uploads"));
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let tag = response.headers()[header::ETAG].clone();
        assert_eq!(tag.to_str().unwrap(), etag::weak_etag(b"Hello, world!"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::IF_NONE_MATCH, tag.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(response.headers()[header::ETAG], tag);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::IF_NONE_MATCH, "W/\"stale\"")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_production_responses_have_no_etag() {
        let mut config = test_config(PathBuf::from("uploads"));
        config.node_env = "PRODUCTION".to_string();
        config.session_secret = Some([7u8; 32]);
        let app = app_with_config(config);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::ETAG));
    }

    #[tokio::test]
    async fn test_get_session_without_token_is_null() {
        let app = test_app(PathBuf::from("uploads"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/get-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"null");
    }

    #[tokio::test]
    async fn test_withdraw_without_session_is_401() {
        let app = test_app(PathBuf::from("uploads"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/withdraws")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"amount": 10}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_uploads_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qr-code-1.png"), b"png").unwrap();
        let app = test_app(dir.path().to_path_buf());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/uploads/qr-code-1.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"png");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/uploads/missing.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
