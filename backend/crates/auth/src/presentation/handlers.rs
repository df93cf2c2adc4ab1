//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_user_agent};
use platform::cookie::to_header_value;

use crate::application::config::AuthConfig;
use crate::application::session_provider::session_token;
use crate::application::{
    CheckSessionUseCase, DeleteUserUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::entity::auth_session::ClientInfo;
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, DeleteUserRequest, GetSessionResponse, SessionResponse, SignInRequest,
    SignUpRequest, SuccessResponse, UserResponse,
};

const USER_AGENT_MAX_CHARS: usize = 512;

/// Everything the auth handlers need from storage
pub trait AuthStore:
    UserRepository + CredentialRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + CredentialRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/sign-up/email
pub async fn sign_up<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<Response> {
    let Json(req) = payload.map_err(invalid_body)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
        phone_number: req.phone_number,
        referral_code: req.referral_code,
    };

    let output = use_case
        .execute(input, client_info(&headers, &extensions))
        .await?;

    let cookie = session_cookie(&state.config, &output.session_token, true)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            token: output.session_token,
            user: UserResponse::from(&output.user),
        }),
    )
        .into_response())
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/sign-in/email
pub async fn sign_in<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<Response> {
    let Json(req) = payload.map_err(invalid_body)?;
    let remember_me = req.remember_me.unwrap_or(true);

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
        remember_me,
    };

    let output = use_case
        .execute(input, client_info(&headers, &extensions))
        .await?;

    // Max-Age は remember_me と一致させる
    let cookie = session_cookie(&state.config, &output.session_token, remember_me)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            token: output.session_token,
            user: UserResponse::from(&output.user),
        }),
    )
        .into_response())
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/sign-out
pub async fn sign_out<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response> {
    if let Some(token) = session_token(&headers, &state.config) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        use_case.execute(&token).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_cookie(&state.config)?)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}

// ============================================================================
// Get Session
// ============================================================================

/// GET /api/auth/get-session
pub async fn get_session<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<Option<GetSessionResponse>>> {
    let Some(token) = session_token(&headers, &state.config) else {
        return Ok(Json(None));
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = match use_case.get_session(&token).await {
        Ok(session) => session,
        Err(AuthError::SessionInvalid) => return Ok(Json(None)),
        Err(e) => return Err(e),
    };

    let user = UserRepository::find_by_id(state.repo.as_ref(), &session.user_id).await?;

    Ok(Json(user.map(|user| GetSessionResponse {
        session: SessionResponse::from(&session),
        user: UserResponse::from(&user),
    })))
}

// ============================================================================
// Delete User
// ============================================================================

/// POST /api/auth/delete-user
pub async fn delete_user<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    payload: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> AuthResult<Response> {
    let token = session_token(&headers, &state.config).ok_or(AuthError::SessionInvalid)?;

    let check_use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = check_use_case.get_session(&token).await?;

    let Json(req) = payload.map_err(invalid_body)?;

    let use_case =
        DeleteUserUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case.execute(&session.user_id, req.password).await?;

    Ok((
        [(header::SET_COOKIE, clear_cookie(&state.config)?)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn invalid_body(rejection: JsonRejection) -> AuthError {
    AuthError::InvalidInput(rejection.body_text())
}

fn client_info(headers: &HeaderMap, extensions: &Extensions) -> ClientInfo {
    let direct_ip = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    ClientInfo {
        ip: extract_client_ip(headers, direct_ip).map(|ip| ip.to_string()),
        user_agent: extract_user_agent(headers, USER_AGENT_MAX_CHARS),
    }
}

fn session_cookie(config: &AuthConfig, token: &str, remember_me: bool) -> AuthResult<HeaderValue> {
    // remember_me でなければブラウザ終了で消える session cookie
    let max_age = remember_me.then(|| config.session_ttl_long.as_secs() as i64);
    let cookie = config
        .cookie_config()
        .build_set_cookie_with_max_age(token, max_age);

    to_header_value(&cookie).ok_or_else(|| AuthError::Internal("Invalid cookie value".to_string()))
}

fn clear_cookie(config: &AuthConfig) -> AuthResult<HeaderValue> {
    to_header_value(&config.cookie_config().build_delete_cookie())
        .ok_or_else(|| AuthError::Internal("Invalid cookie value".to_string()))
}
