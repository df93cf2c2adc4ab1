//! Unit tests for Auth crate
//! Use cases run against the in-memory repository; router tests go through
//! `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use axum::http::{HeaderMap, HeaderValue, header};
    use chrono::Duration;
    use kernel::principal::Role;

    use crate::application::token;
    use crate::application::{
        AuthSessionProvider, DeleteUserUseCase, SessionProvider, SignInInput, SignInUseCase,
        SignOutUseCase, SignUpInput, SignUpOutput, SignUpUseCase,
    };
    use crate::domain::entity::auth_session::{AuthSession, ClientInfo};
    use crate::domain::repository::{AuthSessionRepository, UserRepository};
    use crate::error::AuthError;
    use crate::{AuthConfig, InMemoryAuthRepository};

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::development())
    }

    fn sign_up_input(email: &str) -> SignUpInput {
        SignUpInput {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            phone_number: Some("+91 98765 43210".to_string()),
            referral_code: None,
        }
    }

    async fn sign_up(
        repo: &Arc<InMemoryAuthRepository>,
        config: &Arc<AuthConfig>,
        email: &str,
    ) -> SignUpOutput {
        SignUpUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(sign_up_input(email), ClientInfo::default())
            .await
            .unwrap()
    }

    fn cookie_headers(config: &AuthConfig, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let cookie = format!("{}={}", config.session_cookie_name, token);
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_and_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();

        let output = sign_up(&repo, &config, "Asha@Example.com").await;

        assert_eq!(output.user.email.as_str(), "asha@example.com");
        assert_eq!(output.user.role, Role::User);
        assert_eq!(output.user.phone_number.as_deref(), Some("+91 98765 43210"));
        assert_eq!(
            token::parse(&config.session_secret, &output.session_token).unwrap(),
            output.session.session_id
        );
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email_case_insensitively() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        sign_up(&repo, &config, "asha@example.com").await;

        let result = SignUpUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(sign_up_input("ASHA@example.com"), ClientInfo::default())
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_sign_up_validates_input() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let use_case = SignUpUseCase::new(repo.clone(), repo.clone(), config());

        let mut input = sign_up_input("asha@example.com");
        input.password = "short".to_string();
        let result = use_case.execute(input, ClientInfo::default()).await;
        assert!(matches!(result, Err(AuthError::PasswordValidation(_))));

        let result = use_case
            .execute(sign_up_input("not-an-email"), ClientInfo::default())
            .await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));

        let mut input = sign_up_input("asha@example.com");
        input.name = "   ".to_string();
        let result = use_case.execute(input, ClientInfo::default()).await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));

        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        sign_up(&repo, &config, "asha@example.com").await;

        let use_case =
            SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config.clone());

        let wrong = use_case
            .execute(
                SignInInput {
                    email: "asha@example.com".to_string(),
                    password: "wrong password!".to_string(),
                    remember_me: false,
                },
                ClientInfo::default(),
            )
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        let unknown = use_case
            .execute(
                SignInInput {
                    email: "nobody@example.com".to_string(),
                    password: "correct horse battery".to_string(),
                    remember_me: false,
                },
                ClientInfo::default(),
            )
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

        let ok = use_case
            .execute(
                SignInInput {
                    email: " ASHA@example.com ".to_string(),
                    password: "correct horse battery".to_string(),
                    remember_me: false,
                },
                ClientInfo::default(),
            )
            .await
            .unwrap();
        assert!(!ok.session.remember_me);
        assert_eq!(repo.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_provider_resolves_cookie_and_bearer() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = sign_up(&repo, &config, "asha@example.com").await;
        let provider = AuthSessionProvider::new(repo.clone(), config.clone());

        let principal = provider
            .get_session(&cookie_headers(&config, &output.session_token))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.user_id, output.user.user_id);
        assert_eq!(principal.email, "asha@example.com");
        assert!(!principal.is_admin());

        let mut bearer = HeaderMap::new();
        bearer.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", output.session_token)).unwrap(),
        );
        assert!(provider.get_session(&bearer).await.unwrap().is_some());

        assert!(provider.get_session(&HeaderMap::new()).await.unwrap().is_none());
        assert!(
            provider
                .get_session(&cookie_headers(&config, "garbage"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_provider_drops_expired_session() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = sign_up(&repo, &config, "asha@example.com").await;

        let expired = AuthSession::new(
            output.user.user_id,
            "asha@example.com".to_string(),
            Role::User,
            false,
            ClientInfo::default(),
            Duration::seconds(-5),
        );
        AuthSessionRepository::create(repo.as_ref(), &expired)
            .await
            .unwrap();
        let expired_token = token::issue(&config.session_secret, &expired.session_id);

        let provider = AuthSessionProvider::new(repo.clone(), config.clone());
        let result = provider
            .get_session(&cookie_headers(&config, &expired_token))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(
            AuthSessionRepository::find_by_id(repo.as_ref(), &expired.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_provider_reports_admin_role() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = sign_up(&repo, &config, "admin@example.com").await;
        repo.set_role(&output.user.user_id, Role::Admin).await;

        // Role is captured when the session is created.
        let signed_in = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config.clone())
            .execute(
                SignInInput {
                    email: "admin@example.com".to_string(),
                    password: "correct horse battery".to_string(),
                    remember_me: true,
                },
                ClientInfo::default(),
            )
            .await
            .unwrap();

        let provider = AuthSessionProvider::new(repo.clone(), config.clone());
        let principal = provider
            .get_session(&cookie_headers(&config, &signed_in.session_token))
            .await
            .unwrap()
            .unwrap();
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = sign_up(&repo, &config, "asha@example.com").await;

        let use_case = SignOutUseCase::new(repo.clone(), config.clone());
        use_case.execute(&output.session_token).await.unwrap();
        // Unverifiable tokens are already signed out.
        use_case.execute("garbage").await.unwrap();

        let provider = AuthSessionProvider::new(repo.clone(), config.clone());
        assert!(
            provider
                .get_session(&cookie_headers(&config, &output.session_token))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_user_requires_password() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = config();
        let output = sign_up(&repo, &config, "asha@example.com").await;
        let use_case = DeleteUserUseCase::new(repo.clone(), repo.clone(), config.clone());

        let wrong = use_case
            .execute(&output.user.user_id, "not my password".to_string())
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        use_case
            .execute(&output.user.user_id, "correct horse battery".to_string())
            .await
            .unwrap();

        assert!(
            UserRepository::find_by_id(repo.as_ref(), &output.user.user_id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(repo.session_count().await, 0);

        let again = use_case
            .execute(&output.user.user_id, "correct horse battery".to_string())
            .await;
        assert!(matches!(again, Err(AuthError::UserNotFound)));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{AuthConfig, InMemoryAuthRepository, auth_router_generic};

    fn app() -> Router {
        auth_router_generic(InMemoryAuthRepository::new(), AuthConfig::development())
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sign_up_body() -> Value {
        json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "correct horse battery",
            "referralCode": "WELCOME10"
        })
    }

    #[tokio::test]
    async fn test_sign_up_then_get_session() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json("/sign-up/email", &sign_up_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session_token="));
        assert!(cookie.contains("HttpOnly"));

        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "asha@example.com");
        assert_eq!(body["user"]["referralCode"], "WELCOME10");
        assert_eq!(body["user"]["role"], "user");
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/get-session")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["name"], "Asha");
        assert_eq!(body["session"]["userId"], body["user"]["id"]);
    }

    #[tokio::test]
    async fn test_get_session_without_token_is_null() {
        let response = app()
            .oneshot(Request::builder().uri("/get-session").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, Value::Null);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_is_conflict() {
        let app = app();
        app.clone()
            .oneshot(post_json("/sign-up/email", &sign_up_body()))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json("/sign-up/email", &sign_up_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], "User already exists");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app()
            .oneshot(post_json("/sign-in/email", &json!({ "email": "a@b.co" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = app();
        app.clone()
            .oneshot(post_json("/sign-up/email", &sign_up_body()))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json(
                "/sign-in/email",
                &json!({ "email": "asha@example.com", "password": "definitely wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookie() {
        let response = app()
            .oneshot(post_json("/sign-out", &json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn test_delete_user_requires_session() {
        let response = app()
            .oneshot(post_json("/delete-user", &json!({ "password": "whatever123" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
