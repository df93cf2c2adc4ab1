//! Sign In Use Case
//!
//! Authenticates by email and password and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::{AuthSession, ClientInfo};
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub session: AuthSession,
    /// Session token for cookie / bearer use
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput, client: ClientInfo) -> AuthResult<SignInOutput> {
        let email = Email::new(&input.email)?;
        let password = ClearTextPassword::for_verification(input.password);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credentials = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user.user_id, "User has no password credentials");
                AuthError::InvalidCredentials
            })?;

        if !credentials
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession::new(
            user.user_id,
            user.email.as_str().to_string(),
            user.role,
            input.remember_me,
            client,
            self.config.session_ttl(input.remember_me),
        );
        self.session_repo.create(&session).await?;

        let session_token = token::issue(&self.config.session_secret, &session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            session,
            session_token,
        })
    }
}
