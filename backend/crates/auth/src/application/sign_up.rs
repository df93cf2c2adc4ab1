//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::{AuthSession, ClientInfo};
use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, profile};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub referral_code: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub session: AuthSession,
    /// Session token for cookie / bearer use
    pub session_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput, client: ClientInfo) -> AuthResult<SignUpOutput> {
        let name = profile::display_name(&input.name)?;
        let email = Email::new(&input.email)?;
        let phone_number = profile::phone_number(input.phone_number.as_deref())?;
        let referral_code = profile::referral_code(input.referral_code.as_deref())?;
        let password = ClearTextPassword::new(input.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password.hash(self.config.pepper())?;

        let user = User::new(name, email, phone_number, referral_code);
        let credentials = Credentials::new(user.user_id, password_hash);

        // The unique index still guards the race between lookup and insert.
        self.user_repo.create(&user, &credentials).await?;

        let session = AuthSession::new(
            user.user_id,
            user.email.as_str().to_string(),
            user.role,
            true,
            client,
            self.config.session_ttl(true),
        );
        self.session_repo.create(&session).await?;

        let session_token = token::issue(&self.config.session_secret, &session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session,
            session_token,
        })
    }
}
