//! Delete User Use Case
//!
//! Removes the signed-in user's account after re-checking the password.
//! Withdrawal records are not touched and remain as an audit trail.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Delete user use case
pub struct DeleteUserUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> DeleteUserUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, user_id: &UserId, password: String) -> AuthResult<()> {
        let password = ClearTextPassword::for_verification(password);

        let credentials = self
            .credential_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !credentials
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
