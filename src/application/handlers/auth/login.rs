//! LoginHandler - Command handler for password login.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::domain::account::{normalize_email, AccountError};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{hash_password, issue_session, verify_password, AuthSession};

const DECOY_PASSWORD: &str = "course-market-decoy-password";

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Handler for password login.
///
/// Unknown email, malformed email and wrong password all produce
/// `InvalidCredentials`. An unknown email is still checked against a decoy
/// hash so it costs the same as a wrong password.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    decoy_hash: OnceCell<String>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthSession, AccountError> {
        let email = normalize_email(&cmd.email).map_err(|_| AccountError::InvalidCredentials)?;

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login for unknown email");
                let decoy = self
                    .decoy_hash
                    .get_or_try_init(|| hash_password(&self.hasher, DECOY_PASSWORD.to_string()))
                    .await?;
                verify_password(&self.hasher, cmd.password, decoy.clone()).await?;
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !verify_password(&self.hasher, cmd.password, user.password_hash.clone()).await? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        issue_session(self.tokens.as_ref(), &user)
    }
}
