//! RegisterHandler - Command handler for creating an account.

use std::sync::Arc;

use crate::domain::account::{normalize_email, AccountError, User};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{hash_password, issue_session, AuthSession};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handler for account registration.
///
/// New accounts are never admins; the flag can only be set by an existing
/// admin afterwards.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    password_min_length: usize,
}

impl RegisterHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            password_min_length,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<AuthSession, AccountError> {
        // 1. Validate input before doing any expensive work
        if cmd.password.chars().count() < self.password_min_length {
            return Err(AccountError::validation(
                "password",
                format!("must be at least {} characters", self.password_min_length),
            ));
        }
        let email = normalize_email(&cmd.email)?;

        // 2. Reject known duplicates early; the store's uniqueness check
        //    still covers concurrent registrations.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::email_taken(email));
        }

        // 3. Hash and persist
        let password_hash = hash_password(&self.hasher, cmd.password).await?;
        let user = User::register(&cmd.name, &email, password_hash)?;
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "Registered account");

        // 4. Issue token
        issue_session(self.tokens.as_ref(), &user)
    }
}
