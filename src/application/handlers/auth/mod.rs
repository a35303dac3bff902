//! Account handlers.
//!
//! ## Commands
//! - Registering an account
//! - Logging in
//! - Marking lessons complete / not complete
//!
//! ## Queries
//! - The caller's own account

mod get_current_user;
mod lesson_progress;
mod login;
mod register;

use std::sync::Arc;

use crate::domain::account::{AccountError, PublicUserView, User};
use crate::domain::foundation::IssuedToken;
use crate::ports::{PasswordHasher, TokenIssuer};

// Commands
pub use lesson_progress::{
    LessonProgressCommand, MarkLessonCompleteHandler, MarkLessonNotCompleteHandler,
};
pub use login::{LoginCommand, LoginHandler};
pub use register::{RegisterCommand, RegisterHandler};

// Queries
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};

/// A bearer token together with the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: IssuedToken,
    pub user: PublicUserView,
}

fn issue_session(tokens: &dyn TokenIssuer, user: &User) -> Result<AuthSession, AccountError> {
    let token = tokens
        .issue(&user.id)
        .map_err(|e| AccountError::infrastructure(e.to_string()))?;
    Ok(AuthSession {
        token,
        user: user.public_view(),
    })
}

/// Runs the hasher off the async executor.
async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: String,
) -> Result<String, AccountError> {
    let hasher = Arc::clone(hasher);
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AccountError::infrastructure(format!("hashing task failed: {}", e)))??;
    Ok(hash)
}

async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: String,
    hash: String,
) -> Result<bool, AccountError> {
    let hasher = Arc::clone(hasher);
    let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AccountError::infrastructure(format!("verification task failed: {}", e)))??;
    Ok(ok)
}
