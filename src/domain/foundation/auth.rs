//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what a validated bearer token proves: the
//! caller's user id and nothing else. Role and profile data are always
//! loaded from the user store so that admin changes take effect without
//! reissuing tokens.

use super::{Timestamp, UserId};
use thiserror::Error;

/// Identity extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,

    /// When the presented token stops being accepted.
    pub expires_at: Timestamp,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, expires_at: Timestamp) -> Self {
        Self { id, expires_at }
    }
}

/// A freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Authentication errors that can occur during token handling.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token's signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token signing failed.
    #[error("Token could not be issued: {0}")]
    IssueFailed(String),
}

impl AuthError {
    /// Returns true if the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::IssueFailed("key".into()).requires_reauthentication());
    }
}
