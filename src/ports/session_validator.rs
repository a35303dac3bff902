//! Bearer token validation.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns the raw token from `Authorization: Bearer <token>` into the
/// caller's identity.
///
/// A token that fails signature or shape checks is
/// `AuthError::InvalidToken`; a well-formed token past its expiry is
/// `AuthError::TokenExpired`. Implementations never consult the user store,
/// so a token for a deleted account still validates and later lookups
/// report the user as missing.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use chrono::Duration;

    /// Accepts exactly one token and reports everything else as expired.
    struct SingleToken {
        token: &'static str,
        user: AuthenticatedUser,
    }

    #[async_trait]
    impl SessionValidator for SingleToken {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token == self.token {
                Ok(self.user.clone())
            } else {
                Err(AuthError::TokenExpired)
            }
        }
    }

    #[tokio::test]
    async fn usable_through_a_trait_object() {
        let user = AuthenticatedUser::new(UserId::new(), Timestamp::now() + Duration::hours(1));
        let validator: Box<dyn SessionValidator> = Box::new(SingleToken {
            token: "abc",
            user: user.clone(),
        });

        assert_eq!(validator.validate("abc").await.unwrap(), user);
        let err = validator.validate("old").await.unwrap_err();
        assert!(err.requires_reauthentication());
    }
}
