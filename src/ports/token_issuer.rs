//! Token issuing port.

use crate::domain::foundation::{AuthError, IssuedToken, UserId};

/// Issues signed, time-limited bearer tokens that carry only the user id.
///
/// Tokens are never revoked; expiry is the only invalidation.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_issuer_is_object_safe() {
        fn _accepts_dyn(_issuer: &dyn TokenIssuer) {}
    }
}
