//! Password hashing port.

use crate::domain::foundation::DomainError;

/// One-way salted password hashing.
///
/// Synchronous by contract; callers that care about blocking the runtime
/// should run it on a blocking thread.
pub trait PasswordHasher: Send + Sync {
    /// Produces a self-describing hash string (algorithm, params, salt, digest).
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Checks a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
