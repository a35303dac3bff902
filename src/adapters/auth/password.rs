//! Argon2id password hashing.
//!
//! Hashes are stored in PHC string format, so algorithm parameters and salt
//! travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// [`PasswordHasher`] backed by Argon2id.
///
/// New hashes use the configured cost parameters; verification reads the
/// parameters stored in each hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit memory/time cost, e.g. cheap params in tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = password_hash::PasswordHasher::hash_password(
            &self.argon2(),
            password.as_bytes(),
            &salt,
        )
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("unreadable hash: {}", e))
        })?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("verification failed: {}", e),
            )),
        }
    }
}
