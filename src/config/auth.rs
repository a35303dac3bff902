//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum signing secret length accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token signing and password policy
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    /// Minimum accepted password length at registration
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Build a config around a secret, using defaults elsewhere.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(secret.into()),
            token_ttl_hours: default_token_ttl_hours(),
            password_min_length: default_password_min_length(),
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_hours * 3600)
    }

    /// Validate authentication configuration
    ///
    /// Production deployments require a signing secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_hours == 0 || self.token_ttl_hours > 720 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_password_min_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_issue_day_long_tokens() {
        let config = AuthConfig::with_secret("secret");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.token_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.password_min_length, 8);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let config = AuthConfig::with_secret("");
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn short_secret_only_allowed_outside_production() {
        let config = AuthConfig::with_secret("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        ));
    }

    #[test]
    fn ttl_bounds_are_enforced() {
        let mut config = AuthConfig::with_secret("dev-secret");
        config.token_ttl_hours = 0;
        assert!(config.validate(&Environment::Development).is_err());
        config.token_ttl_hours = 721;
        assert!(config.validate(&Environment::Development).is_err());
    }
}
