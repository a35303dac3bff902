//! Process-wide settings, read once at startup.
//!
//! Sources, lowest precedence first: an optional `course-market.toml` in the
//! working directory, a `.env` file, then `COURSE_MARKET__SECTION__KEY`
//! environment variables.
//!
//! ```no_run
//! use course_market::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! println!("binding {}", config.server.bind_addr().unwrap());
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Prefix shared by every environment variable the service reads.
pub const ENV_PREFIX: &str = "COURSE_MARKET";

/// Optional settings file, looked up relative to the working directory.
pub const CONFIG_FILE: &str = "course-market";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Reads every source and deserializes the merged result.
    ///
    /// `COURSE_MARKET__PAYMENT__CURRENCY=eur` sets `payment.currency`.
    /// Missing required keys (database url, JWT secret, Stripe credentials,
    /// frontend url) fail here; value checks happen in [`validate`](Self::validate).
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::DotEnv(err.to_string()));
            }
        }

        let merged = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Ok(merged.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const REQUIRED: [(&str, &str); 5] = [
        ("COURSE_MARKET__DATABASE__URL", "postgres://market@localhost/market"),
        (
            "COURSE_MARKET__AUTH__JWT_SECRET",
            "0123456789abcdef0123456789abcdef-signing",
        ),
        ("COURSE_MARKET__PAYMENT__STRIPE_API_KEY", "sk_test_market"),
        ("COURSE_MARKET__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_market"),
        ("COURSE_MARKET__PAYMENT__FRONTEND_URL", "https://shop.example.com"),
    ];

    /// Loads with the required variables plus `extra`, then cleans up.
    fn load_with(extra: &[(&str, &str)], skip: Option<&str>) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        let vars: Vec<(&str, &str)> = REQUIRED
            .iter()
            .copied()
            .filter(|(key, _)| Some(*key) != skip)
            .chain(extra.iter().copied())
            .collect();
        for (key, value) in &vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for (key, _) in &vars {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn required_variables_produce_a_valid_config() {
        let config = load_with(&[], None).unwrap();

        assert_eq!(config.database.url, "postgres://market@localhost/market");
        assert_eq!(config.payment.frontend_url, "https://shop.example.com");
        assert_eq!(config.payment.currency, "usd");
        assert!(!config.payment.allow_direct_enroll);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_reach_their_section() {
        let config = load_with(
            &[
                ("COURSE_MARKET__SERVER__PORT", "3000"),
                ("COURSE_MARKET__SERVER__ENVIRONMENT", "production"),
                ("COURSE_MARKET__PAYMENT__ALLOW_DIRECT_ENROLL", "true"),
            ],
            None,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.payment.allow_direct_enroll);
    }

    #[test]
    fn missing_signing_secret_fails_to_load() {
        assert!(load_with(&[], Some("COURSE_MARKET__AUTH__JWT_SECRET")).is_err());
    }
}
