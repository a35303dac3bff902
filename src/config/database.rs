//! PostgreSQL connection settings.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

const POOL_CEILING: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection string.
    pub url: String,

    /// Apply embedded migrations before serving.
    #[serde(default)]
    pub run_migrations: bool,

    #[serde(default)]
    pub pool: PoolConfig,
}

/// Sizing and recycling of pooled connections
/// (`COURSE_MARKET__DATABASE__POOL__MAX_CONNECTIONS`, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 2,
            max_connections: 10,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl PoolConfig {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(self.idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(self.max_lifetime_secs)))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > POOL_CEILING {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        self.pool.options().connect(&self.url).await
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("database.url"));
        }
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        self.pool.validate()
    }
}
