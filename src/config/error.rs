use thiserror::Error;

/// Failure to read or merge configuration sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("unreadable .env file: {0}")]
    DotEnv(String),
}

/// A loaded value that the service cannot run with.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Host and port do not form a valid socket address")]
    InvalidBindAddress,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least {0} bytes in production")]
    JwtSecretTooShort(usize),

    #[error("Token lifetime must be between 1 and 720 hours")]
    InvalidTokenTtl,

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Invalid Stripe webhook secret format")]
    InvalidStripeWebhookSecret,

    #[error("Frontend URL must be an absolute http(s) URL")]
    InvalidFrontendUrl,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,
}
