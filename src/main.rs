//! Course Market server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use course_market::adapters::auth::{Argon2PasswordHasher, JwtTokenService, RoleAccessGate};
use course_market::adapters::http::{app_router, AppSettings, AppState};
use course_market::adapters::postgres::{
    PostgresCourseRepository, PostgresEnrollmentRepository, PostgresUserRepository, MIGRATOR,
};
use course_market::adapters::stripe::{StripeCheckoutAdapter, StripeConfig};
use course_market::config::{AppConfig, ServerConfig};
use course_market::domain::billing::StripeWebhookVerifier;
use course_market::ports::UserRepository;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;
    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "Configuration loaded"
    );

    // --- Database ---
    let pool = config.database.connect().await?;
    tracing::info!("Database connection pool created");
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    // --- Adapters ---
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
    let stripe = StripeConfig::new(config.payment.stripe_api_key.clone());

    let state = AppState {
        users: users.clone(),
        courses: Arc::new(PostgresCourseRepository::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentRepository::new(pool.clone())),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: tokens.clone(),
        sessions: tokens,
        gate: Arc::new(RoleAccessGate::new(users)),
        payments: Arc::new(StripeCheckoutAdapter::new(stripe)),
        webhook_verifier: StripeWebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        ),
        settings: AppSettings::from_config(&config),
    };

    // --- Server ---
    let app = app_router(state, &config.server);
    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. JSON output in production.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
