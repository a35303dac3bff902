//! Axum router for the payment webhook.

use axum::{routing::post, Router};

use super::handlers::handle_stripe_webhook;
use crate::adapters::http::state::AppState;

/// `POST /webhook`. No bearer auth; the request is authenticated by its
/// signature.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(handle_stripe_webhook))
}
