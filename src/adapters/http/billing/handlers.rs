//! HTTP handler for payment processor callbacks.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::billing::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookResult,
};

const SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /webhook
///
/// Takes the raw body: the signature covers the exact bytes sent, so nothing
/// may parse or re-encode them before verification. Every verified event is
/// acknowledged, including ones that change nothing.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let result = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    match &result {
        HandlePaymentWebhookResult::Enrolled { user_id, course_id } => {
            tracing::info!(%user_id, %course_id, "Webhook enrolled buyer");
        }
        HandlePaymentWebhookResult::TargetMissing { user_id, course_id } => {
            tracing::warn!(%user_id, %course_id, "Webhook target no longer exists");
        }
        HandlePaymentWebhookResult::Unroutable { session_id, reason } => {
            tracing::warn!(%session_id, %reason, "Webhook session could not be routed");
        }
        other => tracing::debug!(result = ?other, "Webhook acknowledged"),
    }

    Ok(Json(WebhookAck { received: true }))
}
