//! Stripe checkout adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe REST API.
//! Only one-shot `payment` mode checkout sessions are created; webhook
//! verification lives in `domain::billing`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripeCheckoutAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripeCheckoutAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Form parameters for `POST /v1/checkout/sessions`.
    fn checkout_params(request: &CreateCheckoutRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", request.currency.clone()),
            (
                "line_items[0][price_data][unit_amount]",
                request.unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.product_name.clone(),
            ),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("client_reference_id", request.user_id.to_string()),
        ];

        if let Some(description) = &request.product_description {
            params.push((
                "line_items[0][price_data][product_data][description]",
                description.clone(),
            ));
        }

        params.push(("metadata[userId]", request.user_id.to_string()));
        params.push(("metadata[courseId]", request.course_id.to_string()));
        params
    }
}

/// Subset of the checkout session object returned by Stripe.
#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: Option<String>,
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a non-success Stripe response to a `PaymentError`.
fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let code = match status.as_u16() {
        401 | 403 => PaymentErrorCode::AuthenticationError,
        429 => PaymentErrorCode::RateLimitExceeded,
        400 | 402 | 404 => PaymentErrorCode::InvalidRequest,
        _ => PaymentErrorCode::ProviderError,
    };

    match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error ({})", status));
            let err = PaymentError::new(code, message);
            match envelope.error.code {
                Some(provider_code) => err.with_provider_code(provider_code),
                None => err,
            }
        }
        Err(_) => PaymentError::new(code, format!("Stripe API error ({}): {}", status, body)),
    }
}

#[async_trait]
impl PaymentProvider for StripeCheckoutAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = Self::checkout_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_from_response(status, &body);
            tracing::warn!(
                status = %status,
                code = %err.code,
                course_id = %request.course_id,
                "Stripe rejected checkout session"
            );
            return Err(err);
        }

        let session: StripeSessionResponse = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let url = session.url.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Checkout session has no redirect URL",
            )
        })?;

        tracing::info!(
            session_id = %session.id,
            user_id = %request.user_id,
            course_id = %request.course_id,
            "Created checkout session"
        );

        Ok(CheckoutSession {
            id: session.id,
            url,
            expires_at: session.expires_at,
        })
    }
}
