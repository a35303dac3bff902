//! Hosted checkout at an external payment processor.
//!
//! Webhook authentication is not part of this port. It needs only the
//! shared signing secret and lives in `domain::billing`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Opens a one-shot checkout for a single course.
    ///
    /// Nothing is recorded locally. Enrollment waits for the processor's
    /// payment confirmation webhook.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// One course purchase as sent to the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCheckoutRequest {
    /// Echoed back as `metadata.userId` and `client_reference_id`.
    pub user_id: UserId,
    /// Echoed back as `metadata.courseId`.
    pub course_id: CourseId,
    pub product_name: String,
    pub product_description: Option<String>,
    /// Price in minor units (cents).
    pub unit_amount: i64,
    /// Lowercase ISO 4217 code.
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout the buyer is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
    /// Unix seconds, when the processor reports it.
    pub expires_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
    /// The processor's own error code, e.g. `amount_too_small`.
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Transport failures and throttling may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let provider_code = err.provider_code.clone();
        let domain = DomainError::new(ErrorCode::PaymentProviderError, err.to_string());
        match provider_code {
            Some(code) => domain.with_detail("provider_code", code),
            None => domain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,
    InvalidRequest,
    RateLimitExceeded,
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(PaymentError::network("timeout").is_retryable());
        assert!(PaymentError::new(PaymentErrorCode::RateLimitExceeded, "slow down").is_retryable());
        assert!(!PaymentError::new(PaymentErrorCode::AuthenticationError, "bad key").is_retryable());
    }

    #[test]
    fn provider_code_survives_into_domain_error() {
        let err: DomainError = PaymentError::new(PaymentErrorCode::InvalidRequest, "too small")
            .with_provider_code("amount_too_small")
            .into();

        assert!(err.is(ErrorCode::PaymentProviderError));
        assert_eq!(err.message, "invalid_request: too small");
        assert_eq!(
            err.details.get("provider_code").map(String::as_str),
            Some("amount_too_small")
        );
    }
}
