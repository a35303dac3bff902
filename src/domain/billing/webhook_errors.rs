//! Webhook verification errors.

use thiserror::Error;

/// Failures while authenticating and decoding an inbound webhook.
///
/// None of these are retryable: a redelivery of the same bytes fails the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The `Stripe-Signature` header was not sent.
    #[error("Missing signature header")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    /// Event is older than the replay window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event is dated further in the future than the allowed clock skew.
    #[error("Timestamp in the future")]
    TimestampInFuture,

    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// Signature matched but the body is not a valid event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl WebhookError {
    /// True for errors that mean the sender could not prove it holds the secret.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::TimestampInFuture
                | WebhookError::MalformedHeader(_)
        )
    }
}
