//! Checkout and payment webhook errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidSignature | 400 |
//! | MissingMetadata | 400 |
//! | ValidationFailed | 400 |
//! | Unauthenticated | 401 |
//! | CourseNotFound | 404 |
//! | Upstream | 502 |
//! | Infrastructure | 500 |

use std::fmt;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, ValidationError};

use super::webhook_errors::WebhookError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    CourseNotFound(CourseId),

    Unauthenticated,

    /// The webhook could not be authenticated or decoded.
    InvalidSignature(String),

    /// A completed checkout lacks the metadata key needed to enroll.
    MissingMetadata(&'static str),

    /// The payment processor rejected or failed the request.
    Upstream(String),

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        BillingError::Upstream(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            BillingError::Unauthenticated => ErrorCode::Unauthorized,
            BillingError::InvalidSignature(_)
            | BillingError::MissingMetadata(_)
            | BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Upstream(_) => ErrorCode::PaymentProviderError,
            BillingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to the caller.
    pub fn message(&self) -> String {
        match self {
            BillingError::CourseNotFound(_) => "Course not found".to_string(),
            BillingError::Unauthenticated => "Authentication required".to_string(),
            BillingError::InvalidSignature(reason) => format!("Webhook error: {}", reason),
            BillingError::MissingMetadata(key) => format!("Missing metadata: {}", key),
            BillingError::Upstream(_) => "Payment provider error".to_string(),
            BillingError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            BillingError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingError::Upstream(detail) => write!(f, "upstream: {}", detail),
            BillingError::Infrastructure(detail) => write!(f, "infrastructure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for BillingError {}

impl From<ValidationError> for BillingError {
    fn from(err: ValidationError) -> Self {
        BillingError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<WebhookError> for BillingError {
    fn from(err: WebhookError) -> Self {
        BillingError::InvalidSignature(err.to_string())
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CourseNotFound => match err
                .details
                .get("course_id")
                .and_then(|v| v.parse().ok())
            {
                Some(id) => BillingError::CourseNotFound(id),
                None => BillingError::infrastructure(err.to_string()),
            },
            ErrorCode::PaymentProviderError => BillingError::Upstream(err.message),
            ErrorCode::ValidationFailed => BillingError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => BillingError::Infrastructure(err.to_string()),
        }
    }
}
