//! Account-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | EmailTaken | 409 |
//! | InvalidCredentials | 401 |
//! | Unauthenticated | 401 |
//! | UserNotFound | 404 |
//! | Forbidden | 403 |
//! | CannotModifySelf | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by registration, login and account management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// An account with this email already exists.
    EmailTaken(String),

    /// Unknown email or wrong password. The two cases are deliberately
    /// indistinguishable.
    InvalidCredentials,

    /// No valid bearer token accompanied a request that needs one.
    Unauthenticated,

    UserNotFound(UserId),

    /// Caller lacks the capability for this operation.
    Forbidden(String),

    /// An admin tried to revoke their own flag or delete their own account.
    CannotModifySelf,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl AccountError {
    pub fn email_taken(email: impl Into<String>) -> Self {
        AccountError::EmailTaken(email.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        AccountError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::EmailTaken(_) => ErrorCode::EmailTaken,
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                ErrorCode::Unauthorized
            }
            AccountError::UserNotFound(_) => ErrorCode::UserNotFound,
            AccountError::Forbidden(_) | AccountError::CannotModifySelf => ErrorCode::Forbidden,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to the caller.
    pub fn message(&self) -> String {
        match self {
            AccountError::EmailTaken(_) => "Email already registered".to_string(),
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::Unauthenticated => "Authentication required".to_string(),
            AccountError::UserNotFound(_) => "User not found".to_string(),
            AccountError::Forbidden(reason) => reason.clone(),
            AccountError::CannotModifySelf => {
                "Admins cannot revoke their own access or delete themselves".to_string()
            }
            AccountError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            AccountError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Infrastructure(detail) => write!(f, "infrastructure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => AccountError::EmailTaken(
                err.details.get("email").cloned().unwrap_or_default(),
            ),
            ErrorCode::Forbidden => AccountError::Forbidden(err.message),
            ErrorCode::ValidationFailed => AccountError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}
