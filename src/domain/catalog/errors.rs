//! Catalog, enrollment and rating errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidId | 400 |
//! | ValidationFailed | 400 |
//! | Unauthenticated | 401 |
//! | Forbidden | 403 |
//! | CourseNotFound / UserNotFound | 404 |
//! | RatingNotFoundOrForbidden | 404 |
//! | AlreadyEnrolled / AlreadyRated | 409 |
//! | Infrastructure | 500 |

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A path or body identifier is not well-formed.
    InvalidId { field: String },

    CourseNotFound(CourseId),

    UserNotFound(UserId),

    AlreadyEnrolled(CourseId),

    AlreadyRated(CourseId),

    /// No rating with that id exists for this user on this course.
    RatingNotFoundOrForbidden,

    Unauthenticated,

    Forbidden(String),

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl CatalogError {
    pub fn invalid_id(field: impl Into<String>) -> Self {
        CatalogError::InvalidId { field: field.into() }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        CatalogError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::InvalidId { .. } | CatalogError::ValidationFailed { .. } => {
                ErrorCode::ValidationFailed
            }
            CatalogError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            CatalogError::UserNotFound(_) => ErrorCode::UserNotFound,
            CatalogError::AlreadyEnrolled(_) => ErrorCode::AlreadyEnrolled,
            CatalogError::AlreadyRated(_) => ErrorCode::AlreadyRated,
            CatalogError::RatingNotFoundOrForbidden => ErrorCode::RatingNotFound,
            CatalogError::Unauthenticated => ErrorCode::Unauthorized,
            CatalogError::Forbidden(_) => ErrorCode::Forbidden,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to the caller.
    pub fn message(&self) -> String {
        match self {
            CatalogError::InvalidId { field } => format!("Invalid {}", field.replace('_', " ")),
            CatalogError::CourseNotFound(_) => "Course not found".to_string(),
            CatalogError::UserNotFound(_) => "User not found".to_string(),
            CatalogError::AlreadyEnrolled(_) => "Already enrolled".to_string(),
            CatalogError::AlreadyRated(_) => "You have already rated this course".to_string(),
            CatalogError::RatingNotFoundOrForbidden => {
                "Rating not found or not authorized".to_string()
            }
            CatalogError::Unauthenticated => "Authentication required".to_string(),
            CatalogError::Forbidden(reason) => reason.clone(),
            CatalogError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            CatalogError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Infrastructure(detail) => write!(f, "infrastructure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::InvalidFormat { field, .. } if field.ends_with("_id") => {
                CatalogError::invalid_id(field.clone())
            }
            _ => CatalogError::validation(err.field().to_string(), err.to_string()),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CourseNotFound => match detail_id(&err, "course_id") {
                Some(id) => CatalogError::CourseNotFound(id),
                None => CatalogError::infrastructure(err.to_string()),
            },
            ErrorCode::UserNotFound => match detail_id(&err, "user_id") {
                Some(id) => CatalogError::UserNotFound(id),
                None => CatalogError::infrastructure(err.to_string()),
            },
            ErrorCode::AlreadyRated => match detail_id(&err, "course_id") {
                Some(id) => CatalogError::AlreadyRated(id),
                None => CatalogError::infrastructure(err.to_string()),
            },
            ErrorCode::RatingNotFound => CatalogError::RatingNotFoundOrForbidden,
            ErrorCode::Forbidden => CatalogError::Forbidden(err.message),
            ErrorCode::ValidationFailed => CatalogError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

fn detail_id<T: FromStr>(err: &DomainError, key: &str) -> Option<T> {
    err.details.get(key).and_then(|v| v.parse().ok())
}
