//! API error type that converts module errors to HTTP responses.
//!
//! Every failure leaves the server as
//! `{"error_code": "...", "message": "..."}`. Infrastructure details are
//! logged here and replaced by a generic message.

use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::account::AccountError;
use crate::domain::billing::BillingError;
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::ErrorCode;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: code.into(),
            message: message.into(),
        }
    }
}

/// An error ready to be rendered.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, message)
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Authentication required",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Logs the internal detail and keeps only a generic message.
    fn internal(code: ErrorCode, detail: &str) -> Self {
        tracing::error!(error_code = %code, detail = %detail, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, "Internal server error")
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let status = match &err {
            AccountError::EmailTaken(_) | AccountError::CannotModifySelf => StatusCode::CONFLICT,
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AccountError::Forbidden(_) => StatusCode::FORBIDDEN,
            AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AccountError::Infrastructure(detail) => return Self::internal(err.code(), detail),
        };
        Self::new(status, err.code(), err.message())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::InvalidId { .. } | CatalogError::ValidationFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
            CatalogError::CourseNotFound(_)
            | CatalogError::UserNotFound(_)
            | CatalogError::RatingNotFoundOrForbidden => StatusCode::NOT_FOUND,
            CatalogError::AlreadyEnrolled(_) | CatalogError::AlreadyRated(_) => {
                StatusCode::CONFLICT
            }
            CatalogError::Infrastructure(detail) => return Self::internal(err.code(), detail),
        };
        Self::new(status, err.code(), err.message())
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        let status = match &err {
            BillingError::InvalidSignature(_)
            | BillingError::MissingMetadata(_)
            | BillingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            BillingError::Unauthenticated => StatusCode::UNAUTHORIZED,
            BillingError::CourseNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Payment provider failure");
                StatusCode::BAD_GATEWAY
            }
            BillingError::Infrastructure(detail) => return Self::internal(err.code(), detail),
        };
        Self::new(status, err.code(), err.message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{}: {}", field, reason)
            })
            .collect();
        fields.sort();
        Self::bad_request(fields.join("; "))
    }
}

/// Parses a path or body identifier, reporting `field` when malformed.
pub fn parse_id<T: FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid_id(field).into())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.code.to_string(), self.message);
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CourseId, UserId};

    #[test]
    fn conflicts_map_to_409() {
        for err in [
            ApiError::from(AccountError::email_taken("a@b.co")),
            ApiError::from(AccountError::CannotModifySelf),
            ApiError::from(CatalogError::AlreadyEnrolled(CourseId::new())),
            ApiError::from(CatalogError::AlreadyRated(CourseId::new())),
        ] {
            assert_eq!(err.status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn credentials_and_token_errors_are_401() {
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::unauthenticated().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_variants_are_404() {
        assert_eq!(
            ApiError::from(CatalogError::RatingNotFoundOrForbidden).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AccountError::UserNotFound(UserId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(BillingError::CourseNotFound(CourseId::new())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn webhook_and_upstream_statuses() {
        assert_eq!(
            ApiError::from(BillingError::InvalidSignature("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(BillingError::upstream("503")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn infrastructure_message_is_generic() {
        let err = ApiError::from(CatalogError::infrastructure("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id::<CourseId>("not-a-uuid", "course_id").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid course id");

        let id = CourseId::new();
        assert_eq!(parse_id::<CourseId>(&id.to_string(), "course_id").unwrap(), id);
    }

    #[test]
    fn invalid_id_is_400() {
        let err = ApiError::from(CatalogError::invalid_id("course_id"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid course id");
    }
}
