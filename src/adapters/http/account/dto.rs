//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::AuthSession;
use crate::domain::account::PublicUserView;
use crate::domain::foundation::{LessonId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create an account.
///
/// Email format and password length are checked by the handler, which knows
/// the configured minimum.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 3, max = 254, message = "is required"))]
    pub email: String,
    #[validate(length(max = 1024, message = "is too long"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Body of `mark-complete` and `mark-not-complete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgressRequest {
    pub lesson_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Returned by register and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: PublicUserView,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token.token,
            expires_at: session.token.expires_at,
            user: session.user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLessonsResponse {
    pub completed_lessons: Vec<LessonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_blank_name() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "",
            "email": "ada@example.com",
            "password": "long-enough"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn lesson_progress_uses_camel_case() {
        let req: LessonProgressRequest =
            serde_json::from_str(r#"{"lessonId":"abc"}"#).unwrap();
        assert_eq!(req.lesson_id, "abc");
    }
}
