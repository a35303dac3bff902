//! HTTP handlers for account endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{
    GetCurrentUserQuery, LessonProgressCommand, LoginCommand, RegisterCommand,
};

use super::dto::{
    AuthResponse, CompletedLessonsResponse, LessonProgressRequest, LoginRequest, RegisterRequest,
};

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let session = state
        .register_handler()
        .handle(RegisterCommand {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let session = state
        .login_handler()
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse::from(session)))
}

/// GET /api/auth/me
///
/// Guests get `null`.
pub async fn current_user(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .current_user_handler()
        .handle(GetCurrentUserQuery {
            caller: user.map(|u| u.id),
        })
        .await?;

    Ok(Json(view))
}

/// POST /api/auth/mark-complete
pub async fn mark_complete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<LessonProgressRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let lesson_id = parse_id(&req.lesson_id, "lesson_id")?;

    let completed_lessons = state
        .mark_complete_handler()
        .handle(LessonProgressCommand {
            user_id: user.id,
            lesson_id,
        })
        .await?;

    Ok(Json(CompletedLessonsResponse { completed_lessons }))
}

/// POST /api/auth/mark-not-complete
pub async fn mark_not_complete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<LessonProgressRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let lesson_id = parse_id(&req.lesson_id, "lesson_id")?;

    let completed_lessons = state
        .mark_not_complete_handler()
        .handle(LessonProgressCommand {
            user_id: user.id,
            lesson_id,
        })
        .await?;

    Ok(Json(CompletedLessonsResponse { completed_lessons }))
}
