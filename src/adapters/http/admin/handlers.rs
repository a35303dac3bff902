//! HTTP handlers for the admin back-office.
//!
//! Every handler needs an authenticated caller; the admin check itself
//! happens in the application handlers through the access gate.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::adapters::http::catalog::dto::{
    CreateCourseRequest, SuccessResponse, UpdateCourseRequest,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::{
    DeleteUserCommand, GetStatsQuery, ListCourseRostersQuery, ListUsersQuery, SetAdminCommand,
};
use crate::application::handlers::catalog::{
    CreateCourseCommand, DeleteCourseCommand, UpdateCourseCommand,
};
use crate::domain::account::PublicUserView;
use crate::domain::foundation::UserId;

// ════════════════════════════════════════════════════════════════════════════════
// Courses
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/courses
pub async fn list_courses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let rosters = state
        .course_rosters_handler()
        .handle(ListCourseRostersQuery { caller: user.id })
        .await?;
    Ok(Json(rosters))
}

/// POST /api/admin/courses
pub async fn create_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let course = state
        .create_course_handler()
        .handle(CreateCourseCommand {
            caller: user.id,
            draft: req.into_draft()?,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/admin/courses/:id
pub async fn update_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let Json(req) = payload?;

    let course = state
        .update_course_handler()
        .handle(UpdateCourseCommand {
            caller: user.id,
            course_id,
            patch: req.into_patch()?,
        })
        .await?;
    Ok(Json(course))
}

/// DELETE /api/admin/courses/:id
pub async fn delete_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    state
        .delete_course_handler()
        .handle(DeleteCourseCommand {
            caller: user.id,
            course_id,
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .list_users_handler()
        .handle(ListUsersQuery { caller: user.id })
        .await?;
    Ok(Json(users))
}

/// DELETE /api/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_id(&id, "user_id")?;
    state
        .delete_user_handler()
        .handle(DeleteUserCommand {
            caller: user.id,
            user_id,
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/users/:id/admin
pub async fn grant_admin(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    set_admin(state, user.id, &id, true).await
}

/// DELETE /api/admin/users/:id/admin
pub async fn revoke_admin(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    set_admin(state, user.id, &id, false).await
}

async fn set_admin(
    state: AppState,
    caller: UserId,
    raw_id: &str,
    is_admin: bool,
) -> Result<Json<PublicUserView>, ApiError> {
    let user_id = parse_id(raw_id, "user_id")?;
    let view = state
        .set_admin_handler()
        .handle(SetAdminCommand {
            caller,
            user_id,
            is_admin,
        })
        .await?;
    Ok(Json(view))
}

// ════════════════════════════════════════════════════════════════════════════════
// Stats
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .stats_handler()
        .handle(GetStatsQuery { caller: user.id })
        .await?;
    Ok(Json(stats))
}
