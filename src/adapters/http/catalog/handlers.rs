//! HTTP handlers for catalog, enrollment and rating endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::billing::CreateCheckoutSessionCommand;
use crate::application::handlers::catalog::{
    AddRatingCommand, CreateCourseCommand, DeleteRatingCommand, GetCourseQuery, ListRatingsQuery,
};
use crate::application::handlers::enrollment::EnrollCommand;

use super::dto::{
    CheckoutResponse, CreateCourseRequest, RatingRequest, RatingsResponse, SuccessResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Courses
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let courses = state.list_courses_handler().handle().await?;
    Ok(Json(courses))
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let course = state
        .get_course_handler()
        .handle(GetCourseQuery { course_id })
        .await?;
    Ok(Json(course))
}

/// POST /api/courses (admin)
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

// ════════════════════════════════════════════════════════════════════════════════
// Enrollment and checkout
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/courses/:id/enroll
pub async fn enroll(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    state
        .enroll_handler()
        .handle(EnrollCommand {
            caller: user.id,
            course_id,
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/courses/:id/checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let redirect = state
        .checkout_handler()
        .handle(CreateCheckoutSessionCommand {
            caller: user.id,
            course_id,
        })
        .await?;

    Ok(Json(CheckoutResponse {
        url: redirect.url,
        session_id: redirect.session_id,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Ratings
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/courses/:id/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let ratings = state
        .list_ratings_handler()
        .handle(ListRatingsQuery { course_id })
        .await?;
    Ok(Json(ratings))
}

/// POST /api/courses/:id/ratings
pub async fn add_rating(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let Json(req) = payload?;

    let ratings = state
        .add_rating_handler()
        .handle(AddRatingCommand {
            caller: user.id,
            course_id,
            value: req.value,
            comment: req.comment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RatingsResponse {
            message: "Rating added successfully",
            ratings,
        }),
    ))
}

/// DELETE /api/courses/:id/ratings/:rating_id
pub async fn delete_rating(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((id, rating_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = parse_id(&id, "course_id")?;
    let rating_id = parse_id(&rating_id, "rating_id")?;

    let ratings = state
        .delete_rating_handler()
        .handle(DeleteRatingCommand {
            caller: user.id,
            course_id,
            rating_id,
        })
        .await?;

    Ok(Json(RatingsResponse {
        message: "Rating removed successfully",
        ratings,
    }))
}
