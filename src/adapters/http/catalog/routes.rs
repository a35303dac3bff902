//! Axum router for catalog endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    add_rating, create_checkout_session, create_course, delete_rating, enroll, get_course,
    list_courses, list_ratings,
};
use crate::adapters::http::state::AppState;

/// Routes mounted at `/api/courses`.
///
/// ## Public
/// - `GET /` - catalog summaries
/// - `GET /:id` - course detail
/// - `GET /:id/ratings` - a course's ratings
///
/// ## Authenticated
/// - `POST /` - create a course (admin)
/// - `POST /:id/enroll` - direct enrollment
/// - `POST /:id/checkout-session` - start payment
/// - `POST /:id/ratings` - rate a course
/// - `DELETE /:id/ratings/:rating_id` - remove one's own rating
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course))
        .route("/:id/enroll", post(enroll))
        .route("/:id/checkout-session", post(create_checkout_session))
        .route("/:id/ratings", get(list_ratings).post(add_rating))
        .route("/:id/ratings/:rating_id", delete(delete_rating))
}
