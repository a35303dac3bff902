//! Axum router for admin endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    create_course, delete_course, delete_user, grant_admin, list_courses, list_users,
    revoke_admin, stats, update_course,
};
use crate::adapters::http::state::AppState;

/// Routes mounted at `/api/admin`. All require an admin caller.
///
/// - `GET /courses` - every course with its enrolled students
/// - `POST /courses`, `PUT /courses/:id`, `DELETE /courses/:id`
/// - `GET /users`, `DELETE /users/:id`
/// - `POST /users/:id/admin` grants, `DELETE /users/:id/admin` revokes
/// - `GET /stats` - revenue and enrollment totals
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/:id", put(update_course).delete(delete_course))
        .route("/users", get(list_users))
        .route("/users/:id", delete(delete_user))
        .route("/users/:id/admin", post(grant_admin).delete(revoke_admin))
        .route("/stats", get(stats))
}
