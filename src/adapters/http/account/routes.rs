//! Axum router for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{current_user, login, mark_complete, mark_not_complete, register};
use crate::adapters::http::state::AppState;

/// Routes mounted at `/api/auth`.
///
/// - `POST /register` - create an account (public)
/// - `POST /login` - exchange credentials for a token (public)
/// - `GET /me` - the caller's account, `null` for guests
/// - `POST /mark-complete` / `POST /mark-not-complete` - lesson progress (auth)
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(current_user))
        .route("/mark-complete", post(mark_complete))
        .route("/mark-not-complete", post(mark_not_complete))
}
