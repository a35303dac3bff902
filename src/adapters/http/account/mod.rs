//! HTTP adapter for registration, login and lesson progress.

mod dto;
mod handlers;
mod routes;

pub use dto::{AuthResponse, CompletedLessonsResponse};
pub use routes::account_routes;
