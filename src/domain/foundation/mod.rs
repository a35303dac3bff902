//! Foundation module - Shared domain primitives.
//!
//! Identifiers, value objects, authentication types and the error types that
//! every other domain module builds on.

mod auth;
mod authorization;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, IssuedToken};
pub use authorization::{Capability, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CourseId, LessonId, RatingId, UserId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
