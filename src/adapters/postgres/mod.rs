//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Accounts and lesson progress
//! - `PostgresCourseRepository` - Courses, lessons and ratings
//! - `PostgresEnrollmentRepository` - The enrollment relation
//!
//! Schema lives in `migrations/` and is embedded as [`MIGRATOR`].

mod course_repository;
mod enrollment_repository;
mod user_repository;

pub use course_repository::PostgresCourseRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use user_repository::PostgresUserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
