//! Course repository port.
//!
//! A course is loaded together with its lessons, ratings and the ids of its
//! enrolled students. Ratings are written through dedicated methods so that
//! the one-rating-per-user rule is enforced by the store under concurrency,
//! not only by the read-then-write check in the aggregate.

use async_trait::async_trait;

use crate::domain::catalog::{Course, Rating};
use crate::domain::foundation::{CourseId, DomainError, RatingId, UserId};

/// Repository port for catalog courses.
///
/// # Error contract
///
/// - `CourseNotFound` (with a `course_id` detail) when the course is absent
/// - `AlreadyRated` (with a `course_id` detail) on a duplicate rating
/// - `RatingNotFound` when no rating matches both id and author
/// - `DatabaseError` on any persistence failure
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses in creation order.
    async fn list(&self) -> Result<Vec<Course>, DomainError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Persists a new course with its lessons.
    async fn create(&self, course: &Course) -> Result<(), DomainError>;

    /// Writes scalar fields and replaces the lesson list.
    ///
    /// Ratings and enrollments are left untouched.
    async fn update(&self, course: &Course) -> Result<(), DomainError>;

    /// Returns `false` if no such course existed.
    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError>;

    /// Appends a rating unless the same user already rated the course.
    async fn add_rating(&self, course_id: &CourseId, rating: &Rating) -> Result<(), DomainError>;

    /// Removes a rating only if it belongs to `user_id`.
    async fn delete_rating(
        &self,
        course_id: &CourseId,
        rating_id: &RatingId,
        user_id: &UserId,
    ) -> Result<(), DomainError>;
}
