//! Enrollment repository port.
//!
//! Enrollment is one relation between a user and a course. Both the user's
//! enrolled-course set and the course's enrolled-student set are read from
//! it, so a single write updates both sides.

use async_trait::async_trait;

use crate::domain::foundation::{CourseId, DomainError, UserId};

/// Result of an enroll attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// A new enrollment was recorded.
    Enrolled,
    /// The pair was already enrolled; nothing changed.
    AlreadyEnrolled,
}

impl EnrollOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, EnrollOutcome::Enrolled)
    }
}

/// Repository port for the user-course enrollment relation.
///
/// # Contract
///
/// `enroll` is an idempotent upsert keyed on (user, course): concurrent or
/// repeated calls for the same pair record at most one enrollment, and
/// exactly one caller observes [`EnrollOutcome::Enrolled`].
///
/// # Errors
///
/// - `UserNotFound` (with a `user_id` detail)
/// - `CourseNotFound` (with a `course_id` detail)
/// - `DatabaseError` on persistence failure
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn enroll(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, DomainError>;

    async fn is_enrolled(&self, user_id: &UserId, course_id: &CourseId)
        -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EnrollmentRepository) {}
    }

    #[test]
    fn only_enrolled_is_new() {
        assert!(EnrollOutcome::Enrolled.is_new());
        assert!(!EnrollOutcome::AlreadyEnrolled.is_new());
    }
}
