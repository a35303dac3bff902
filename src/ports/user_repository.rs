//! User repository port.
//!
//! Stores accounts and their per-lesson progress. The user's enrolled-course
//! set is read through this port but written only by
//! [`EnrollmentRepository`](super::EnrollmentRepository).

use async_trait::async_trait;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, LessonId, UserId};

/// Repository port for user accounts.
///
/// # Error contract
///
/// - `EmailTaken` (with an `email` detail) when `create` hits an existing email
/// - `DatabaseError` on any persistence failure
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new account. Emails are unique.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Looks up by already-normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Loads the given accounts; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// All accounts, oldest first.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Removes an account with its enrollments, ratings and progress.
    ///
    /// Returns `false` if no such account existed.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Sets the admin flag. Returns the updated account, or `None` if absent.
    async fn set_admin(&self, id: &UserId, is_admin: bool) -> Result<Option<User>, DomainError>;

    /// Idempotently adds a lesson to the completed set.
    ///
    /// Returns the updated account, or `None` if absent.
    async fn add_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError>;

    /// Idempotently removes a lesson from the completed set.
    async fn remove_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
