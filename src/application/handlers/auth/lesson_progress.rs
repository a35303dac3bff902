//! Lesson progress handlers - mark a lesson complete or not complete.
//!
//! Both operations are idempotent and return the caller's full
//! completed-lesson set. Lesson ids are not checked against any course.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::{LessonId, UserId};
use crate::ports::UserRepository;

/// Command to add or remove one lesson from the caller's completed set.
#[derive(Debug, Clone)]
pub struct LessonProgressCommand {
    pub user_id: UserId,
    pub lesson_id: LessonId,
}

/// Handler for `mark-complete`.
pub struct MarkLessonCompleteHandler {
    users: Arc<dyn UserRepository>,
}

impl MarkLessonCompleteHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: LessonProgressCommand) -> Result<Vec<LessonId>, AccountError> {
        let user = self
            .users
            .add_completed_lesson(&cmd.user_id, &cmd.lesson_id)
            .await?
            .ok_or(AccountError::UserNotFound(cmd.user_id))?;

        tracing::debug!(user_id = %cmd.user_id, lesson_id = %cmd.lesson_id, "Lesson marked complete");
        Ok(user.completed_lessons.into_iter().collect())
    }
}

/// Handler for `mark-not-complete`.
pub struct MarkLessonNotCompleteHandler {
    users: Arc<dyn UserRepository>,
}

impl MarkLessonNotCompleteHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: LessonProgressCommand) -> Result<Vec<LessonId>, AccountError> {
        let user = self
            .users
            .remove_completed_lesson(&cmd.user_id, &cmd.lesson_id)
            .await?
            .ok_or(AccountError::UserNotFound(cmd.user_id))?;

        Ok(user.completed_lessons.into_iter().collect())
    }
}
