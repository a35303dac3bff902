//! DeleteRatingHandler - Command handler for withdrawing one's own rating.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, RatingView};
use crate::domain::foundation::{CourseId, RatingId, UserId};
use crate::ports::{CourseRepository, UserRepository};

use super::author_names;

#[derive(Debug, Clone)]
pub struct DeleteRatingCommand {
    pub caller: UserId,
    pub course_id: CourseId,
    pub rating_id: RatingId,
}

/// Handler for deleting a rating.
///
/// A rating that does not exist and a rating written by someone else give
/// the same `RatingNotFoundOrForbidden` error.
pub struct DeleteRatingHandler {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl DeleteRatingHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    /// Returns the course's remaining ratings.
    pub async fn handle(&self, cmd: DeleteRatingCommand) -> Result<Vec<RatingView>, CatalogError> {
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(cmd.course_id))?;

        course.remove_rating(&cmd.rating_id, &cmd.caller)?;
        self.courses
            .delete_rating(&cmd.course_id, &cmd.rating_id, &cmd.caller)
            .await?;

        tracing::info!(
            course_id = %cmd.course_id,
            user_id = %cmd.caller,
            rating_id = %cmd.rating_id,
            "Rating removed"
        );

        let names = author_names(self.users.as_ref(), &course).await?;
        Ok(course.rating_views(&names))
    }
}
