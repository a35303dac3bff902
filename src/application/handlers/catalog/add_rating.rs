//! AddRatingHandler - Command handler for rating a course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, RatingValue, RatingView};
use crate::domain::foundation::{CourseId, UserId};
use crate::ports::{CourseRepository, UserRepository};

use super::author_names;

/// Command to rate a course. `value` is checked against the 1..=5 range.
#[derive(Debug, Clone)]
pub struct AddRatingCommand {
    pub caller: UserId,
    pub course_id: CourseId,
    pub value: i64,
    pub comment: Option<String>,
}

/// Handler for adding a rating.
///
/// Only enrolled users may rate, and only once per course. The in-memory
/// check catches the common case; the store's uniqueness rule catches
/// concurrent submissions.
pub struct AddRatingHandler {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl AddRatingHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    /// Returns the course's ratings after the addition.
    pub async fn handle(&self, cmd: AddRatingCommand) -> Result<Vec<RatingView>, CatalogError> {
        // 1. Validate value
        let value = RatingValue::try_new(cmd.value)?;

        // 2. Load course
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(cmd.course_id))?;

        // 3. Only students of the course may rate it
        if !course.enrolled_students.contains(&cmd.caller) {
            return Err(CatalogError::forbidden(
                "Only enrolled students can rate this course",
            ));
        }

        // 4. Apply to the aggregate, then persist the new rating
        let rating = course.add_rating(cmd.caller, value, cmd.comment)?.clone();
        self.courses.add_rating(&course.id, &rating).await?;

        tracing::info!(
            course_id = %course.id,
            user_id = %cmd.caller,
            rating_id = %rating.id,
            value = value.value(),
            "Rating added"
        );

        let names = author_names(self.users.as_ref(), &course).await?;
        Ok(course.rating_views(&names))
    }
}
