//! UpdateCourseHandler - Command handler for patching a catalog entry.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CourseDetail, CoursePatch};
use crate::domain::foundation::{Capability, CourseId, UserId};
use crate::ports::{AccessGate, CourseRepository, UserRepository};

use super::author_names;

#[derive(Debug, Clone)]
pub struct UpdateCourseCommand {
    pub caller: UserId,
    pub course_id: CourseId,
    pub patch: CoursePatch,
}

/// Handler for course updates. Requires `ManageCourses`.
///
/// Ratings and enrollments are untouched by an update.
pub struct UpdateCourseHandler {
    gate: Arc<dyn AccessGate>,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl UpdateCourseHandler {
    pub fn new(
        gate: Arc<dyn AccessGate>,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            gate,
            courses,
            users,
        }
    }

    pub async fn handle(&self, cmd: UpdateCourseCommand) -> Result<CourseDetail, CatalogError> {
        // 1. Authorize
        self.gate
            .require(&cmd.caller, Capability::ManageCourses)
            .await?;

        // 2. Load
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(cmd.course_id))?;

        // 3. Apply patch
        course.apply_patch(cmd.patch)?;

        // 4. Persist
        self.courses.update(&course).await?;

        tracing::info!(course_id = %course.id, admin_id = %cmd.caller, "Course updated");

        let names = author_names(self.users.as_ref(), &course).await?;
        Ok(course.detail(&names))
    }
}
