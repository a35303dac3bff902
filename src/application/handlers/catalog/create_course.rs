//! CreateCourseHandler - Command handler for adding a catalog entry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CourseDetail, CourseDraft};
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, CourseRepository};

#[derive(Debug, Clone)]
pub struct CreateCourseCommand {
    pub caller: UserId,
    pub draft: CourseDraft,
}

/// Handler for course creation. Requires `ManageCourses`.
pub struct CreateCourseHandler {
    gate: Arc<dyn AccessGate>,
    courses: Arc<dyn CourseRepository>,
}

impl CreateCourseHandler {
    pub fn new(gate: Arc<dyn AccessGate>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { gate, courses }
    }

    pub async fn handle(&self, cmd: CreateCourseCommand) -> Result<CourseDetail, CatalogError> {
        // 1. Authorize
        self.gate
            .require(&cmd.caller, Capability::ManageCourses)
            .await?;

        // 2. Build and validate
        let course = Course::create(cmd.draft)?;

        // 3. Persist
        self.courses.create(&course).await?;

        tracing::info!(course_id = %course.id, admin_id = %cmd.caller, "Course created");
        Ok(course.detail(&HashMap::new()))
    }
}
