//! DeleteCourseHandler - Command handler for removing a catalog entry.

use std::sync::Arc;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{Capability, CourseId, UserId};
use crate::ports::{AccessGate, CourseRepository};

#[derive(Debug, Clone)]
pub struct DeleteCourseCommand {
    pub caller: UserId,
    pub course_id: CourseId,
}

/// Handler for course deletion. Requires `ManageCourses`.
///
/// Enrollments in the course go with it; completed-lesson references held by
/// users are left dangling.
pub struct DeleteCourseHandler {
    gate: Arc<dyn AccessGate>,
    courses: Arc<dyn CourseRepository>,
}

impl DeleteCourseHandler {
    pub fn new(gate: Arc<dyn AccessGate>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { gate, courses }
    }

    pub async fn handle(&self, cmd: DeleteCourseCommand) -> Result<(), CatalogError> {
        self.gate
            .require(&cmd.caller, Capability::ManageCourses)
            .await?;

        if !self.courses.delete(&cmd.course_id).await? {
            return Err(CatalogError::CourseNotFound(cmd.course_id));
        }

        tracing::info!(course_id = %cmd.course_id, admin_id = %cmd.caller, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn delete_removes_course_and_its_enrollments() {
        let fx = Fixture::new();
        let admin = fx.admin("Root").await;
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        fx.enroll(&ada.id, &course).await;

        DeleteCourseHandler::new(fx.gate(), fx.courses())
            .handle(DeleteCourseCommand { caller: admin.id, course_id: course.id })
            .await
            .unwrap();

        assert!(fx.courses().find_by_id(&course.id).await.unwrap().is_none());
        let ada = fx.users().find_by_id(&ada.id).await.unwrap().unwrap();
        assert!(!ada.is_enrolled_in(&course.id));
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let fx = Fixture::new();
        let admin = fx.admin("Root").await;
        let course = fx.course("Rust", 10.0).await;
        let h = DeleteCourseHandler::new(fx.gate(), fx.courses());
        let cmd = DeleteCourseCommand { caller: admin.id, course_id: course.id };

        h.handle(cmd.clone()).await.unwrap();
        assert_eq!(
            h.handle(cmd).await.unwrap_err(),
            CatalogError::CourseNotFound(course.id)
        );
    }

    #[tokio::test]
    async fn unknown_caller_is_forbidden() {
        let fx = Fixture::new();
        let course = fx.course("Rust", 10.0).await;

        let result = DeleteCourseHandler::new(fx.gate(), fx.courses())
            .handle(DeleteCourseCommand { caller: UserId::new(), course_id: course.id })
            .await;

        assert!(matches!(result, Err(CatalogError::Forbidden(_))));
        assert!(fx.courses().find_by_id(&course.id).await.unwrap().is_some());
    }
}
