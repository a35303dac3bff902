//! GetCourseHandler - Query handler for a single course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CourseDetail};
use crate::domain::foundation::CourseId;
use crate::ports::{CourseRepository, UserRepository};

use super::author_names;

#[derive(Debug, Clone)]
pub struct GetCourseQuery {
    pub course_id: CourseId,
}

/// Handler returning full lessons and ratings with author names resolved.
pub struct GetCourseHandler {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl GetCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    pub async fn handle(&self, query: GetCourseQuery) -> Result<CourseDetail, CatalogError> {
        let course = self
            .courses
            .find_by_id(&query.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(query.course_id))?;

        let names = author_names(self.users.as_ref(), &course).await?;
        Ok(course.detail(&names))
    }
}
