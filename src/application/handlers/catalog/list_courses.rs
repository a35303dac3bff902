//! ListCoursesHandler - Query handler for the public catalog.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CourseSummary};
use crate::ports::CourseRepository;

/// Handler for the catalog listing: every course, in store order, with
/// lesson count and average rating instead of bodies.
pub struct ListCoursesHandler {
    courses: Arc<dyn CourseRepository>,
}

impl ListCoursesHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self) -> Result<Vec<CourseSummary>, CatalogError> {
        let courses = self.courses.list().await?;
        Ok(courses.iter().map(|c| c.summary()).collect())
    }
}
