//! ListRatingsHandler - Query handler for a course's ratings.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, RatingView};
use crate::domain::foundation::CourseId;
use crate::ports::{CourseRepository, UserRepository};

use super::author_names;

#[derive(Debug, Clone)]
pub struct ListRatingsQuery {
    pub course_id: CourseId,
}

pub struct ListRatingsHandler {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListRatingsHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    pub async fn handle(&self, query: ListRatingsQuery) -> Result<Vec<RatingView>, CatalogError> {
        let course = self
            .courses
            .find_by_id(&query.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(query.course_id))?;

        let names = author_names(self.users.as_ref(), &course).await?;
        Ok(course.rating_views(&names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::catalog::{Rating, RatingValue};

    #[tokio::test]
    async fn ratings_carry_author_names() {
        let fx = Fixture::new();
        let course = fx.course("Rust", 10.0).await;
        let ada = fx.user("Ada").await;
        let bea = fx.user("Bea").await;
        for (user, v) in [(&ada, 5), (&bea, 3)] {
            let r = Rating::new(user.id, RatingValue::try_new(v).unwrap(), None).unwrap();
            fx.courses().add_rating(&course.id, &r).await.unwrap();
        }

        let views = ListRatingsHandler::new(fx.courses(), fx.users())
            .handle(ListRatingsQuery { course_id: course.id })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.user.name.is_some()));
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let fx = Fixture::new();
        let id = CourseId::new();
        let result = ListRatingsHandler::new(fx.courses(), fx.users())
            .handle(ListRatingsQuery { course_id: id })
            .await;
        assert_eq!(result.unwrap_err(), CatalogError::CourseNotFound(id));
    }
}
