//! Catalog handlers.
//!
//! ## Commands
//! - Creating, updating and deleting courses (admin)
//! - Adding and deleting ratings
//!
//! ## Queries
//! - Catalog listing and course detail
//! - A course's ratings

mod add_rating;
mod create_course;
mod delete_course;
mod delete_rating;
mod get_course;
mod list_courses;
mod list_ratings;
mod update_course;

use std::collections::HashMap;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

// Commands
pub use add_rating::{AddRatingCommand, AddRatingHandler};
pub use create_course::{CreateCourseCommand, CreateCourseHandler};
pub use delete_course::{DeleteCourseCommand, DeleteCourseHandler};
pub use delete_rating::{DeleteRatingCommand, DeleteRatingHandler};
pub use update_course::{UpdateCourseCommand, UpdateCourseHandler};

// Queries
pub use get_course::{GetCourseHandler, GetCourseQuery};
pub use list_courses::ListCoursesHandler;
pub use list_ratings::{ListRatingsHandler, ListRatingsQuery};

/// Display names of everyone who rated `course`.
///
/// Authors whose accounts are gone are simply absent from the map.
pub(crate) async fn author_names(
    users: &dyn UserRepository,
    course: &Course,
) -> Result<HashMap<UserId, String>, CatalogError> {
    let ids: Vec<UserId> = course.ratings.iter().map(|r| r.user_id).collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(users
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect())
}
