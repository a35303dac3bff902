//! Catalog module - courses, their lessons and ratings.

mod course;
mod errors;
mod lesson;
mod rating;
mod text;

pub use course::{Course, CourseDetail, CourseDraft, CoursePatch, CourseSummary};
pub use errors::CatalogError;
pub use lesson::{Lesson, LessonDraft};
pub use rating::{average_rating, Rating, RatingAuthor, RatingValue, RatingView};
