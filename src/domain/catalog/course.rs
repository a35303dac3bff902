//! Course aggregate, with its create and patch inputs and read projections.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::foundation::{
    CourseId, Percentage, RatingId, Timestamp, UserId, ValidationError,
};

use super::errors::CatalogError;
use super::lesson::{build_lessons, sort_lessons, Lesson, LessonDraft};
use super::rating::{average_rating, Rating, RatingValue, RatingView};
use super::text::{money, optional_text, required_text};

/// A catalog entry with its embedded lessons and ratings.
///
/// `enrolled_students` is a projection of the enrollment relation, filled in
/// by the repository on load and never written back through the course.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub instructor: String,
    pub price: f64,
    pub discount: Percentage,
    pub previous_price: Option<f64>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub lessons: Vec<Lesson>,
    pub ratings: Vec<Rating>,
    pub enrolled_students: BTreeSet<UserId>,
    pub created_at: Timestamp,
}

/// Fields accepted when creating a course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub instructor: Option<String>,
    pub price: f64,
    pub discount: Option<Percentage>,
    pub previous_price: Option<f64>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub lessons: Vec<LessonDraft>,
}

/// A partial update.
///
/// Outer `None` leaves a field unchanged. For optional fields an inner
/// `None` clears the stored value; a cleared discount falls back to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub student_description: Option<Option<String>>,
    pub instructor: Option<Option<String>>,
    pub price: Option<f64>,
    pub discount: Option<Option<Percentage>>,
    pub previous_price: Option<Option<f64>>,
    pub thumbnail: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub lessons: Option<Vec<LessonDraft>>,
}

impl Course {
    pub fn create(draft: CourseDraft) -> Result<Self, ValidationError> {
        let mut lessons = build_lessons(draft.lessons, &HashSet::new())?;
        sort_lessons(&mut lessons);
        Ok(Self {
            id: CourseId::new(),
            title: required_text("title", &draft.title)?,
            description: optional_text(draft.description),
            student_description: optional_text(draft.student_description),
            instructor: optional_text(draft.instructor).unwrap_or_default(),
            price: money("price", draft.price)?,
            discount: draft.discount.unwrap_or_default(),
            previous_price: draft
                .previous_price
                .map(|p| money("previousPrice", p))
                .transpose()?,
            thumbnail: optional_text(draft.thumbnail),
            duration: optional_text(draft.duration),
            lessons,
            ratings: Vec::new(),
            enrolled_students: BTreeSet::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Applies a patch atomically: on error the course is left untouched.
    pub fn apply_patch(&mut self, patch: CoursePatch) -> Result<(), ValidationError> {
        let mut next = self.clone();

        if let Some(title) = patch.title {
            next.title = required_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            next.description = optional_text(description);
        }
        if let Some(student_description) = patch.student_description {
            next.student_description = optional_text(student_description);
        }
        if let Some(instructor) = patch.instructor {
            next.instructor = optional_text(instructor).unwrap_or_default();
        }
        if let Some(price) = patch.price {
            next.price = money("price", price)?;
        }
        if let Some(discount) = patch.discount {
            next.discount = discount.unwrap_or_default();
        }
        if let Some(previous_price) = patch.previous_price {
            next.previous_price = previous_price
                .map(|p| money("previousPrice", p))
                .transpose()?;
        }
        if let Some(thumbnail) = patch.thumbnail {
            next.thumbnail = optional_text(thumbnail);
        }
        if let Some(duration) = patch.duration {
            next.duration = optional_text(duration);
        }
        if let Some(drafts) = patch.lessons {
            let existing: HashSet<_> = self.lessons.iter().map(|l| l.id).collect();
            let mut lessons = build_lessons(drafts, &existing)?;
            sort_lessons(&mut lessons);
            next.lessons = lessons;
        }

        *self = next;
        Ok(())
    }

    /// Pre-discount price implied by `price` and `discount`.
    ///
    /// Only defined for a discount strictly between 0 and 100 percent.
    /// Rounded to cents.
    pub fn derived_previous_price(&self) -> Option<f64> {
        let d = self.discount.value();
        if d == 0 || d >= 100 {
            return None;
        }
        let raw = self.price / (1.0 - self.discount.as_fraction());
        Some((raw * 100.0).round() / 100.0)
    }

    /// Stored previous price if present, otherwise the derived one.
    pub fn display_previous_price(&self) -> Option<f64> {
        self.previous_price.or_else(|| self.derived_previous_price())
    }

    pub fn average_rating(&self) -> f64 {
        average_rating(&self.ratings)
    }

    pub fn rating_by(&self, user_id: &UserId) -> Option<&Rating> {
        self.ratings.iter().find(|r| &r.user_id == user_id)
    }

    /// Appends a rating, enforcing one rating per user.
    pub fn add_rating(
        &mut self,
        user_id: UserId,
        value: RatingValue,
        comment: Option<String>,
    ) -> Result<&Rating, CatalogError> {
        if self.rating_by(&user_id).is_some() {
            return Err(CatalogError::AlreadyRated(self.id));
        }
        let rating = Rating::new(user_id, value, comment)?;
        self.ratings.push(rating);
        let last = self.ratings.len() - 1;
        Ok(&self.ratings[last])
    }

    /// Removes a rating that belongs to `user_id`.
    ///
    /// A missing rating and a rating owned by someone else produce the same
    /// error.
    pub fn remove_rating(
        &mut self,
        rating_id: &RatingId,
        user_id: &UserId,
    ) -> Result<Rating, CatalogError> {
        let index = self
            .ratings
            .iter()
            .position(|r| &r.id == rating_id && &r.user_id == user_id)
            .ok_or(CatalogError::RatingNotFoundOrForbidden)?;
        Ok(self.ratings.remove(index))
    }

    pub fn rating_views(&self, names: &HashMap<UserId, String>) -> Vec<RatingView> {
        self.ratings
            .iter()
            .map(|r| RatingView::resolve(r, names))
            .collect()
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary::from(self)
    }

    pub fn detail(&self, names: &HashMap<UserId, String>) -> CourseDetail {
        let mut lessons = self.lessons.clone();
        sort_lessons(&mut lessons);
        CourseDetail {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            student_description: self.student_description.clone(),
            instructor: self.instructor.clone(),
            price: self.price,
            discount: self.discount,
            previous_price: self.display_previous_price(),
            thumbnail: self.thumbnail.clone(),
            duration: self.duration.clone(),
            rating: self.average_rating(),
            lessons,
            ratings: self.rating_views(names),
            enrolled_count: self.enrolled_students.len(),
            created_at: self.created_at,
        }
    }
}

/// Catalog listing entry: lesson count instead of lesson bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub instructor: String,
    pub price: f64,
    pub discount: Percentage,
    pub previous_price: Option<f64>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub lessons_count: usize,
    pub rating: f64,
    pub ratings_count: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            student_description: course.student_description.clone(),
            instructor: course.instructor.clone(),
            price: course.price,
            discount: course.discount,
            previous_price: course.display_previous_price(),
            thumbnail: course.thumbnail.clone(),
            duration: course.duration.clone(),
            lessons_count: course.lessons.len(),
            rating: course.average_rating(),
            ratings_count: course.ratings.len(),
        }
    }
}

/// Full course as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub instructor: String,
    pub price: f64,
    pub discount: Percentage,
    pub previous_price: Option<f64>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub rating: f64,
    pub lessons: Vec<Lesson>,
    pub ratings: Vec<RatingView>,
    pub enrolled_count: usize,
    pub created_at: Timestamp,
}
