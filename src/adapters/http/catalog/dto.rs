//! HTTP DTOs for catalog endpoints.
//!
//! Course bodies are shared with the admin API. Field names are camelCase on
//! the wire.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::domain::catalog::{CatalogError, CourseDraft, CoursePatch, LessonDraft, RatingView};
use crate::domain::foundation::Percentage;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A lesson inside a course body. Entries with an `id` keep it across updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub student_description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

impl LessonRequest {
    fn into_draft(self) -> Result<LessonDraft, ApiError> {
        let id = self
            .id
            .as_deref()
            .map(|raw| parse_id(raw, "lesson_id"))
            .transpose()?;
        Ok(LessonDraft {
            id,
            title: self.title,
            description: self.description,
            student_description: self.student_description,
            video_url: self.video_url,
            order: self.order,
        })
    }
}

fn lesson_drafts(lessons: Vec<LessonRequest>) -> Result<Vec<LessonDraft>, ApiError> {
    lessons.into_iter().map(LessonRequest::into_draft).collect()
}

fn percentage(value: i64) -> Result<Percentage, ApiError> {
    Percentage::try_new(value).map_err(|e| CatalogError::from(e).into())
}

/// Body of `POST /api/courses` and `POST /api/admin/courses`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub student_description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[validate(range(min = 0.0, max = 1_000_000_000.0, message = "must be between 0 and 1000000000"))]
    pub price: f64,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub previous_price: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonRequest>,
}

impl CreateCourseRequest {
    pub fn into_draft(self) -> Result<CourseDraft, ApiError> {
        Ok(CourseDraft {
            title: self.title,
            description: self.description,
            student_description: self.student_description,
            instructor: self.instructor,
            price: self.price,
            discount: self.discount.map(percentage).transpose()?,
            previous_price: self.previous_price,
            thumbnail: self.thumbnail,
            duration: self.duration,
            lessons: lesson_drafts(self.lessons)?,
        })
    }
}

/// Body of `PUT /api/admin/courses/:id`.
///
/// Absent fields stay as they are. `null` clears optional fields and resets
/// the discount; `null` for title or price is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub student_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub instructor: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub previous_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lessons: Option<Option<Vec<LessonRequest>>>,
}

fn not_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ApiError> {
    match value {
        Some(None) => Err(CatalogError::validation(field, "cannot be null").into()),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

impl UpdateCourseRequest {
    pub fn into_patch(self) -> Result<CoursePatch, ApiError> {
        Ok(CoursePatch {
            title: not_null("title", self.title)?,
            description: self.description,
            student_description: self.student_description,
            instructor: self.instructor,
            price: not_null("price", self.price)?,
            discount: self
                .discount
                .map(|d| d.map(percentage).transpose())
                .transpose()?,
            previous_price: self.previous_price,
            thumbnail: self.thumbnail,
            duration: self.duration,
            lessons: not_null("lessons", self.lessons)?
                .map(lesson_drafts)
                .transpose()?,
        })
    }
}

/// Body of `POST /api/courses/:id/ratings`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRequest {
    pub value: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RatingsResponse {
    pub message: &'static str,
    pub ratings: Vec<RatingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub url: String,
    pub session_id: String,
}
