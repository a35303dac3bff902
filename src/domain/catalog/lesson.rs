//! Lessons embedded in a course.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::foundation::{LessonId, ValidationError};

use super::text::{optional_text, required_text};

/// A lesson owned by exactly one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub video_url: Option<String>,
    pub order: i32,
}

/// Lesson fields as submitted by an admin. A draft whose `id` names a lesson
/// the course already has keeps that identifier; any other draft gets a
/// fresh id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonDraft {
    pub id: Option<LessonId>,
    pub title: String,
    pub description: Option<String>,
    pub student_description: Option<String>,
    pub video_url: Option<String>,
    pub order: Option<i32>,
}

impl Lesson {
    fn from_draft(
        draft: LessonDraft,
        position: usize,
        existing: &HashSet<LessonId>,
    ) -> Result<Self, ValidationError> {
        let id = draft
            .id
            .filter(|id| existing.contains(id))
            .unwrap_or_default();
        Ok(Self {
            id,
            title: required_text("lessons.title", &draft.title)?,
            description: optional_text(draft.description),
            student_description: optional_text(draft.student_description),
            video_url: optional_text(draft.video_url),
            order: draft.order.unwrap_or(position as i32),
        })
    }
}

/// Builds a lesson list from drafts. Ids found in `existing` are preserved;
/// unknown ids are replaced, and the same id listed twice is rejected.
pub(crate) fn build_lessons(
    drafts: Vec<LessonDraft>,
    existing: &HashSet<LessonId>,
) -> Result<Vec<Lesson>, ValidationError> {
    let mut seen = HashSet::new();
    let mut lessons = Vec::with_capacity(drafts.len());
    for (position, draft) in drafts.into_iter().enumerate() {
        let lesson = Lesson::from_draft(draft, position, existing)?;
        if !seen.insert(lesson.id) {
            return Err(ValidationError::invalid_format(
                "lessons.id",
                format!("lesson {} listed more than once", lesson.id),
            ));
        }
        lessons.push(lesson);
    }
    Ok(lessons)
}

/// Sorts lessons by their order index; ties keep list position.
pub(crate) fn sort_lessons(lessons: &mut [Lesson]) {
    lessons.sort_by_key(|l| l.order);
}
