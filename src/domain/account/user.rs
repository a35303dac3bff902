//! User account aggregate and its public projection.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::foundation::{
    CourseId, LessonId, Role, Timestamp, UserId, ValidationError,
};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;

/// A registered account.
///
/// `enrolled_courses` and `completed_lessons` are sets: membership matters,
/// order does not. Completed lessons are weak references and may name
/// lessons that no longer exist.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub enrolled_courses: BTreeSet<CourseId>,
    pub completed_lessons: BTreeSet<LessonId>,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a new non-admin account from already-validated parts.
    pub fn register(
        name: &str,
        email: &str,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: UserId::new(),
            name: normalize_name(name)?,
            email: normalize_email(email)?,
            password_hash: password_hash.into(),
            is_admin: false,
            enrolled_courses: BTreeSet::new(),
            completed_lessons: BTreeSet::new(),
            created_at: Timestamp::now(),
        })
    }

    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }

    pub fn is_enrolled_in(&self, course_id: &CourseId) -> bool {
        self.enrolled_courses.contains(course_id)
    }

    /// Adds a lesson to the completed set. Returns false if already present.
    pub fn mark_lesson_complete(&mut self, lesson_id: LessonId) -> bool {
        self.completed_lessons.insert(lesson_id)
    }

    /// Removes a lesson from the completed set. Returns false if absent.
    pub fn mark_lesson_not_complete(&mut self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.remove(lesson_id)
    }

    pub fn public_view(&self) -> PublicUserView {
        PublicUserView::from(self)
    }
}

/// Everything about an account that may leave the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub enrolled_courses: Vec<CourseId>,
    pub completed_lessons: Vec<LessonId>,
    pub created_at: Timestamp,
}

impl From<&User> for PublicUserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            enrolled_courses: user.enrolled_courses.iter().copied().collect(),
            completed_lessons: user.completed_lessons.iter().copied().collect(),
            created_at: user.created_at,
        }
    }
}

/// Trims and lowercases an email address, rejecting obviously malformed ones.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::invalid_format("email", "too long"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid_format("email", "not an email address")),
    }
}

fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::out_of_range(
            "name",
            1,
            MAX_NAME_LEN as i64,
            name.chars().count() as i64,
        ));
    }
    Ok(name.to_string())
}
