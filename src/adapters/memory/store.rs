//! In-process implementation of the persistence ports.
//!
//! Mirrors the relational schema: enrollments are one relation projected
//! onto both users and courses, ratings are unique per (course, user), and
//! deleting a user or course removes what references it. Every operation
//! takes the single state lock once, so each call is atomic.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::account::User;
use crate::domain::catalog::{Course, Rating};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, LessonId, RatingId, UserId};
use crate::ports::{CourseRepository, EnrollOutcome, EnrollmentRepository, UserRepository};

#[derive(Default)]
struct State {
    /// Creation order is preserved.
    users: Vec<User>,
    courses: Vec<Course>,
    enrollments: BTreeSet<(UserId, CourseId)>,
}

impl State {
    fn user_index(&self, id: &UserId) -> Option<usize> {
        self.users.iter().position(|u| &u.id == id)
    }

    fn course_index(&self, id: &CourseId) -> Option<usize> {
        self.courses.iter().position(|c| &c.id == id)
    }

    fn project_user(&self, user: &User) -> User {
        let mut user = user.clone();
        user.enrolled_courses = self
            .enrollments
            .iter()
            .filter(|(u, _)| u == &user.id)
            .map(|(_, c)| *c)
            .collect();
        user
    }

    fn project_course(&self, course: &Course) -> Course {
        let mut course = course.clone();
        course.enrolled_students = self
            .enrollments
            .iter()
            .filter(|(_, c)| c == &course.id)
            .map(|(u, _)| *u)
            .collect();
        course
    }

    fn user_at(&self, index: usize) -> User {
        self.project_user(&self.users[index])
    }
}

/// Mutex-guarded store implementing [`UserRepository`], [`CourseRepository`]
/// and [`EnrollmentRepository`].
///
/// Used by the test suites and for running the server without a database.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned"))
    }
}

fn course_not_found(id: &CourseId) -> DomainError {
    DomainError::new(ErrorCode::CourseNotFound, "Course not found")
        .with_detail("course_id", id.to_string())
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("user_id", id.to_string())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state()?;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::new(ErrorCode::EmailTaken, "Email already registered")
                .with_detail("email", user.email.clone()));
        }
        let mut stored = user.clone();
        stored.enrolled_courses.clear();
        state.users.push(stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let state = self.state()?;
        Ok(state.user_index(id).map(|i| state.user_at(i)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state()?;
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| state.project_user(u)))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let state = self.state()?;
        Ok(state
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(|u| state.project_user(u))
            .collect())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let state = self.state()?;
        Ok(state.users.iter().map(|u| state.project_user(u)).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut state = self.state()?;
        let Some(index) = state.user_index(id) else {
            return Ok(false);
        };
        state.users.remove(index);
        state.enrollments.retain(|(u, _)| u != id);
        for course in state.courses.iter_mut() {
            course.ratings.retain(|r| &r.user_id != id);
        }
        Ok(true)
    }

    async fn set_admin(&self, id: &UserId, is_admin: bool) -> Result<Option<User>, DomainError> {
        let mut state = self.state()?;
        let Some(index) = state.user_index(id) else {
            return Ok(None);
        };
        state.users[index].is_admin = is_admin;
        Ok(Some(state.user_at(index)))
    }

    async fn add_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.state()?;
        let Some(index) = state.user_index(id) else {
            return Ok(None);
        };
        state.users[index].mark_lesson_complete(*lesson_id);
        Ok(Some(state.user_at(index)))
    }

    async fn remove_completed_lesson(
        &self,
        id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.state()?;
        let Some(index) = state.user_index(id) else {
            return Ok(None);
        };
        state.users[index].mark_lesson_not_complete(lesson_id);
        Ok(Some(state.user_at(index)))
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let state = self.state()?;
        Ok(state.courses.iter().map(|c| state.project_course(c)).collect())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let state = self.state()?;
        Ok(state
            .course_index(id)
            .map(|i| state.project_course(&state.courses[i])))
    }

    async fn create(&self, course: &Course) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let mut stored = course.clone();
        stored.enrolled_students.clear();
        state.courses.push(stored);
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let index = state
            .course_index(&course.id)
            .ok_or_else(|| course_not_found(&course.id))?;
        let stored = &mut state.courses[index];
        let ratings = std::mem::take(&mut stored.ratings);
        *stored = Course {
            ratings,
            enrolled_students: BTreeSet::new(),
            ..course.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError> {
        let mut state = self.state()?;
        let Some(index) = state.course_index(id) else {
            return Ok(false);
        };
        state.courses.remove(index);
        state.enrollments.retain(|(_, c)| c != id);
        Ok(true)
    }

    async fn add_rating(&self, course_id: &CourseId, rating: &Rating) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let index = state
            .course_index(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        if state.user_index(&rating.user_id).is_none() {
            return Err(user_not_found(&rating.user_id));
        }
        let course = &mut state.courses[index];
        if course.rating_by(&rating.user_id).is_some() {
            return Err(DomainError::new(ErrorCode::AlreadyRated, "Already rated")
                .with_detail("course_id", course_id.to_string()));
        }
        course.ratings.push(rating.clone());
        Ok(())
    }

    async fn delete_rating(
        &self,
        course_id: &CourseId,
        rating_id: &RatingId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        let mut state = self.state()?;
        let index = state
            .course_index(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        state.courses[index]
            .remove_rating(rating_id, user_id)
            .map(|_| ())
            .map_err(|_| DomainError::new(ErrorCode::RatingNotFound, "Rating not found"))
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn enroll(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, DomainError> {
        let mut state = self.state()?;
        if state.user_index(user_id).is_none() {
            return Err(user_not_found(user_id));
        }
        if state.course_index(course_id).is_none() {
            return Err(course_not_found(course_id));
        }
        if state.enrollments.insert((*user_id, *course_id)) {
            Ok(EnrollOutcome::Enrolled)
        } else {
            Ok(EnrollOutcome::AlreadyEnrolled)
        }
    }

    async fn is_enrolled(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        Ok(self.state()?.enrollments.contains(&(*user_id, *course_id)))
    }
}
