//! Fixtures shared by handler tests.

use std::sync::Arc;

use chrono::Duration;
use secrecy::SecretString;

use crate::adapters::auth::{JwtTokenService, RoleAccessGate};
use crate::adapters::memory::InMemoryStore;
use crate::domain::account::User;
use crate::domain::catalog::{Course, CourseDraft, LessonDraft};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{
    AccessGate, CourseRepository, EnrollmentRepository, PasswordHasher, UserRepository,
};

/// Reversible "hash" so tests skip Argon2's cost.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain${}", password))
    }
}

/// One in-memory store seen through every repository port.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    pub fn courses(&self) -> Arc<dyn CourseRepository> {
        self.store.clone()
    }

    pub fn enrollments(&self) -> Arc<dyn EnrollmentRepository> {
        self.store.clone()
    }

    pub fn gate(&self) -> Arc<dyn AccessGate> {
        Arc::new(RoleAccessGate::new(self.users()))
    }

    pub async fn user(&self, name: &str) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        let user = User::register(name, &email, format!("plain${}-password", name)).unwrap();
        UserRepository::create(self.store.as_ref(), &user).await.unwrap();
        user
    }

    pub async fn admin(&self, name: &str) -> User {
        let user = self.user(name).await;
        self.store.set_admin(&user.id, true).await.unwrap().unwrap()
    }

    pub async fn course(&self, title: &str, price: f64) -> Course {
        let course = Course::create(CourseDraft {
            title: title.to_string(),
            instructor: Some("Ferris".to_string()),
            price,
            lessons: vec![
                LessonDraft {
                    title: "Intro".to_string(),
                    ..Default::default()
                },
                LessonDraft {
                    title: "Ownership".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
        .unwrap();
        CourseRepository::create(self.store.as_ref(), &course)
            .await
            .unwrap();
        course
    }

    pub async fn enroll(&self, user_id: &UserId, course: &Course) {
        self.store.enroll(user_id, &course.id).await.unwrap();
    }
}

pub fn token_service() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(
        SecretString::new("test-secret-that-is-long-enough-for-hs256".to_string()),
        Duration::hours(24),
    ))
}
