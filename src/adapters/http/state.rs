//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::admin::{
    DeleteUserHandler, GetStatsHandler, ListCourseRostersHandler, ListUsersHandler,
    SetAdminHandler,
};
use crate::application::handlers::auth::{
    GetCurrentUserHandler, LoginHandler, MarkLessonCompleteHandler, MarkLessonNotCompleteHandler,
    RegisterHandler,
};
use crate::application::handlers::billing::{
    CreateCheckoutSessionHandler, HandlePaymentWebhookHandler,
};
use crate::application::handlers::catalog::{
    AddRatingHandler, CreateCourseHandler, DeleteCourseHandler, DeleteRatingHandler,
    GetCourseHandler, ListCoursesHandler, ListRatingsHandler, UpdateCourseHandler,
};
use crate::application::handlers::enrollment::EnrollHandler;
use crate::config::AppConfig;
use crate::domain::billing::StripeWebhookVerifier;
use crate::ports::{
    AccessGate, CourseRepository, EnrollmentRepository, PasswordHasher, PaymentProvider,
    SessionValidator, TokenIssuer, UserRepository,
};

/// Plain values the handlers need from configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub password_min_length: usize,
    pub allow_direct_enroll: bool,
    /// Lowercase ISO code sent to the payment processor.
    pub currency: String,
    /// Frontend origin that checkout redirects back to, without trailing slash.
    pub frontend_base: String,
}

impl AppSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            password_min_length: config.auth.password_min_length,
            allow_direct_enroll: config.payment.allow_direct_enroll,
            currency: config.payment.currency.clone(),
            frontend_base: config.payment.frontend_base().to_string(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            allow_direct_enroll: false,
            currency: "usd".to_string(),
            frontend_base: "http://localhost:5173".to_string(),
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; every field is cheap to clone. Handlers are built on
/// demand from it.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
    pub gate: Arc<dyn AccessGate>,
    pub payments: Arc<dyn PaymentProvider>,
    pub webhook_verifier: StripeWebhookVerifier,
    pub settings: AppSettings,
}

impl AppState {
    // ─── account ────────────────────────────────────────────────────────────

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.settings.password_min_length,
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn mark_complete_handler(&self) -> MarkLessonCompleteHandler {
        MarkLessonCompleteHandler::new(self.users.clone())
    }

    pub fn mark_not_complete_handler(&self) -> MarkLessonNotCompleteHandler {
        MarkLessonNotCompleteHandler::new(self.users.clone())
    }

    // ─── catalog ────────────────────────────────────────────────────────────

    pub fn list_courses_handler(&self) -> ListCoursesHandler {
        ListCoursesHandler::new(self.courses.clone())
    }

    pub fn get_course_handler(&self) -> GetCourseHandler {
        GetCourseHandler::new(self.courses.clone(), self.users.clone())
    }

    pub fn create_course_handler(&self) -> CreateCourseHandler {
        CreateCourseHandler::new(self.gate.clone(), self.courses.clone())
    }

    pub fn update_course_handler(&self) -> UpdateCourseHandler {
        UpdateCourseHandler::new(self.gate.clone(), self.courses.clone(), self.users.clone())
    }

    pub fn delete_course_handler(&self) -> DeleteCourseHandler {
        DeleteCourseHandler::new(self.gate.clone(), self.courses.clone())
    }

    pub fn list_ratings_handler(&self) -> ListRatingsHandler {
        ListRatingsHandler::new(self.courses.clone(), self.users.clone())
    }

    pub fn add_rating_handler(&self) -> AddRatingHandler {
        AddRatingHandler::new(self.courses.clone(), self.users.clone())
    }

    pub fn delete_rating_handler(&self) -> DeleteRatingHandler {
        DeleteRatingHandler::new(self.courses.clone(), self.users.clone())
    }

    pub fn enroll_handler(&self) -> EnrollHandler {
        EnrollHandler::new(
            self.gate.clone(),
            self.enrollments.clone(),
            self.settings.allow_direct_enroll,
        )
    }

    // ─── billing ────────────────────────────────────────────────────────────

    pub fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.courses.clone(),
            self.payments.clone(),
            self.settings.currency.clone(),
            self.settings.frontend_base.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.webhook_verifier.clone(), self.enrollments.clone())
    }

    // ─── admin ──────────────────────────────────────────────────────────────

    pub fn course_rosters_handler(&self) -> ListCourseRostersHandler {
        ListCourseRostersHandler::new(self.gate.clone(), self.courses.clone(), self.users.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.gate.clone(), self.users.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.gate.clone(), self.users.clone())
    }

    pub fn set_admin_handler(&self) -> SetAdminHandler {
        SetAdminHandler::new(self.gate.clone(), self.users.clone())
    }

    pub fn stats_handler(&self) -> GetStatsHandler {
        GetStatsHandler::new(self.gate.clone(), self.courses.clone())
    }
}
