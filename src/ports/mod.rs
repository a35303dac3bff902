//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Accounts and lesson progress
//! - `CourseRepository` - Courses with embedded lessons and ratings
//! - `EnrollmentRepository` - The user/course enrollment relation
//!
//! ## Identity Ports
//!
//! - `PasswordHasher` - Salted one-way password hashing
//! - `TokenIssuer` / `SessionValidator` - Bearer token issue and validation
//! - `AccessGate` - Role and capability checks
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - Hosted checkout sessions

mod access_gate;
mod course_repository;
mod enrollment_repository;
mod password_hasher;
mod payment_provider;
mod session_validator;
mod token_issuer;
mod user_repository;

pub use access_gate::AccessGate;
pub use course_repository::CourseRepository;
pub use enrollment_repository::{EnrollOutcome, EnrollmentRepository};
pub use password_hasher::PasswordHasher;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};
pub use session_validator::SessionValidator;
pub use token_issuer::TokenIssuer;
pub use user_repository::UserRepository;
