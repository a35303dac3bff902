//! Enrollment handlers.
//!
//! ## Commands
//! - Direct enrollment without checkout
//!
//! Paid enrollment goes through `billing::HandlePaymentWebhookHandler`.

mod enroll;

pub use enroll::{EnrollCommand, EnrollHandler};
