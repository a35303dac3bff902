//! Billing module - paid checkout and the payment webhook that turns a
//! completed purchase into an enrollment.

mod checkout;
mod errors;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use checkout::{price_in_minor_units, CheckoutRedirects, CoursePurchase, SESSION_ID_PLACEHOLDER};
pub use errors::BillingError;
pub use stripe_event::{
    CheckoutSessionObject, StripeEvent, StripeEventData, StripeEventType, METADATA_COURSE_ID,
    METADATA_USER_ID,
};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign_payload, SignatureHeader, StripeWebhookVerifier};
