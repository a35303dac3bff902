//! Billing handlers.
//!
//! ## Commands
//! - Opening a hosted checkout session for a course
//! - Processing the processor's payment webhook

mod create_checkout_session;
mod handle_payment_webhook;

pub use create_checkout_session::{
    CheckoutRedirect, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
