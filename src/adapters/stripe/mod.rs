//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for hosted one-shot checkout.
//! Webhook signature verification is provider-agnostic in shape and lives
//! with the billing domain.
//!
//! # Configuration
//!
//! Read from `payment.stripe_api_key`; see `config::PaymentConfig`.

mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeCheckoutAdapter, StripeConfig};
