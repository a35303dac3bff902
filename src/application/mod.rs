//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::auth::{AuthSession, LoginHandler, RegisterHandler};
pub use handlers::billing::{HandlePaymentWebhookHandler, HandlePaymentWebhookResult};
