//! HTTP adapter for payment processor callbacks.

mod handlers;
mod routes;

pub use handlers::WebhookAck;
pub use routes::webhook_routes;
