//! HTTP adapter for the admin back-office.

mod handlers;
mod routes;

pub use routes::admin_routes;
