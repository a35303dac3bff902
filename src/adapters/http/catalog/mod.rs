//! HTTP adapter for the public catalog, enrollment, checkout and ratings.

pub(crate) mod dto;
mod handlers;
mod routes;

pub use routes::catalog_routes;
