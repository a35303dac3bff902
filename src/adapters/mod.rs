//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - JWT tokens, Argon2 password hashing, role-based access gate
//! - `http` - axum REST API
//! - `memory` - in-process stores for tests and local runs
//! - `postgres` - sqlx repositories
//! - `stripe` - checkout sessions against the Stripe API

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
