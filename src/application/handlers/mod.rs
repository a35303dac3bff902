//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler holds the ports it needs and is cheap to build per request.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod catalog;
pub mod enrollment;

#[cfg(test)]
pub(crate) mod test_support;
