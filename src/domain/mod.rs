//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, value objects, roles, errors)
//! - `account` - Registered users and their lesson progress
//! - `catalog` - Courses, lessons and ratings
//! - `billing` - Checkout pricing and payment webhook verification

pub mod account;
pub mod billing;
pub mod catalog;
pub mod foundation;
