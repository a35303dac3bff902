//! Course Market - e-learning marketplace backend
//!
//! Public course catalog, account registration and login, paid enrollment
//! through a payment processor, lesson progress, course ratings and an admin
//! back-office, organised as domain / ports / adapters / application layers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
