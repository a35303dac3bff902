//! HTTP adapter - the REST API.
//!
//! One submodule per area, each with its DTOs, axum handlers and routes:
//! - `account` - `/api/auth`
//! - `catalog` - `/api/courses`
//! - `admin` - `/api/admin`
//! - `billing` - `/webhook`

pub mod account;
pub mod admin;
pub mod billing;
pub mod catalog;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::{AppSettings, AppState};
