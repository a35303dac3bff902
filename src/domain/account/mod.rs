//! Account module - registered users, their progress and their public view.

mod errors;
mod user;

pub use errors::AccountError;
pub use user::{normalize_email, PublicUserView, User};
