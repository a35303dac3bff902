//! Admin back-office handlers.
//!
//! Every handler here checks the caller's capability through the
//! `AccessGate` before reading or writing anything.
//!
//! ## Commands
//! - Deleting an account
//! - Granting and revoking admin
//!
//! ## Queries
//! - Courses with their enrolled students
//! - All accounts
//! - Revenue and enrollment statistics

mod delete_user;
mod get_stats;
mod list_course_rosters;
mod list_users;
mod set_admin;

// Commands
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use set_admin::{SetAdminCommand, SetAdminHandler};

// Queries
pub use get_stats::{CatalogStats, GetStatsHandler, GetStatsQuery};
pub use list_course_rosters::{
    CourseRoster, ListCourseRostersHandler, ListCourseRostersQuery, StudentRef,
};
pub use list_users::{ListUsersHandler, ListUsersQuery};
