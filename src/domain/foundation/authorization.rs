//! Roles and capabilities.
//!
//! Authorization is expressed as "does this role grant that capability"
//! rather than as a raw admin flag, so that new roles can be introduced by
//! extending [`Role::grants`] without touching the handlers that ask.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by an account, derived from its stored flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// An operation class that is not open to every authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, update and delete catalog entries.
    ManageCourses,
    /// List and delete accounts, grant and revoke admin.
    ManageUsers,
    /// Read revenue and enrollment statistics.
    ViewStats,
    /// Enroll in a course without going through checkout.
    EnrollWithoutPayment,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::Student
        }
    }

    pub fn grants(&self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Admin, _) => true,
            (Role::Student, _) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::ManageCourses => "manage_courses",
            Capability::ManageUsers => "manage_users",
            Capability::ViewStats => "view_stats",
            Capability::EnrollWithoutPayment => "enroll_without_payment",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Capability; 4] = [
        Capability::ManageCourses,
        Capability::ManageUsers,
        Capability::ViewStats,
        Capability::EnrollWithoutPayment,
    ];

    #[test]
    fn admin_flag_maps_to_role() {
        assert_eq!(Role::from_admin_flag(true), Role::Admin);
        assert_eq!(Role::from_admin_flag(false), Role::Student);
    }

    #[test]
    fn admin_holds_every_capability() {
        for cap in ALL {
            assert!(Role::Admin.grants(cap), "admin should hold {}", cap);
        }
    }

    #[test]
    fn student_holds_no_management_capability() {
        for cap in ALL {
            assert!(!Role::Student.grants(cap), "student should not hold {}", cap);
        }
    }
}
