//! Authorization port for capability-gated operations.
//!
//! An unknown user or a role lacking the capability is denied with
//! `Forbidden`. A failed role lookup surfaces as its own error, and
//! [`AccessGate::allows`] treats it as a denial.
//!
//! # Example
//!
//! ```ignore
//! async fn delete_course(gate: &dyn AccessGate, caller: &UserId) -> Result<(), DomainError> {
//!     gate.require(caller, Capability::ManageCourses).await?;
//!     // ... mutate the catalog
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{Capability, DomainError, Role, UserId};

/// Resolves a caller's role on every request and checks a capability.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Returns the caller's current role, or `None` if the account is gone.
    async fn role_of(&self, user_id: &UserId) -> Result<Option<Role>, DomainError>;

    /// Fails with `Forbidden` unless the caller's role grants `capability`.
    /// Store failures are returned unchanged.
    async fn require(&self, user_id: &UserId, capability: Capability) -> Result<(), DomainError>;

    /// Non-failing variant of [`require`](Self::require).
    async fn allows(&self, user_id: &UserId, capability: Capability) -> bool {
        self.require(user_id, capability).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_gate_is_object_safe() {
        fn _accepts_dyn(_gate: &dyn AccessGate) {}
    }
}
