//! Role-based access gate backed by the user store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{Capability, DomainError, ErrorCode, Role, UserId};
use crate::ports::{AccessGate, UserRepository};

/// Loads the caller's admin flag on every check, so role changes apply to
/// tokens that were issued before them.
#[derive(Clone)]
pub struct RoleAccessGate {
    users: Arc<dyn UserRepository>,
}

impl RoleAccessGate {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AccessGate for RoleAccessGate {
    async fn role_of(&self, user_id: &UserId) -> Result<Option<Role>, DomainError> {
        Ok(self.users.find_by_id(user_id).await?.map(|u| u.role()))
    }

    async fn require(&self, user_id: &UserId, capability: Capability) -> Result<(), DomainError> {
        let role = self.role_of(user_id).await.map_err(|err| {
            tracing::error!(user_id = %user_id, error = %err, "role lookup failed");
            err
        })?;

        match role {
            Some(role) if role.grants(capability) => Ok(()),
            _ => {
                tracing::warn!(user_id = %user_id, capability = %capability, "access denied");
                Err(DomainError::new(ErrorCode::Forbidden, "Admin access required")
                    .with_detail("capability", capability.to_string()))
            }
        }
    }
}
