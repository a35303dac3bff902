//! ListUsersHandler - Query handler for all accounts.

use std::sync::Arc;

use crate::domain::account::{AccountError, PublicUserView};
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, UserRepository};

#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub caller: UserId,
}

/// Lists every account, oldest first. Password hashes never leave the
/// public view.
pub struct ListUsersHandler {
    gate: Arc<dyn AccessGate>,
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(gate: Arc<dyn AccessGate>, users: Arc<dyn UserRepository>) -> Self {
        Self { gate, users }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<PublicUserView>, AccountError> {
        self.gate
            .require(&query.caller, Capability::ManageUsers)
            .await?;

        Ok(self
            .users
            .list()
            .await?
            .iter()
            .map(|u| u.public_view())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn admin_sees_everyone_without_hashes() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        fx.user("Ada").await;

        let users = ListUsersHandler::new(fx.gate(), fx.users())
            .handle(ListUsersQuery { caller: root.id })
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        let json = serde_json::to_string(&users).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("plain$"));
    }

    #[tokio::test]
    async fn student_is_forbidden() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;

        let result = ListUsersHandler::new(fx.gate(), fx.users())
            .handle(ListUsersQuery { caller: ada.id })
            .await;
        assert!(matches!(result, Err(AccountError::Forbidden(_))));
    }
}
