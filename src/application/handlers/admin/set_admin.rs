//! SetAdminHandler - Command handler for granting and revoking admin.

use std::sync::Arc;

use crate::domain::account::{AccountError, PublicUserView};
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, UserRepository};

/// `is_admin: true` grants, `false` revokes.
#[derive(Debug, Clone)]
pub struct SetAdminCommand {
    pub caller: UserId,
    pub user_id: UserId,
    pub is_admin: bool,
}

/// Sets another account's admin flag.
///
/// Granting is idempotent. An admin may not revoke their own flag, so the
/// system cannot be left without the caller's access by accident.
pub struct SetAdminHandler {
    gate: Arc<dyn AccessGate>,
    users: Arc<dyn UserRepository>,
}

impl SetAdminHandler {
    pub fn new(gate: Arc<dyn AccessGate>, users: Arc<dyn UserRepository>) -> Self {
        Self { gate, users }
    }

    pub async fn handle(&self, cmd: SetAdminCommand) -> Result<PublicUserView, AccountError> {
        self.gate
            .require(&cmd.caller, Capability::ManageUsers)
            .await?;

        if cmd.caller == cmd.user_id && !cmd.is_admin {
            return Err(AccountError::CannotModifySelf);
        }

        let user = self
            .users
            .set_admin(&cmd.user_id, cmd.is_admin)
            .await?
            .ok_or(AccountError::UserNotFound(cmd.user_id))?;

        tracing::info!(
            user_id = %cmd.user_id,
            admin_id = %cmd.caller,
            is_admin = cmd.is_admin,
            "Admin flag changed"
        );
        Ok(user.public_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;
    use crate::application::handlers::test_support::Fixture;

    fn cmd(caller: UserId, user_id: UserId, is_admin: bool) -> SetAdminCommand {
        SetAdminCommand { caller, user_id, is_admin }
    }

    #[tokio::test]
    async fn grant_takes_effect_on_next_check() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        let ada = fx.user("Ada").await;

        let view = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(root.id, ada.id, true))
            .await
            .unwrap();

        assert!(view.is_admin);
        assert_eq!(fx.gate().role_of(&ada.id).await.unwrap(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn revoke_demotes_another_admin() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        let other = fx.admin("Other").await;

        let view = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(root.id, other.id, false))
            .await
            .unwrap();

        assert!(!view.is_admin);
        assert!(!fx.gate().allows(&other.id, Capability::ManageUsers).await);
    }

    #[tokio::test]
    async fn admin_cannot_revoke_self() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;

        let result = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(root.id, root.id, false))
            .await;
        assert_eq!(result.unwrap_err(), AccountError::CannotModifySelf);
    }

    #[tokio::test]
    async fn granting_self_is_a_no_op() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;

        let view = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(root.id, root.id, true))
            .await
            .unwrap();
        assert!(view.is_admin);
    }

    #[tokio::test]
    async fn student_cannot_promote_self() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;

        let result = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(ada.id, ada.id, true))
            .await;
        assert!(matches!(result, Err(AccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        let ghost = UserId::new();

        let result = SetAdminHandler::new(fx.gate(), fx.users())
            .handle(cmd(root.id, ghost, true))
            .await;
        assert_eq!(result.unwrap_err(), AccountError::UserNotFound(ghost));
    }
}
