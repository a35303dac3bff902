//! DeleteUserHandler - Command handler for removing an account.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, UserRepository};

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub caller: UserId,
    pub user_id: UserId,
}

/// Deletes an account together with its enrollments, ratings and progress.
///
/// An admin cannot delete their own account.
pub struct DeleteUserHandler {
    gate: Arc<dyn AccessGate>,
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(gate: Arc<dyn AccessGate>, users: Arc<dyn UserRepository>) -> Self {
        Self { gate, users }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), AccountError> {
        // 1. Authorize
        self.gate
            .require(&cmd.caller, Capability::ManageUsers)
            .await?;

        // 2. Never remove the acting admin
        if cmd.caller == cmd.user_id {
            return Err(AccountError::CannotModifySelf);
        }

        // 3. Delete
        if !self.users.delete(&cmd.user_id).await? {
            return Err(AccountError::UserNotFound(cmd.user_id));
        }

        tracing::info!(user_id = %cmd.user_id, admin_id = %cmd.caller, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::catalog::{Rating, RatingValue};

    #[tokio::test]
    async fn deletion_takes_ratings_and_enrollments_along() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        let ada = fx.user("Ada").await;
        let course = fx.course("Rust", 10.0).await;
        fx.enroll(&ada.id, &course).await;
        let rating = Rating::new(ada.id, RatingValue::try_new(5).unwrap(), None).unwrap();
        fx.courses().add_rating(&course.id, &rating).await.unwrap();

        DeleteUserHandler::new(fx.gate(), fx.users())
            .handle(DeleteUserCommand { caller: root.id, user_id: ada.id })
            .await
            .unwrap();

        assert!(fx.users().find_by_id(&ada.id).await.unwrap().is_none());
        let stored = fx.courses().find_by_id(&course.id).await.unwrap().unwrap();
        assert!(stored.ratings.is_empty());
        assert!(stored.enrolled_students.is_empty());
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;

        let result = DeleteUserHandler::new(fx.gate(), fx.users())
            .handle(DeleteUserCommand { caller: root.id, user_id: root.id })
            .await;

        assert_eq!(result.unwrap_err(), AccountError::CannotModifySelf);
        assert!(fx.users().find_by_id(&root.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let fx = Fixture::new();
        let root = fx.admin("Root").await;
        let ghost = UserId::new();

        let result = DeleteUserHandler::new(fx.gate(), fx.users())
            .handle(DeleteUserCommand { caller: root.id, user_id: ghost })
            .await;
        assert_eq!(result.unwrap_err(), AccountError::UserNotFound(ghost));
    }

    #[tokio::test]
    async fn student_cannot_delete_others() {
        let fx = Fixture::new();
        let ada = fx.user("Ada").await;
        let bea = fx.user("Bea").await;

        let result = DeleteUserHandler::new(fx.gate(), fx.users())
            .handle(DeleteUserCommand { caller: ada.id, user_id: bea.id })
            .await;
        assert!(matches!(result, Err(AccountError::Forbidden(_))));
    }
}
