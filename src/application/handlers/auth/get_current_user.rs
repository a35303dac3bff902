//! GetCurrentUserHandler - Query handler for the caller's own account.

use std::sync::Arc;

use crate::domain::account::{AccountError, PublicUserView};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

/// Query for the caller's account. `caller` is `None` for guests.
#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub caller: Option<UserId>,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns `None` for an anonymous caller.
    pub async fn handle(
        &self,
        query: GetCurrentUserQuery,
    ) -> Result<Option<PublicUserView>, AccountError> {
        let Some(id) = query.caller else {
            return Ok(None);
        };

        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(AccountError::UserNotFound(id))?;

        Ok(Some(user.public_view()))
    }
}
