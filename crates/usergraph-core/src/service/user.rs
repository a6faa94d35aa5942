//! User registration and lookup.

use usergraph_types::error::{RepositoryError, UserError};
use usergraph_types::id::UserId;
use usergraph_types::user::{CreateUserRequest, User};

use crate::repository::user::UserRepository;

pub struct UserService<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repo: U) -> Self {
        Self { user_repo }
    }

    /// Register a user after trimming and checking username and email.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserError> {
        let request = request.normalized().map_err(UserError::Invalid)?;

        let user = self
            .user_repo
            .create(&request)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(msg) => UserError::Conflict(msg),
                other => UserError::StorageError(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.user_repo
            .get_by_id(id)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?
            .ok_or(UserError::NotFound(id))
    }
}
