//! User repository trait definition.

use usergraph_types::error::RepositoryError;
use usergraph_types::id::UserId;
use usergraph_types::user::{CreateUserRequest, User};

/// Repository trait for user persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Insert a user. Duplicate username or email yields `RepositoryError::Conflict`.
    fn create(
        &self,
        request: &CreateUserRequest,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Cheap existence check.
    fn exists(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
