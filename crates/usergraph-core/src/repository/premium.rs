//! Premium subscription repository trait definition.

use chrono::{DateTime, Utc};
use usergraph_types::error::RepositoryError;
use usergraph_types::id::UserId;
use usergraph_types::premium::Premium;

/// Repository trait for premium subscriptions (at most one per user).
pub trait PremiumRepository: Send + Sync {
    /// The user's subscription, expired or not.
    fn get_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<Premium>, RepositoryError>> + Send;

    /// Create the user's subscription, replacing any existing row.
    fn upsert(
        &self,
        user_id: UserId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Premium, RepositoryError>> + Send;
}
