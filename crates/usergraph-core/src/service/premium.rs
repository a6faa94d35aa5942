//! Premium subscriptions.
//!
//! A user holds at most one premium record. Buying while it is active fails;
//! buying after it expired replaces the old period.

use chrono::{DateTime, Utc};
use usergraph_types::error::{PremiumError, RepositoryError};
use usergraph_types::id::UserId;
use usergraph_types::premium::{Premium, PremiumPeriod};

use crate::repository::premium::PremiumRepository;
use crate::repository::user::UserRepository;

pub struct PremiumService<P: PremiumRepository, U: UserRepository> {
    premium_repo: P,
    user_repo: U,
}

impl<P: PremiumRepository, U: UserRepository> PremiumService<P, U> {
    pub fn new(premium_repo: P, user_repo: U) -> Self {
        Self {
            premium_repo,
            user_repo,
        }
    }

    /// Start a premium period of the given length from now.
    pub async fn buy_premium(
        &self,
        user_id: UserId,
        period: PremiumPeriod,
    ) -> Result<Premium, PremiumError> {
        self.buy_premium_at(user_id, period, Utc::now()).await
    }

    pub(crate) async fn buy_premium_at(
        &self,
        user_id: UserId,
        period: PremiumPeriod,
        now: DateTime<Utc>,
    ) -> Result<Premium, PremiumError> {
        if !self.user_repo.exists(user_id).await.map_err(storage)? {
            return Err(PremiumError::UserNotFound(user_id));
        }

        let current = self
            .premium_repo
            .get_by_user(user_id)
            .await
            .map_err(storage)?;
        if let Some(active) = current.filter(|p| p.is_active_at(now)) {
            return Err(PremiumError::AlreadyActive {
                user_id,
                until: active.end_date.to_rfc3339(),
            });
        }

        let premium = self
            .premium_repo
            .upsert(user_id, now, period.end_from(now))
            .await
            .map_err(storage)?;
        tracing::info!(%user_id, %period, until = %premium.end_date, "premium purchased");
        Ok(premium)
    }

    /// The user's premium record, active or expired.
    pub async fn get_premium(&self, user_id: UserId) -> Result<Premium, PremiumError> {
        self.premium_repo
            .get_by_user(user_id)
            .await
            .map_err(storage)?
            .ok_or(PremiumError::NotFound(user_id))
    }
}

fn storage(e: RepositoryError) -> PremiumError {
    PremiumError::StorageError(e.to_string())
}
