//! Recommendations (with their skill offers) and recommendation requests.

use usergraph_types::error::{RecommendationError, RepositoryError};
use usergraph_types::id::{RecommendationId, RecommendationRequestId, UserId};
use usergraph_types::page::Page;
use usergraph_types::recommendation::{
    CreateRecommendation, CreateRecommendationRequest, Recommendation, RecommendationRequest,
};
use usergraph_types::request::{RequestFilter, RequestStatus};

use crate::filter::FilterChain;
use crate::filter::request::request_filter_chain;
use crate::repository::recommendation::{
    RecommendationRepository, RecommendationRequestRepository,
};
use crate::repository::skill::SkillRepository;
use crate::repository::user::UserRepository;
use crate::service::skill::{all_skills_exist, dedup_ids};

/// Service for writing and reading recommendations.
///
/// Every recommendation may offer skills to its receiver; those offers feed
/// the skill acquisition rule.
pub struct RecommendationService<R: RecommendationRepository, U: UserRepository, S: SkillRepository>
{
    recommendation_repo: R,
    user_repo: U,
    skill_repo: S,
}

impl<R: RecommendationRepository, U: UserRepository, S: SkillRepository>
    RecommendationService<R, U, S>
{
    pub fn new(recommendation_repo: R, user_repo: U, skill_repo: S) -> Self {
        Self {
            recommendation_repo,
            user_repo,
            skill_repo,
        }
    }

    /// Store a recommendation and one offer per distinct skill id.
    pub async fn create_recommendation(
        &self,
        request: CreateRecommendation,
    ) -> Result<Recommendation, RecommendationError> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(RecommendationError::Invalid(
                "content cannot be empty".to_string(),
            ));
        }
        if request.author_id == request.receiver_id {
            return Err(RecommendationError::Invalid(
                "cannot recommend yourself".to_string(),
            ));
        }
        ensure_user(&self.user_repo, request.author_id).await?;
        ensure_user(&self.user_repo, request.receiver_id).await?;

        let skill_ids = dedup_ids(&request.skill_ids);
        if !all_skills_exist(&self.skill_repo, &skill_ids)
            .await
            .map_err(storage)?
        {
            for id in &skill_ids {
                let found = self.skill_repo.get_by_id(*id).await.map_err(storage)?;
                if found.is_none() {
                    return Err(RecommendationError::SkillNotFound(*id));
                }
            }
        }

        let recommendation = self
            .recommendation_repo
            .create(&CreateRecommendation {
                author_id: request.author_id,
                receiver_id: request.receiver_id,
                content: content.to_string(),
                skill_ids,
            })
            .await
            .map_err(storage)?;

        tracing::info!(
            recommendation_id = %recommendation.id,
            author_id = %recommendation.author_id,
            receiver_id = %recommendation.receiver_id,
            offers = recommendation.skill_offers.len(),
            "recommendation created"
        );
        Ok(recommendation)
    }

    pub async fn get_recommendation(
        &self,
        id: RecommendationId,
    ) -> Result<Recommendation, RecommendationError> {
        self.recommendation_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(RecommendationError::NotFound(id))
    }

    /// One page of the recommendations a user has received, in id order.
    pub async fn list_received(
        &self,
        receiver_id: UserId,
        page: Page,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        ensure_user(&self.user_repo, receiver_id).await?;
        let all = self
            .recommendation_repo
            .list_by_receiver(receiver_id)
            .await
            .map_err(storage)?;
        Ok(page.apply(all))
    }
}

/// Service for asking other users for a recommendation.
///
/// Requests follow the same lifecycle as mentorship requests: pending until
/// the receiver accepts or rejects, both of which are terminal.
pub struct RecommendationRequestService<Q: RecommendationRequestRepository, U: UserRepository> {
    request_repo: Q,
    user_repo: U,
    filters: FilterChain<RecommendationRequest, RequestFilter>,
}

impl<Q: RecommendationRequestRepository, U: UserRepository> RecommendationRequestService<Q, U> {
    pub fn new(request_repo: Q, user_repo: U) -> Self {
        Self {
            request_repo,
            user_repo,
            filters: request_filter_chain(),
        }
    }

    /// Open a pending recommendation request.
    pub async fn create_request(
        &self,
        request: CreateRecommendationRequest,
    ) -> Result<RecommendationRequest, RecommendationError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(RecommendationError::Invalid(
                "message cannot be empty".to_string(),
            ));
        }
        if request.requester_id == request.receiver_id {
            return Err(RecommendationError::Invalid(
                "cannot request a recommendation from yourself".to_string(),
            ));
        }
        ensure_user(&self.user_repo, request.requester_id).await?;
        ensure_user(&self.user_repo, request.receiver_id).await?;

        let created = self
            .request_repo
            .create(&CreateRecommendationRequest {
                message: message.to_string(),
                ..request
            })
            .await
            .map_err(storage)?;

        tracing::info!(request_id = %created.id, "recommendation requested");
        Ok(created)
    }

    pub async fn get_request(
        &self,
        id: RecommendationRequestId,
    ) -> Result<RecommendationRequest, RecommendationError> {
        self.request_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(RecommendationError::RequestNotFound(id))
    }

    /// All requests matching every applicable criterion, in id order.
    pub async fn get_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<RecommendationRequest>, RecommendationError> {
        let all = self.request_repo.list_all().await.map_err(storage)?;
        Ok(self.filters.apply(all, filter))
    }

    pub async fn accept_request(
        &self,
        id: RecommendationRequestId,
    ) -> Result<RecommendationRequest, RecommendationError> {
        self.transition(id, RequestStatus::Accepted, None).await
    }

    pub async fn reject_request(
        &self,
        id: RecommendationRequestId,
        reason: &str,
    ) -> Result<RecommendationRequest, RecommendationError> {
        self.transition(id, RequestStatus::Rejected, Some(reason))
            .await
    }

    async fn transition(
        &self,
        id: RecommendationRequestId,
        to: RequestStatus,
        reason: Option<&str>,
    ) -> Result<RecommendationRequest, RecommendationError> {
        let current = self.get_request(id).await?;
        if current.status.is_terminal() {
            tracing::warn!(request_id = %id, from = %current.status, %to, "invalid transition");
            return Err(RecommendationError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let reason = match reason.map(str::trim) {
            Some("") => {
                return Err(RecommendationError::Invalid(
                    "rejection reason cannot be empty".to_string(),
                ));
            }
            other => other,
        };

        let updated = self
            .request_repo
            .transition(id, RequestStatus::Pending, to, reason)
            .await
            .map_err(storage)?;

        match updated {
            Some(request) => {
                tracing::info!(request_id = %id, status = %request.status, "recommendation request updated");
                Ok(request)
            }
            None => {
                let latest = self.get_request(id).await?;
                Err(RecommendationError::InvalidTransition {
                    from: latest.status,
                    to,
                })
            }
        }
    }
}

async fn ensure_user<U: UserRepository>(
    user_repo: &U,
    user_id: UserId,
) -> Result<(), RecommendationError> {
    if user_repo.exists(user_id).await.map_err(storage)? {
        Ok(())
    } else {
        Err(RecommendationError::UserNotFound(user_id))
    }
}

fn storage(e: RepositoryError) -> RecommendationError {
    RecommendationError::StorageError(e.to_string())
}
