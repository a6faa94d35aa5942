//! Recommendation and recommendation request repository trait definitions.

use usergraph_types::error::RepositoryError;
use usergraph_types::id::{RecommendationId, RecommendationRequestId, UserId};
use usergraph_types::recommendation::{
    CreateRecommendation, CreateRecommendationRequest, Recommendation, RecommendationRequest,
};
use usergraph_types::request::RequestStatus;

/// Repository trait for recommendations and their skill offers.
pub trait RecommendationRepository: Send + Sync {
    /// Insert the recommendation and one offer per skill id in a single
    /// transaction.
    fn create(
        &self,
        recommendation: &CreateRecommendation,
    ) -> impl std::future::Future<Output = Result<Recommendation, RepositoryError>> + Send;

    /// Get a recommendation with its offers.
    fn get_by_id(
        &self,
        id: RecommendationId,
    ) -> impl std::future::Future<Output = Result<Option<Recommendation>, RepositoryError>> + Send;

    /// Recommendations received by a user, with their offers.
    fn list_by_receiver(
        &self,
        receiver_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Recommendation>, RepositoryError>> + Send;
}

/// Repository trait for recommendation requests.
pub trait RecommendationRequestRepository: Send + Sync {
    /// Insert a new request in the pending state.
    fn create(
        &self,
        request: &CreateRecommendationRequest,
    ) -> impl std::future::Future<Output = Result<RecommendationRequest, RepositoryError>> + Send;

    /// Get a request by id.
    fn get_by_id(
        &self,
        id: RecommendationRequestId,
    ) -> impl std::future::Future<Output = Result<Option<RecommendationRequest>, RepositoryError>> + Send;

    /// All requests.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<RecommendationRequest>, RepositoryError>> + Send;

    /// Compare-and-set the status, as for mentorship requests.
    ///
    /// Returns `None` if the request is missing or no longer in `from`.
    fn transition(
        &self,
        id: RecommendationRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Option<RecommendationRequest>, RepositoryError>> + Send;
}
