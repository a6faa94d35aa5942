//! Mentorship request repository trait definition.

use usergraph_types::error::RepositoryError;
use usergraph_types::id::MentorshipRequestId;
use usergraph_types::mentorship::{CreateMentorshipRequest, MentorshipRequest};
use usergraph_types::request::RequestStatus;

/// Repository trait for mentorship request persistence.
pub trait MentorshipRequestRepository: Send + Sync {
    /// Insert a new request in the pending state.
    fn create(
        &self,
        request: &CreateMentorshipRequest,
    ) -> impl std::future::Future<Output = Result<MentorshipRequest, RepositoryError>> + Send;

    /// Get a request by id.
    fn get_by_id(
        &self,
        id: MentorshipRequestId,
    ) -> impl std::future::Future<Output = Result<Option<MentorshipRequest>, RepositoryError>> + Send;

    /// All requests.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MentorshipRequest>, RepositoryError>> + Send;

    /// Compare-and-set the status: moves the request to `to` only if it is
    /// currently in `from`, recording `rejection_reason`.
    ///
    /// Returns the updated request, or `None` if no row was in `from`
    /// (missing id or a concurrent transition).
    fn transition(
        &self,
        id: MentorshipRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Option<MentorshipRequest>, RepositoryError>> + Send;
}
