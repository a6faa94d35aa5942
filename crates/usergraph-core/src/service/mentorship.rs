//! Mentorship request workflow.
//!
//! ```text
//! pending --accept--> accepted
//!    \----reject----> rejected
//! ```
//!
//! Accepted and rejected are terminal: any further accept or reject fails
//! with `MentorshipError::InvalidTransition` and leaves the request as is.

use usergraph_types::error::{MentorshipError, RepositoryError};
use usergraph_types::id::{MentorshipRequestId, UserId};
use usergraph_types::mentorship::{CreateMentorshipRequest, MentorshipRequest};
use usergraph_types::request::{RequestFilter, RequestStatus};

use crate::filter::FilterChain;
use crate::filter::request::request_filter_chain;
use crate::repository::mentorship::MentorshipRequestRepository;
use crate::repository::user::UserRepository;

pub struct MentorshipService<M: MentorshipRequestRepository, U: UserRepository> {
    request_repo: M,
    user_repo: U,
    filters: FilterChain<MentorshipRequest, RequestFilter>,
}

impl<M: MentorshipRequestRepository, U: UserRepository> MentorshipService<M, U> {
    pub fn new(request_repo: M, user_repo: U) -> Self {
        Self {
            request_repo,
            user_repo,
            filters: request_filter_chain(),
        }
    }

    /// Open a pending request from `requester_id` to `receiver_id`.
    pub async fn request_mentorship(
        &self,
        request: CreateMentorshipRequest,
    ) -> Result<MentorshipRequest, MentorshipError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(MentorshipError::Invalid(
                "description cannot be empty".to_string(),
            ));
        }
        if request.requester_id == request.receiver_id {
            return Err(MentorshipError::Invalid(
                "cannot request mentorship from yourself".to_string(),
            ));
        }
        self.ensure_user(request.requester_id).await?;
        self.ensure_user(request.receiver_id).await?;

        let created = self
            .request_repo
            .create(&CreateMentorshipRequest {
                description: description.to_string(),
                ..request
            })
            .await
            .map_err(storage)?;

        tracing::info!(
            request_id = %created.id,
            requester_id = %created.requester_id,
            receiver_id = %created.receiver_id,
            "mentorship requested"
        );
        Ok(created)
    }

    pub async fn get_request(
        &self,
        id: MentorshipRequestId,
    ) -> Result<MentorshipRequest, MentorshipError> {
        self.request_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(MentorshipError::NotFound(id))
    }

    /// All requests matching every applicable criterion, in id order.
    pub async fn get_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<MentorshipRequest>, MentorshipError> {
        let all = self.request_repo.list_all().await.map_err(storage)?;
        tracing::debug!(
            total = all.len(),
            filters = ?self.filters.applicable(filter),
            "filtering mentorship requests"
        );
        Ok(self.filters.apply(all, filter))
    }

    pub async fn accept_request(
        &self,
        id: MentorshipRequestId,
    ) -> Result<MentorshipRequest, MentorshipError> {
        self.transition(id, RequestStatus::Accepted, None).await
    }

    pub async fn reject_request(
        &self,
        id: MentorshipRequestId,
        reason: &str,
    ) -> Result<MentorshipRequest, MentorshipError> {
        self.transition(id, RequestStatus::Rejected, Some(reason))
            .await
    }

    async fn transition(
        &self,
        id: MentorshipRequestId,
        to: RequestStatus,
        reason: Option<&str>,
    ) -> Result<MentorshipRequest, MentorshipError> {
        let current = self.get_request(id).await?;
        if current.status.is_terminal() {
            tracing::warn!(request_id = %id, from = %current.status, %to, "invalid transition");
            return Err(MentorshipError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let reason = match reason.map(str::trim) {
            Some("") => {
                return Err(MentorshipError::Invalid(
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
                tracing::info!(request_id = %id, status = %request.status, "mentorship request updated");
                Ok(request)
            }
            // Someone else moved it between our read and the conditional update.
            None => {
                let latest = self.get_request(id).await?;
                Err(MentorshipError::InvalidTransition {
                    from: latest.status,
                    to,
                })
            }
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), MentorshipError> {
        if self.user_repo.exists(user_id).await.map_err(storage)? {
            Ok(())
        } else {
            Err(MentorshipError::UserNotFound(user_id))
        }
    }
}

fn storage(e: RepositoryError) -> MentorshipError {
    MentorshipError::StorageError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    fn service(store: &InMemoryStore) -> MentorshipService<InMemoryStore, InMemoryStore> {
        MentorshipService::new(store.clone(), store.clone())
    }

    fn create(requester: UserId, receiver: UserId, description: &str) -> CreateMentorshipRequest {
        CreateMentorshipRequest {
            requester_id: requester,
            receiver_id: receiver,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_accept_then_reject_fails() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let requester = store.add_user("requester");
        let receiver = store.add_user("receiver");

        let request = service
            .request_mentorship(create(requester, receiver, "Help with Go"))
            .await
            .unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let accepted = service.accept_request(request.id).await.unwrap();
        assert_eq!(accepted.status, RequestStatus::Accepted);

        let err = service
            .reject_request(request.id, "changed mind")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MentorshipError::InvalidTransition {
                from: RequestStatus::Accepted,
                to: RequestStatus::Rejected
            }
        ));

        let stored = service.get_request(request.id).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Accepted);
        assert!(stored.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_reject_records_reason() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let requester = store.add_user("requester");
        let receiver = store.add_user("receiver");
        let request = service
            .request_mentorship(create(requester, receiver, "Rust please"))
            .await
            .unwrap();

        let rejected = service
            .reject_request(request.id, " too busy ")
            .await
            .unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("too busy"));

        let err = service.accept_request(request.id).await.unwrap_err();
        assert!(matches!(err, MentorshipError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_reject_unknown_request_is_not_found() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let err = service
            .reject_request(MentorshipRequestId(77), "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, MentorshipError::NotFound(MentorshipRequestId(77))));
        assert!(service
            .get_requests(&RequestFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let requester = store.add_user("requester");
        let receiver = store.add_user("receiver");
        let request = service
            .request_mentorship(create(requester, receiver, "Rust"))
            .await
            .unwrap();

        let err = service.reject_request(request.id, "  ").await.unwrap_err();
        assert!(matches!(err, MentorshipError::Invalid(_)));
        let stored = service.get_request(request.id).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_request_validation() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let user = store.add_user("solo");

        let err = service
            .request_mentorship(create(user, user, "myself"))
            .await
            .unwrap_err();
        assert!(matches!(err, MentorshipError::Invalid(_)));

        let err = service
            .request_mentorship(create(user, UserId(999), "ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, MentorshipError::UserNotFound(UserId(999))));
    }

    #[tokio::test]
    async fn test_get_requests_filters_by_requester() {
        let store = InMemoryStore::default();
        let service = service(&store);
        let five = store.add_user("five");
        let seven = store.add_user("seven");
        let mentor = store.add_user("mentor");

        let first = service
            .request_mentorship(create(five, mentor, "one"))
            .await
            .unwrap();
        let second = service
            .request_mentorship(create(five, mentor, "two"))
            .await
            .unwrap();
        service
            .request_mentorship(create(seven, mentor, "three"))
            .await
            .unwrap();

        let filter = RequestFilter {
            requester_id: Some(five),
            ..Default::default()
        };
        let found = service.get_requests(&filter).await.unwrap();
        assert_eq!(found, vec![first, second]);

        let all = service.get_requests(&RequestFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
