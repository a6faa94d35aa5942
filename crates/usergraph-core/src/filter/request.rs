//! Filters over request-like entities driven by [`RequestFilter`] criteria.
//!
//! The same four filters serve mentorship requests and recommendation
//! requests through the [`FilterableRequest`] accessor trait.

use usergraph_types::id::UserId;
use usergraph_types::mentorship::MentorshipRequest;
use usergraph_types::recommendation::RecommendationRequest;
use usergraph_types::request::{RequestFilter, RequestStatus};

use super::{Filter, FilterChain};

/// Read access to the fields the request filters inspect.
pub trait FilterableRequest {
    fn requester_id(&self) -> UserId;
    fn receiver_id(&self) -> UserId;
    fn status(&self) -> RequestStatus;
    /// Free text matched by the description filter.
    fn text(&self) -> &str;
}

impl FilterableRequest for MentorshipRequest {
    fn requester_id(&self) -> UserId {
        self.requester_id
    }

    fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn text(&self) -> &str {
        &self.description
    }
}

impl FilterableRequest for RecommendationRequest {
    fn requester_id(&self) -> UserId {
        self.requester_id
    }

    fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn text(&self) -> &str {
        &self.message
    }
}

/// Keeps requests sent by `criteria.requester_id`.
pub fn requester_filter<E: FilterableRequest>() -> Filter<E, RequestFilter> {
    Filter::new(
        "requester",
        |c| c.requester_id.is_some(),
        |req, c| c.requester_id == Some(req.requester_id()),
    )
}

/// Keeps requests addressed to `criteria.receiver_id`.
pub fn receiver_filter<E: FilterableRequest>() -> Filter<E, RequestFilter> {
    Filter::new(
        "receiver",
        |c| c.receiver_id.is_some(),
        |req, c| c.receiver_id == Some(req.receiver_id()),
    )
}

/// Keeps requests currently in `criteria.status`.
pub fn status_filter<E: FilterableRequest>() -> Filter<E, RequestFilter> {
    Filter::new(
        "status",
        |c| c.status.is_some(),
        |req, c| c.status == Some(req.status()),
    )
}

/// Keeps requests whose text contains `criteria.description`, ignoring case.
///
/// A blank description is treated as absent.
pub fn description_filter<E: FilterableRequest>() -> Filter<E, RequestFilter> {
    Filter::new(
        "description",
        |c| c.description.as_deref().is_some_and(|d| !d.trim().is_empty()),
        |req, c| {
            c.description.as_deref().is_some_and(|needle| {
                req.text()
                    .to_lowercase()
                    .contains(&needle.trim().to_lowercase())
            })
        },
    )
}

/// The standard chain: requester, receiver, status, description.
pub fn request_filter_chain<E: FilterableRequest>() -> FilterChain<E, RequestFilter> {
    FilterChain::new(vec![
        requester_filter(),
        receiver_filter(),
        status_filter(),
        description_filter(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use usergraph_types::id::MentorshipRequestId;

    fn request(id: i64, requester: i64, receiver: i64, description: &str) -> MentorshipRequest {
        let now = Utc::now();
        MentorshipRequest {
            id: MentorshipRequestId(id),
            requester_id: UserId(requester),
            receiver_id: UserId(receiver),
            description: description.to_string(),
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(requests: &[MentorshipRequest]) -> Vec<i64> {
        requests.iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn test_empty_criteria_is_pass_through() {
        let chain = request_filter_chain::<MentorshipRequest>();
        let requests = vec![request(1, 5, 2, "a"), request(2, 7, 2, "b")];
        let out = chain.apply(requests.clone(), &RequestFilter::default());
        assert_eq!(out, requests);
    }

    #[test]
    fn test_requester_filter_keeps_matching_in_order() {
        let chain = request_filter_chain::<MentorshipRequest>();
        let requests = vec![
            request(1, 5, 2, "first"),
            request(2, 5, 3, "second"),
            request(3, 7, 2, "third"),
        ];
        let criteria = RequestFilter {
            requester_id: Some(UserId(5)),
            ..Default::default()
        };
        assert_eq!(ids(&chain.apply(requests, &criteria)), vec![1, 2]);
        assert_eq!(chain.applicable(&criteria), vec!["requester"]);
    }

    #[test]
    fn test_combined_filters() {
        let chain = request_filter_chain::<MentorshipRequest>();
        let mut accepted = request(2, 5, 3, "Help with Go");
        accepted.status = RequestStatus::Accepted;
        let requests = vec![
            request(1, 5, 3, "Help with Go"),
            accepted,
            request(3, 5, 4, "help with GO please"),
        ];
        let criteria = RequestFilter {
            requester_id: Some(UserId(5)),
            status: Some(RequestStatus::Pending),
            description: Some("with go".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&chain.apply(requests, &criteria)), vec![1, 3]);
    }

    #[test]
    fn test_receiver_filter() {
        let chain = request_filter_chain::<MentorshipRequest>();
        let requests = vec![request(1, 5, 2, "a"), request(2, 6, 3, "b")];
        let criteria = RequestFilter {
            receiver_id: Some(UserId(3)),
            ..Default::default()
        };
        assert_eq!(ids(&chain.apply(requests, &criteria)), vec![2]);
    }

    #[test]
    fn test_blank_description_is_not_applicable() {
        let filter = description_filter::<MentorshipRequest>();
        let criteria = RequestFilter {
            description: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_applicable(&criteria));
    }

    #[test]
    fn test_chain_works_for_recommendation_requests() {
        let now = Utc::now();
        let make = |id: i64, requester: i64| RecommendationRequest {
            id: usergraph_types::id::RecommendationRequestId(id),
            requester_id: UserId(requester),
            receiver_id: UserId(9),
            message: "please".to_string(),
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        let chain = request_filter_chain::<RecommendationRequest>();
        let criteria = RequestFilter {
            requester_id: Some(UserId(1)),
            ..Default::default()
        };
        let out = chain.apply(vec![make(1, 1), make(2, 2)], &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.get(), 1);
    }
}
