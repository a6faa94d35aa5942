use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{MentorshipRequestId, UserId};
use crate::request::RequestStatus;

/// A request from one user asking another to mentor them.
///
/// Created pending, then accepted or rejected exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipRequest {
    pub id: MentorshipRequestId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub description: String,
    pub status: RequestStatus,
    /// Set only when the request was rejected.
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /mentorship_requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorshipRequest {
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub description: String,
}

/// Body of `PUT /mentorship_requests/reject/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionRequest {
    pub reason: String,
}
