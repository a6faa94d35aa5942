//! Types shared by every request workflow (mentorship and recommendation
//! requests): the lifecycle status and the filter criteria.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::UserId;

/// Request lifecycle states.
///
/// - Pending: initial state, awaiting the receiver's decision
/// - Accepted: terminal
/// - Rejected: terminal, carries a reason
///
/// Serialized lowercase. Deserialization goes through [`FromStr`], so any
/// casing is accepted on input (`?status=PENDING` and `?status=pending`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// True for states with no outgoing transition.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("invalid request status: '{other}'")),
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

/// Criteria for narrowing a list of requests.
///
/// Every field is optional; an absent field does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    pub requester_id: Option<UserId>,
    pub receiver_id: Option<UserId>,
    pub status: Option<RequestStatus>,
    /// Case-insensitive substring of the request text.
    pub description: Option<String>,
}

impl RequestFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.requester_id.is_none()
            && self.receiver_id.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }
}
