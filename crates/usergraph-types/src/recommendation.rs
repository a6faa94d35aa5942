//! Recommendations, the skill offers they carry, and requests for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{RecommendationId, RecommendationRequestId, SkillId, SkillOfferId, UserId};
use crate::request::RequestStatus;

/// A recommendation written by `author_id` about `receiver_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: RecommendationId,
    /// The endorser.
    pub author_id: UserId,
    /// The user being recommended.
    pub receiver_id: UserId,
    pub content: String,
    pub skill_offers: Vec<SkillOffer>,
    pub created_at: DateTime<Utc>,
}

/// A claim, embedded in a recommendation, that a skill applies to its receiver.
///
/// `author_id` and `receiver_id` are read from the owning recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillOffer {
    pub id: SkillOfferId,
    pub skill_id: SkillId,
    pub recommendation_id: RecommendationId,
    pub author_id: UserId,
    pub receiver_id: UserId,
}

/// Request to write a recommendation offering zero or more skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendation {
    pub author_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    #[serde(default)]
    pub skill_ids: Vec<SkillId>,
}

/// A request from `requester_id` asking `receiver_id` for a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub id: RecommendationRequestId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub message: String,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /recommendation_requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub message: String,
}
