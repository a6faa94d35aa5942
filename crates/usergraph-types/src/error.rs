use thiserror::Error;

use crate::id::{EventId, MentorshipRequestId, RecommendationId, RecommendationRequestId, SkillId, UserId};
use crate::request::RequestStatus;

/// Errors related to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("invalid user: {0}")]
    Invalid(String),

    #[error("user already exists: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to skill creation and acquisition.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill {0} not found")]
    NotFound(SkillId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("skill '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid skill title: {0}")]
    InvalidTitle(String),

    #[error("not enough skill offers: at least {required} distinct endorsers are required, got {actual}")]
    NotEnoughOffers { required: usize, actual: usize },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to the mentorship request workflow.
#[derive(Debug, Error)]
pub enum MentorshipError {
    #[error("mentorship request {0} not found")]
    NotFound(MentorshipRequestId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("invalid mentorship request: {0}")]
    Invalid(String),

    #[error("cannot move mentorship request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to recommendations and recommendation requests.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("recommendation {0} not found")]
    NotFound(RecommendationId),

    #[error("recommendation request {0} not found")]
    RequestNotFound(RecommendationRequestId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("skill {0} not found")]
    SkillNotFound(SkillId),

    #[error("invalid recommendation: {0}")]
    Invalid(String),

    #[error("cannot move recommendation request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to event operations.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event {0} not found")]
    NotFound(EventId),

    #[error("owner {0} not found")]
    OwnerNotFound(UserId),

    #[error("invalid event: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to premium subscriptions.
#[derive(Debug, Error)]
pub enum PremiumError {
    #[error("user {0} has no premium subscription")]
    NotFound(UserId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("user {user_id} already has an active premium until {until}")]
    AlreadyActive { user_id: UserId, until: String },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in usergraph-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_error_display() {
        let err = SkillError::AlreadyExists("Rust".to_string());
        assert_eq!(err.to_string(), "skill 'Rust' already exists");

        let err = SkillError::NotEnoughOffers {
            required: 3,
            actual: 1,
        };
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_transition_error_display() {
        let err = MentorshipError::InvalidTransition {
            from: RequestStatus::Accepted,
            to: RequestStatus::Rejected,
        };
        assert_eq!(
            err.to_string(),
            "cannot move mentorship request from accepted to rejected"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
