//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use usergraph_types::error::{
    EventError, MentorshipError, PremiumError, RecommendationError, SkillError, UserError,
};
use usergraph_types::page::PageError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    User(UserError),
    Skill(SkillError),
    Mentorship(MentorshipError),
    Recommendation(RecommendationError),
    Event(EventError),
    Premium(PremiumError),
    /// Bad query or path parameters.
    Validation(String),
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::User(e)
    }
}

impl From<SkillError> for AppError {
    fn from(e: SkillError) -> Self {
        AppError::Skill(e)
    }
}

impl From<MentorshipError> for AppError {
    fn from(e: MentorshipError) -> Self {
        AppError::Mentorship(e)
    }
}

impl From<RecommendationError> for AppError {
    fn from(e: RecommendationError) -> Self {
        AppError::Recommendation(e)
    }
}

impl From<EventError> for AppError {
    fn from(e: EventError) -> Self {
        AppError::Event(e)
    }
}

impl From<PremiumError> for AppError {
    fn from(e: PremiumError) -> Self {
        AppError::Premium(e)
    }
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl AppError {
    /// Status, stable error code, and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        let message = self.to_string();
        let (status, code) = match self {
            AppError::User(e) => match e {
                UserError::NotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                UserError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                UserError::Conflict(_) => (StatusCode::CONFLICT, "USER_CONFLICT"),
                UserError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::Skill(e) => match e {
                SkillError::NotFound(_) => (StatusCode::NOT_FOUND, "SKILL_NOT_FOUND"),
                SkillError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                SkillError::AlreadyExists(_) => (StatusCode::CONFLICT, "SKILL_CONFLICT"),
                SkillError::InvalidTitle(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                SkillError::NotEnoughOffers { .. } => {
                    (StatusCode::BAD_REQUEST, "NOT_ENOUGH_SKILL_OFFERS")
                }
                SkillError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::Mentorship(e) => match e {
                MentorshipError::NotFound(_) => (StatusCode::NOT_FOUND, "REQUEST_NOT_FOUND"),
                MentorshipError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                MentorshipError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                MentorshipError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION")
                }
                MentorshipError::StorageError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
            },
            AppError::Recommendation(e) => match e {
                RecommendationError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "RECOMMENDATION_NOT_FOUND")
                }
                RecommendationError::RequestNotFound(_) => {
                    (StatusCode::NOT_FOUND, "REQUEST_NOT_FOUND")
                }
                RecommendationError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                RecommendationError::SkillNotFound(_) => (StatusCode::NOT_FOUND, "SKILL_NOT_FOUND"),
                RecommendationError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                RecommendationError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION")
                }
                RecommendationError::StorageError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
            },
            AppError::Event(e) => match e {
                EventError::NotFound(_) => (StatusCode::NOT_FOUND, "EVENT_NOT_FOUND"),
                EventError::OwnerNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                EventError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                EventError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::Premium(e) => match e {
                PremiumError::NotFound(_) => (StatusCode::NOT_FOUND, "PREMIUM_NOT_FOUND"),
                PremiumError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                PremiumError::AlreadyActive { .. } => (StatusCode::CONFLICT, "PREMIUM_ACTIVE"),
                PremiumError::StorageError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
            },
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        };
        (status, code, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::User(e) => write!(f, "{e}"),
            AppError::Skill(e) => write!(f, "{e}"),
            AppError::Mentorship(e) => write!(f, "{e}"),
            AppError::Recommendation(e) => write!(f, "{e}"),
            AppError::Event(e) => write!(f, "{e}"),
            AppError::Premium(e) => write!(f, "{e}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, status = status.as_u16(), "request rejected");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usergraph_types::id::{MentorshipRequestId, SkillId, UserId};
    use usergraph_types::request::RequestStatus;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().parts().0
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        assert_eq!(status_of(UserError::NotFound(UserId(1))), StatusCode::NOT_FOUND);
        assert_eq!(status_of(SkillError::NotFound(SkillId(1))), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(MentorshipError::NotFound(MentorshipRequestId(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(PremiumError::NotFound(UserId(1))), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_variants_map_to_400() {
        assert_eq!(
            status_of(SkillError::NotEnoughOffers {
                required: 3,
                actual: 1
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PageError::Negative {
                field: "page",
                value: -1
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EventError::Invalid("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let (status, code, message) = AppError::from(MentorshipError::InvalidTransition {
            from: RequestStatus::Accepted,
            to: RequestStatus::Rejected,
        })
        .parts();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "INVALID_TRANSITION");
        assert!(message.contains("accepted"));

        assert_eq!(
            status_of(RecommendationError::InvalidTransition {
                from: RequestStatus::Rejected,
                to: RequestStatus::Accepted,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SkillError::AlreadyExists("Rust".to_string())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_storage_errors_map_to_500() {
        assert_eq!(
            status_of(RecommendationError::StorageError("disk".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
