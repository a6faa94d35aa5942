//! Mentorship request handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use usergraph_types::id::MentorshipRequestId;
use usergraph_types::mentorship::{CreateMentorshipRequest, MentorshipRequest, RejectionRequest};
use usergraph_types::request::RequestFilter;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/mentorship_requests
pub async fn request_mentorship(
    State(state): State<AppState>,
    Json(body): Json<CreateMentorshipRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MentorshipRequest>>), AppError> {
    let start = Instant::now();
    let request = state.mentorship_service.request_mentorship(body).await?;
    let href = format!("/api/v1/mentorship_requests/{}", request.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(request, start).with_link("self", href)),
    ))
}

/// GET /api/v1/mentorship_requests?requesterId&receiverId&status&description
pub async fn list_requests(
    State(state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Result<Json<ApiResponse<Vec<MentorshipRequest>>>, AppError> {
    let start = Instant::now();
    let requests = state.mentorship_service.get_requests(&filter).await?;
    Ok(Json(
        ApiResponse::success(requests, start).with_link("self", "/api/v1/mentorship_requests"),
    ))
}

/// GET /api/v1/mentorship_requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<MentorshipRequestId>,
) -> Result<Json<ApiResponse<MentorshipRequest>>, AppError> {
    let start = Instant::now();
    let request = state.mentorship_service.get_request(id).await?;
    Ok(Json(ApiResponse::success(request, start)))
}

/// PUT /api/v1/mentorship_requests/accept/{id}
pub async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<MentorshipRequestId>,
) -> Result<StatusCode, AppError> {
    state.mentorship_service.accept_request(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/mentorship_requests/reject/{id}
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<MentorshipRequestId>,
    Json(body): Json<RejectionRequest>,
) -> Result<StatusCode, AppError> {
    state
        .mentorship_service
        .reject_request(id, &body.reason)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
