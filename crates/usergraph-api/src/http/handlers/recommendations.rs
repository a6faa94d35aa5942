//! Recommendation and recommendation request handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use usergraph_types::id::{RecommendationId, RecommendationRequestId};
use usergraph_types::mentorship::RejectionRequest;
use usergraph_types::recommendation::{
    CreateRecommendation, CreateRecommendationRequest, Recommendation, RecommendationRequest,
};
use usergraph_types::request::RequestFilter;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/recommendations
pub async fn create_recommendation(
    State(state): State<AppState>,
    Json(body): Json<CreateRecommendation>,
) -> Result<(StatusCode, Json<ApiResponse<Recommendation>>), AppError> {
    let start = Instant::now();
    let recommendation = state
        .recommendation_service
        .create_recommendation(body)
        .await?;
    let href = format!("/api/v1/recommendations/{}", recommendation.id);
    let receiver = format!("/api/v1/users/{}", recommendation.receiver_id);
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(recommendation, start)
                .with_link("self", href)
                .with_link("receiver", receiver),
        ),
    ))
}

/// GET /api/v1/recommendations/{id}
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(id): Path<RecommendationId>,
) -> Result<Json<ApiResponse<Recommendation>>, AppError> {
    let start = Instant::now();
    let recommendation = state.recommendation_service.get_recommendation(id).await?;
    Ok(Json(ApiResponse::success(recommendation, start)))
}

/// POST /api/v1/recommendation_requests
pub async fn create_request(
    State(state): State<AppState>,
    Json(body): Json<CreateRecommendationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecommendationRequest>>), AppError> {
    let start = Instant::now();
    let request = state
        .recommendation_request_service
        .create_request(body)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(request, start))))
}

/// GET /api/v1/recommendation_requests
pub async fn list_requests(
    State(state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Result<Json<ApiResponse<Vec<RecommendationRequest>>>, AppError> {
    let start = Instant::now();
    let requests = state
        .recommendation_request_service
        .get_requests(&filter)
        .await?;
    Ok(Json(ApiResponse::success(requests, start)))
}

/// GET /api/v1/recommendation_requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<RecommendationRequestId>,
) -> Result<Json<ApiResponse<RecommendationRequest>>, AppError> {
    let start = Instant::now();
    let request = state.recommendation_request_service.get_request(id).await?;
    Ok(Json(ApiResponse::success(request, start)))
}

/// PUT /api/v1/recommendation_requests/accept/{id}
pub async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<RecommendationRequestId>,
) -> Result<StatusCode, AppError> {
    state.recommendation_request_service.accept_request(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/recommendation_requests/reject/{id}
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<RecommendationRequestId>,
    Json(body): Json<RejectionRequest>,
) -> Result<StatusCode, AppError> {
    state
        .recommendation_request_service
        .reject_request(id, &body.reason)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
