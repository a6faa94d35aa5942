//! Premium subscription handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use usergraph_types::id::UserId;
use usergraph_types::premium::{BuyPremiumRequest, Premium};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/users/{id}/premium
pub async fn buy_premium(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<BuyPremiumRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Premium>>), AppError> {
    let start = Instant::now();
    let premium = state
        .premium_service
        .buy_premium(user_id, body.period)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(premium, start))))
}

/// GET /api/v1/users/{id}/premium
pub async fn get_premium(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<Premium>>, AppError> {
    let start = Instant::now();
    let premium = state.premium_service.get_premium(user_id).await?;
    Ok(Json(ApiResponse::success(premium, start)))
}
