//! Skill catalogue handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use usergraph_types::skill::{CreateSkillRequest, Skill};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/skills
pub async fn create_skill(
    State(state): State<AppState>,
    Json(body): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Skill>>), AppError> {
    let start = Instant::now();
    let skill = state.skill_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(skill, start))))
}
