//! User handlers, including the user-scoped skill and recommendation views.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use usergraph_types::id::{SkillId, UserId};
use usergraph_types::page::Page;
use usergraph_types::recommendation::Recommendation;
use usergraph_types::skill::{AcquiredSkill, Skill, SkillCandidate};
use usergraph_types::user::{CreateUserRequest, User};

use crate::http::error::AppError;
use crate::http::extractors::query::PageQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let start = Instant::now();
    let user = state.user_service.create_user(body).await?;
    let href = format!("/api/v1/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, start).with_link("self", href)),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let start = Instant::now();
    let user = state.user_service.get_user(id).await?;
    Ok(Json(
        ApiResponse::success(user, start)
            .with_link("self", format!("/api/v1/users/{id}"))
            .with_link("skills", format!("/api/v1/users/{id}/skills")),
    ))
}

/// GET /api/v1/users/{id}/skills
pub async fn list_skills(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<Skill>>>, AppError> {
    let start = Instant::now();
    let page = Page::resolve(&state.config, query.page, query.page_size)?;
    let skills = state.skill_service.get_user_skills(id, page).await?;
    Ok(Json(
        ApiResponse::success(skills, start).with_link("self", format!("/api/v1/users/{id}/skills")),
    ))
}

/// GET /api/v1/users/{id}/skills/offered
pub async fn list_offered_skills(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<SkillCandidate>>>, AppError> {
    let start = Instant::now();
    let page = Page::resolve(&state.config, query.page, query.page_size)?;
    let candidates = state.skill_service.get_offered_skills(id, page).await?;
    Ok(Json(ApiResponse::success(candidates, start)))
}

/// POST /api/v1/users/{id}/skills/{skill_id}/acquire
pub async fn acquire_skill(
    State(state): State<AppState>,
    Path((user_id, skill_id)): Path<(UserId, SkillId)>,
) -> Result<Json<ApiResponse<AcquiredSkill>>, AppError> {
    let start = Instant::now();
    let acquired = state
        .skill_service
        .acquire_skill_from_offers(skill_id, user_id)
        .await?;
    Ok(Json(
        ApiResponse::success(acquired, start)
            .with_link("skills", format!("/api/v1/users/{user_id}/skills")),
    ))
}

/// GET /api/v1/users/{id}/recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<Recommendation>>>, AppError> {
    let start = Instant::now();
    let page = Page::resolve(&state.config, query.page, query.page_size)?;
    let recommendations = state.recommendation_service.list_received(id, page).await?;
    Ok(Json(ApiResponse::success(recommendations, start)))
}
