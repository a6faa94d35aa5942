//! Event handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use usergraph_types::event::{CreateEventRequest, Event};
use usergraph_types::id::EventId;

use crate::http::error::AppError;
use crate::http::extractors::query::EventListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), AppError> {
    let start = Instant::now();
    let event = state.event_service.create_event(body).await?;
    let href = format!("/api/v1/events/{}", event.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(event, start).with_link("self", href)),
    ))
}

/// GET /api/v1/events?ownerId
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, AppError> {
    let start = Instant::now();
    let events = state.event_service.list_events(query.owner_id).await?;
    Ok(Json(ApiResponse::success(events, start).with_link("self", "/api/v1/events")))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let start = Instant::now();
    let event = state.event_service.get_event(id).await?;
    Ok(Json(ApiResponse::success(event, start)))
}
