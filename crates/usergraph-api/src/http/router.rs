//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Users
        .route("/users", post(handlers::users::create_user))
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}/skills", get(handlers::users::list_skills))
        .route(
            "/users/{id}/skills/offered",
            get(handlers::users::list_offered_skills),
        )
        .route(
            "/users/{id}/skills/{skill_id}/acquire",
            post(handlers::users::acquire_skill),
        )
        .route(
            "/users/{id}/recommendations",
            get(handlers::users::list_recommendations),
        )
        // Premium
        .route(
            "/users/{id}/premium",
            get(handlers::premium::get_premium).post(handlers::premium::buy_premium),
        )
        // Skills
        .route("/skills", post(handlers::skills::create_skill))
        // Mentorship
        .route(
            "/mentorship_requests",
            get(handlers::mentorship::list_requests).post(handlers::mentorship::request_mentorship),
        )
        .route(
            "/mentorship_requests/{id}",
            get(handlers::mentorship::get_request),
        )
        .route(
            "/mentorship_requests/accept/{id}",
            put(handlers::mentorship::accept_request),
        )
        .route(
            "/mentorship_requests/reject/{id}",
            put(handlers::mentorship::reject_request),
        )
        // Recommendations
        .route(
            "/recommendations",
            post(handlers::recommendations::create_recommendation),
        )
        .route(
            "/recommendations/{id}",
            get(handlers::recommendations::get_recommendation),
        )
        .route(
            "/recommendation_requests",
            get(handlers::recommendations::list_requests)
                .post(handlers::recommendations::create_request),
        )
        .route(
            "/recommendation_requests/{id}",
            get(handlers::recommendations::get_request),
        )
        .route(
            "/recommendation_requests/accept/{id}",
            put(handlers::recommendations::accept_request),
        )
        .route(
            "/recommendation_requests/reject/{id}",
            put(handlers::recommendations::reject_request),
        )
        // Events
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route("/events/{id}", get(handlers::events::get_event));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
