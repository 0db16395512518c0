//! HTTP API for the tournament server.
//!
//! # Architecture
//!
//! - **Axum** handles routing and extraction
//! - **tower-http** provides CORS
//! - Domain work happens in the `paddock` managers; handlers only translate
//!   between HTTP and domain types
//!
//! # Endpoints Overview
//!
//! ## Horses
//! - `GET    /api/v1/horses` - Search horses
//! - `POST   /api/v1/horses` - Register a horse
//! - `GET    /api/v1/horses/{id}` - Get one horse
//! - `DELETE /api/v1/horses/{id}` - Delete a horse
//!
//! ## Tournaments
//! - `GET  /api/v1/tournaments` - Search tournaments
//! - `POST /api/v1/tournaments` - Create a tournament
//! - `GET  /api/v1/tournaments/{id}` - Tournament detail
//! - `GET  /api/v1/tournaments/{id}/standings` - Detail plus bracket tree
//! - `PUT  /api/v1/tournaments/{id}/standings/{horse_id}` - Record a round result
//!
//! ## Health Check
//! - `GET /health` - Server health status
//!
//! # Error Mapping
//!
//! Validation failures answer `422` and carry the complete list of violated
//! rules. Missing records answer `404`, a refused horse deletion answers
//! `409`. Data-consistency faults and database errors answer `500` with an
//! opaque body; the detail is logged server-side only.

pub mod horses;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
};
use paddock::{HorseError, HorseManager, TournamentError, TournamentManager};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all handlers.
///
/// Cloned per request; cheap because every field is an Arc.
#[derive(Clone)]
pub struct AppState {
    pub horse_manager: Arc<HorseManager>,
    pub tournament_manager: Arc<TournamentManager>,
    pub pool: Arc<PgPool>,
}

/// Error body shared by every endpoint.
///
/// `errors` is populated for validation failures only and then lists every
/// violated rule.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub(crate) fn tournament_error(err: TournamentError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        TournamentError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TournamentError::NotFound(_) | TournamentError::StandingNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        TournamentError::Inconsistent(_) | TournamentError::Database(_) => {
            log::error!("tournament request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let errors = match &err {
        TournamentError::Validation { errors } => errors.clone(),
        _ => Vec::new(),
    };
    (
        status,
        Json(ApiError {
            message: err.client_message(),
            errors,
        }),
    )
}

pub(crate) fn horse_error(err: HorseError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        HorseError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        HorseError::NotFound(_) => StatusCode::NOT_FOUND,
        HorseError::EnteredInTournaments { .. } => StatusCode::CONFLICT,
        HorseError::Inconsistent(_) | HorseError::Database(_) => {
            log::error!("horse request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let errors = match &err {
        HorseError::Validation { errors } => errors.clone(),
        _ => Vec::new(),
    };
    (
        status,
        Json(ApiError {
            message: err.client_message(),
            errors,
        }),
    )
}

/// Create the complete API router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/horses",
            get(horses::search_horses).post(horses::create_horse),
        )
        .route(
            "/horses/{horse_id}",
            get(horses::get_horse).delete(horses::delete_horse),
        )
        .route(
            "/tournaments",
            get(tournaments::search_tournaments).post(tournaments::create_tournament),
        )
        .route("/tournaments/{tournament_id}", get(tournaments::get_tournament))
        .route(
            "/tournaments/{tournament_id}/standings",
            get(tournaments::get_standings),
        )
        .route(
            "/tournaments/{tournament_id}/standings/{horse_id}",
            put(tournaments::record_round_result),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Answers `200 OK` while the database responds to a trivial query and
/// `503 Service Unavailable` otherwise.
pub(crate) async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&*state.pool)
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
