//! Horse API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;

use paddock::horse::{Horse, HorseCandidate, HorseSearchParams};

use super::{ApiResult, AppState, horse_error};

#[derive(Debug, Serialize)]
pub struct HorseResponse {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl From<Horse> for HorseResponse {
    fn from(horse: Horse) -> Self {
        Self {
            id: horse.id,
            name: horse.name,
            date_of_birth: horse.date_of_birth,
        }
    }
}

/// Search horses.
///
/// Filters: `name` (case-insensitive substring), `born_before` (inclusive
/// upper bound on the birth date), `limit`. All optional.
pub async fn search_horses(
    State(state): State<AppState>,
    Query(params): Query<HorseSearchParams>,
) -> ApiResult<Json<Vec<HorseResponse>>> {
    let horses = state
        .horse_manager
        .search(&params)
        .await
        .map_err(horse_error)?;
    Ok(Json(horses.into_iter().map(HorseResponse::from).collect()))
}

/// Register a horse.
///
/// # Request Body
///
/// ```json
/// {"name": "Apollo", "date_of_birth": "2019-05-01"}
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: name or birth date missing or invalid; the
///   body lists every violation
pub async fn create_horse(
    State(state): State<AppState>,
    Json(candidate): Json<HorseCandidate>,
) -> ApiResult<(StatusCode, Json<HorseResponse>)> {
    let horse = state
        .horse_manager
        .create(&candidate)
        .await
        .map_err(horse_error)?;
    Ok((StatusCode::CREATED, Json(horse.into())))
}

/// Get one horse by ID.
///
/// # Errors
///
/// - `404 Not Found`: no horse with this ID
pub async fn get_horse(
    State(state): State<AppState>,
    Path(horse_id): Path<i64>,
) -> ApiResult<Json<HorseResponse>> {
    let horse = state
        .horse_manager
        .get(horse_id)
        .await
        .map_err(horse_error)?;
    Ok(Json(horse.into()))
}

/// Delete a horse.
///
/// # Response
///
/// `204 No Content` on success.
///
/// # Errors
///
/// - `404 Not Found`: no horse with this ID
/// - `409 Conflict`: the horse is entered in at least one tournament and
///   deleting it would leave standings referencing a vanished horse
pub async fn delete_horse(
    State(state): State<AppState>,
    Path(horse_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .horse_manager
        .delete(horse_id)
        .await
        .map_err(horse_error)?;
    Ok(StatusCode::NO_CONTENT)
}
