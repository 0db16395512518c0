//! Tournament API handlers.
//!
//! Creation takes the full entrant list up front; the entrant set and dates
//! are immutable afterwards. Reads come in two flavours: plain detail, and
//! standings with the bracket tree assembled from the flat per-entrant rows.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use paddock::tournament::{
    EntrantSelection, Standing, TournamentCandidate, TournamentDetail, TournamentSearchParams,
    TournamentStandings,
};

use super::{ApiResult, AppState, tournament_error};

#[derive(Debug, Serialize)]
pub struct TournamentListItem {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Creation payload. Every field is optional at the HTTP layer so the
/// validator can answer with the complete list of missing or invalid fields.
#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub entrants: Option<Vec<EntrantPayload>>,
}

/// One entrant in a creation payload. Only the ID is trusted; clients may
/// echo name and birth date but they are ignored.
#[derive(Debug, Deserialize)]
pub struct EntrantPayload {
    pub id: i64,
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<CreateTournamentRequest> for TournamentCandidate {
    fn from(request: CreateTournamentRequest) -> Self {
        TournamentCandidate {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            entrants: request.entrants.map(|entrants| {
                entrants
                    .into_iter()
                    .map(|e| EntrantSelection {
                        id: e.id,
                        name: e.name,
                        date_of_birth: e.date_of_birth,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordResultRequest {
    pub round_reached: i32,
}

/// Search tournaments.
///
/// Filters: `name` (case-insensitive substring), `start_date`/`end_date`
/// (matches every tournament with at least one day in the range). All are
/// optional; results come newest first.
///
/// # Response
///
/// `200 OK` with an array of tournament headers.
pub async fn search_tournaments(
    State(state): State<AppState>,
    Query(params): Query<TournamentSearchParams>,
) -> ApiResult<Json<Vec<TournamentListItem>>> {
    let tournaments = state
        .tournament_manager
        .search(&params)
        .await
        .map_err(tournament_error)?;

    let items = tournaments
        .into_iter()
        .map(|t| TournamentListItem {
            id: t.id,
            name: t.name,
            start_date: t.start_date,
            end_date: t.end_date,
        })
        .collect();
    Ok(Json(items))
}

/// Create a tournament.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "SummerCup",
///   "start_date": "2024-06-01",
///   "end_date": "2024-06-08",
///   "entrants": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4},
///                {"id": 5}, {"id": 6}, {"id": 7}, {"id": 8}]
/// }
/// ```
///
/// The entrant order decides the seeding: the first entrant gets entry
/// number 1 and meets the second in round one.
///
/// # Response
///
/// `201 Created` with the tournament detail (header plus participants).
///
/// # Errors
///
/// - `422 Unprocessable Entity`: one or more rules violated; the body lists
///   every violation (bad name or dates, wrong entrant count, unknown or
///   duplicate entrants)
/// - `500 Internal Server Error`: storage failure; header and standings are
///   created in one transaction, so nothing is left behind
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<CreateTournamentRequest>,
) -> ApiResult<(StatusCode, Json<TournamentDetail>)> {
    let candidate: TournamentCandidate = request.into();
    let detail = state
        .tournament_manager
        .create(&candidate)
        .await
        .map_err(tournament_error)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Get a tournament's detail: header plus the flat participant list, each
/// participant annotated with entry number and rounds won.
///
/// # Errors
///
/// - `404 Not Found`: no tournament with this ID
/// - `422 Unprocessable Entity`: the ID is the unset sentinel zero
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
) -> ApiResult<Json<TournamentDetail>> {
    let detail = state
        .tournament_manager
        .get_detail(tournament_id)
        .await
        .map_err(tournament_error)?;
    Ok(Json(detail))
}

/// Get a tournament's standings: the detail plus the bracket tree rebuilt
/// from the flat standings. Matchups whose round has not been played show no
/// occupant.
///
/// # Errors
///
/// - `404 Not Found`: no tournament with this ID
/// - `500 Internal Server Error`: the stored standings are corrupt (wrong
///   row count, gapped entry numbers, two winners for one matchup)
pub async fn get_standings(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
) -> ApiResult<Json<TournamentStandings>> {
    let standings = state
        .tournament_manager
        .get_standings(tournament_id)
        .await
        .map_err(tournament_error)?;
    Ok(Json(standings))
}

/// Record a round result by setting one entrant's rounds-won counter.
///
/// # Request Body
///
/// ```json
/// {"round_reached": 2}
/// ```
///
/// # Response
///
/// `200 OK` with the updated standing.
///
/// # Errors
///
/// - `404 Not Found`: unknown tournament or no standing for this horse
/// - `422 Unprocessable Entity`: zero ID, or the round is outside the
///   bracket's round count
pub async fn record_round_result(
    State(state): State<AppState>,
    Path((tournament_id, horse_id)): Path<(i64, i64)>,
    Json(request): Json<RecordResultRequest>,
) -> ApiResult<Json<Standing>> {
    let standing = state
        .tournament_manager
        .record_round_result(tournament_id, horse_id, request.round_reached)
        .await
        .map_err(tournament_error)?;
    Ok(Json(standing))
}
