//! Tournament data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::horse::HorseId;

/// Tournament ID type
pub type TournamentId = i64;

/// Number of entrants in a bracket.
///
/// Every tournament holds exactly this many horses; the validator enforces it
/// at creation and the assembler re-checks it on every read. Must be a power
/// of two.
pub const BRACKET_SIZE: usize = 8;

/// Number of rounds a bracket of the given size plays (log2 of the size).
pub fn total_rounds(bracket_size: usize) -> i32 {
    bracket_size.trailing_zeros() as i32
}

/// A tournament header as stored.
///
/// Name, dates and the entrant set are fixed at creation; only the per-entrant
/// standings change over the tournament's life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Per-entrant progress row, one per tournament × horse.
///
/// `entry_number` is the fixed seed position (1-based, assigned from
/// submission order at creation). `round_reached` counts rounds won: 0 until
/// the first win, equal to the total round count for the champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub tournament_id: TournamentId,
    pub horse_id: HorseId,
    pub entry_number: i32,
    pub round_reached: i32,
}

/// A standing enriched with the horse's display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub horse_id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub entry_number: i32,
    pub round_reached: i32,
}

/// One entrant in a creation request.
///
/// Only the ID is trusted; name and date of birth are echoed by clients for
/// display and ignored here.
#[derive(Debug, Clone, Deserialize)]
pub struct EntrantSelection {
    pub id: HorseId,
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Unvalidated tournament creation data as submitted by a caller.
///
/// Fields are optional so the validator can accumulate every violation into a
/// single response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentCandidate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub entrants: Option<Vec<EntrantSelection>>,
}

/// A validated tournament ready for insertion.
///
/// `entrant_ids` keeps submission order; entry numbers are assigned from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournament {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entrant_ids: Vec<HorseId>,
}

/// Tournament search filters; `None` fields are ignored.
///
/// The name matches as a case-insensitive substring. The date range matches
/// every tournament with at least one day inside it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentSearchParams {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Tournament header plus the flat participant list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentDetail {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: Vec<Participant>,
}

impl TournamentDetail {
    pub fn new(tournament: Tournament, participants: Vec<Participant>) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            participants,
        }
    }
}

/// Tournament detail plus the assembled bracket tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentStandings {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: Vec<Participant>,
    pub tree: super::bracket::BracketNode,
}
