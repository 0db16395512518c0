//! Tournament module for fixed-size single-elimination brackets.
//!
//! A tournament is created once with exactly [`BRACKET_SIZE`] entrants; their
//! seed order is the submission order and is never changed afterwards.
//! Progress is persisted flat as one standing row per entrant, and the
//! presentation tree is reassembled from those rows on every standings read.
//!
//! ## Example
//!
//! ```
//! use paddock::tournament::bracket::build_bracket;
//! use paddock::tournament::Participant;
//! use chrono::NaiveDate;
//!
//! let born = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
//! let participants: Vec<Participant> = (1..=4)
//!     .map(|n| Participant {
//!         horse_id: n as i64,
//!         name: format!("Horse{n}"),
//!         date_of_birth: born,
//!         entry_number: n,
//!         round_reached: 0,
//!     })
//!     .collect();
//!
//! let tree = build_bracket(&participants, 4).unwrap();
//! assert_eq!(tree.leaf_count(), 4);
//! assert!(tree.occupant.is_none());
//! ```

pub mod bracket;
pub mod errors;
pub mod manager;
pub mod models;
pub mod validator;

pub use bracket::BracketNode;
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    BRACKET_SIZE, EntrantSelection, NewTournament, Participant, Standing, Tournament,
    TournamentCandidate, TournamentDetail, TournamentId, TournamentSearchParams,
    TournamentStandings, total_rounds,
};
