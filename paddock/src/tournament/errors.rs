//! Tournament error types.
//!
//! Three classes of failure leave this module: validation failures (caller
//! data broke a rule; carries the complete list of violations), not-found
//! conditions, and data-consistency faults. The last class means a stored
//! invariant does not hold; it is never presented as a caller mistake and is
//! reduced to an opaque message at the HTTP boundary.

use thiserror::Error;

use crate::horse::HorseId;

use super::models::TournamentId;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// No tournament with the given ID exists
    #[error("tournament not found: {0}")]
    NotFound(TournamentId),

    /// No standing exists for the given tournament and horse
    #[error("no standing for tournament {tournament_id} and horse {horse_id}")]
    StandingNotFound {
        tournament_id: TournamentId,
        horse_id: HorseId,
    },

    /// Caller-supplied data violated one or more rules; carries every
    /// violation, not just the first
    #[error("validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// A stored invariant does not hold (wrong row count for the bracket
    /// size, gapped entry numbers, two winners for one matchup, a standing
    /// referencing a vanished horse)
    #[error("inconsistent tournament state: {0}")]
    Inconsistent(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TournamentError {
    /// Client-safe message that does not leak storage internals.
    ///
    /// Consistency faults and database errors are reduced to an opaque
    /// string; callers log the detailed message at the point of failure.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) | TournamentError::Inconsistent(_) => {
                "internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Shorthand for a single-message validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        TournamentError::Validation {
            errors: vec![message.into()],
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
