//! Horse error types.

use thiserror::Error;

use super::models::HorseId;
use crate::tournament::TournamentId;

/// Horse errors
#[derive(Debug, Error)]
pub enum HorseError {
    /// No horse with the given ID exists
    #[error("horse not found: {0}")]
    NotFound(HorseId),

    /// Caller-supplied data violated one or more rules; carries every
    /// violation, not just the first
    #[error("validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// The horse is entered in tournaments and cannot be deleted
    #[error("horse {horse_id} is entered in {} tournament(s)", tournaments.len())]
    EnteredInTournaments {
        horse_id: HorseId,
        tournaments: Vec<TournamentId>,
    },

    /// An internal invariant does not hold; never a caller mistake
    #[error("inconsistent horse state: {0}")]
    Inconsistent(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl HorseError {
    /// Client-safe message that does not leak storage internals.
    ///
    /// Database and consistency errors are reduced to an opaque string; the
    /// detailed message is logged at the point of failure instead.
    pub fn client_message(&self) -> String {
        match self {
            HorseError::Database(_) | HorseError::Inconsistent(_) => {
                "internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for horse operations
pub type HorseResult<T> = Result<T, HorseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = HorseError::Validation {
            errors: vec!["no name given".to_string(), "no date of birth given".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("no name given"));
        assert!(message.contains("no date of birth given"));
    }

    #[test]
    fn test_client_message_hides_internal_detail() {
        let err = HorseError::Inconsistent("standing row for vanished horse 9".to_string());
        assert_eq!(err.client_message(), "internal server error");
        assert!(err.to_string().contains("vanished horse 9"));
    }
}
