//! Horse lifecycle management.

use std::sync::Arc;

use chrono::Utc;
use log::debug;

use crate::db::repository::{HorseRepository, TournamentRepository};
use crate::tournament::{TournamentError, validator::validate_id};

use super::errors::{HorseError, HorseResult};
use super::models::{Horse, HorseCandidate, HorseId, HorseSearchParams, NewHorse};

/// Maximum accepted name length, shared with the tournament naming policy
const MAX_NAME_LEN: usize = 255;

/// Horse manager
pub struct HorseManager {
    horses: Arc<dyn HorseRepository>,
    tournaments: Arc<dyn TournamentRepository>,
}

impl HorseManager {
    /// Create a new horse manager
    pub fn new(
        horses: Arc<dyn HorseRepository>,
        tournaments: Arc<dyn TournamentRepository>,
    ) -> Self {
        Self {
            horses,
            tournaments,
        }
    }

    /// Register a new horse
    pub async fn create(&self, candidate: &HorseCandidate) -> HorseResult<Horse> {
        debug!("create({:?})", candidate.name);
        let new_horse = validate_candidate(candidate)?;
        self.horses.create(&new_horse).await
    }

    /// Get a horse by ID
    pub async fn get(&self, id: HorseId) -> HorseResult<Horse> {
        debug!("get({id})");
        check_id(id)?;
        self.horses.get_by_id(id).await
    }

    /// Get the horses matching the given filters
    pub async fn search(&self, params: &HorseSearchParams) -> HorseResult<Vec<Horse>> {
        debug!("search({params:?})");
        self.horses.search(params).await
    }

    /// Delete a horse.
    ///
    /// Refused while the horse is entered in any tournament: removing it
    /// would leave standings behind that reference a vanished horse, which
    /// the read paths treat as corrupted state.
    pub async fn delete(&self, id: HorseId) -> HorseResult<()> {
        debug!("delete({id})");
        check_id(id)?;

        let tournaments = self
            .tournaments
            .list_tournament_ids_for_horse(id)
            .await
            .map_err(storage_error)?;
        if !tournaments.is_empty() {
            return Err(HorseError::EnteredInTournaments {
                horse_id: id,
                tournaments,
            });
        }

        self.horses.delete(id).await
    }
}

fn check_id(id: HorseId) -> HorseResult<()> {
    validate_id(id).map_err(|_| HorseError::Validation {
        errors: vec!["id must not be zero".to_string()],
    })
}

fn storage_error(err: TournamentError) -> HorseError {
    match err {
        TournamentError::Database(inner) => HorseError::Database(inner),
        other => HorseError::Inconsistent(other.to_string()),
    }
}

/// Check registration data and produce the validated [`NewHorse`].
///
/// Every violation is collected before returning, mirroring the tournament
/// validator.
fn validate_candidate(candidate: &HorseCandidate) -> HorseResult<NewHorse> {
    let mut errors = Vec::new();

    match candidate.name.as_deref() {
        None => errors.push("no name given".to_string()),
        Some(name) if name.trim().is_empty() => errors.push("no name given".to_string()),
        Some(name) => {
            if name.len() > MAX_NAME_LEN {
                errors.push(format!("name must not exceed {MAX_NAME_LEN} characters"));
            }
            if !name.chars().all(|c| c.is_ascii_alphabetic()) {
                errors.push("name must contain letters only".to_string());
            }
        }
    }

    match candidate.date_of_birth {
        None => errors.push("no date of birth given".to_string()),
        Some(date_of_birth) => {
            if date_of_birth > Utc::now().date_naive() {
                errors.push("date of birth must not be in the future".to_string());
            }
        }
    }

    if !errors.is_empty() {
        return Err(HorseError::Validation { errors });
    }

    Ok(NewHorse {
        name: candidate.name.clone().unwrap_or_default(),
        date_of_birth: candidate.date_of_birth.unwrap_or_default(),
    })
}
