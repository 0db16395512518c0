//! Tournament orchestration: creation, detail reads and standings assembly.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error};

use crate::db::repository::{HorseRepository, TournamentRepository};
use crate::horse::{HorseError, HorseId};

use super::bracket::build_bracket;
use super::errors::{TournamentError, TournamentResult};
use super::models::{
    BRACKET_SIZE, Participant, Standing, Tournament, TournamentCandidate, TournamentDetail,
    TournamentId, TournamentSearchParams, TournamentStandings, total_rounds,
};
use super::validator::{validate_create, validate_id};

/// Tournament manager
pub struct TournamentManager {
    tournaments: Arc<dyn TournamentRepository>,
    horses: Arc<dyn HorseRepository>,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        horses: Arc<dyn HorseRepository>,
    ) -> Self {
        Self {
            tournaments,
            horses,
        }
    }

    /// Create a tournament.
    ///
    /// Validates the candidate against the current horse universe, persists
    /// the header together with the initial standings (entry numbers from
    /// submission order, zero rounds reached) in one transaction, and returns
    /// the detail view.
    pub async fn create(&self, candidate: &TournamentCandidate) -> TournamentResult<TournamentDetail> {
        debug!("create({:?})", candidate.name);

        let known_ids: HashSet<HorseId> = self
            .horses
            .all_ids()
            .await
            .map_err(collaborator_error)?
            .into_iter()
            .collect();
        let new_tournament = validate_create(candidate, &known_ids)?;

        let tournament = self.tournaments.create(&new_tournament).await?;
        let participants = self.participants(tournament.id).await?;
        Ok(TournamentDetail::new(tournament, participants))
    }

    /// Get a tournament's header and flat participant list.
    ///
    /// The cheaper read path: no bracket assembly.
    pub async fn get_detail(&self, id: TournamentId) -> TournamentResult<TournamentDetail> {
        debug!("get_detail({id})");
        validate_id(id)?;

        let tournament = self.tournaments.get_by_id(id).await?;
        let participants = self.participants(id).await?;
        Ok(TournamentDetail::new(tournament, participants))
    }

    /// Get a tournament's standings: header, flat participant list and the
    /// bracket tree assembled from the flat rows.
    pub async fn get_standings(&self, id: TournamentId) -> TournamentResult<TournamentStandings> {
        debug!("get_standings({id})");
        let detail = self.get_detail(id).await?;

        let tree = build_bracket(&detail.participants, BRACKET_SIZE).inspect_err(|err| {
            // A malformed bracket is corrupted storage, not a bad request;
            // keep the detail here, clients only see an opaque error.
            error!("standings of tournament {id} failed to assemble: {err}");
        })?;

        Ok(TournamentStandings {
            id: detail.id,
            name: detail.name,
            start_date: detail.start_date,
            end_date: detail.end_date,
            participants: detail.participants,
            tree,
        })
    }

    /// Record a round result by overwriting one entrant's rounds-won counter.
    ///
    /// The write is serialized per tournament by the repository so that two
    /// concurrent recordings cannot interleave on the same bracket.
    pub async fn record_round_result(
        &self,
        tournament_id: TournamentId,
        horse_id: HorseId,
        round_reached: i32,
    ) -> TournamentResult<Standing> {
        debug!("record_round_result({tournament_id}, {horse_id}, {round_reached})");
        validate_id(tournament_id)?;
        validate_id(horse_id)?;

        let rounds = total_rounds(BRACKET_SIZE);
        if !(0..=rounds).contains(&round_reached) {
            return Err(TournamentError::validation(format!(
                "round reached must be between 0 and {rounds}"
            )));
        }

        self.tournaments
            .update_round_reached(tournament_id, horse_id, round_reached)
            .await?;
        self.tournaments.get_standing(tournament_id, horse_id).await
    }

    /// Get the tournaments matching the given filters, newest first
    pub async fn search(
        &self,
        params: &TournamentSearchParams,
    ) -> TournamentResult<Vec<Tournament>> {
        debug!("search({params:?})");
        self.tournaments.search(params).await
    }

    /// Load a tournament's standings and enrich each with the horse's display
    /// fields, ordered by entry number.
    async fn participants(&self, id: TournamentId) -> TournamentResult<Vec<Participant>> {
        let standings = self.tournaments.list_standings(id).await?;

        let mut participants = Vec::with_capacity(standings.len());
        for standing in standings {
            let horse = self
                .horses
                .get_by_id(standing.horse_id)
                .await
                .map_err(|err| standing_horse_error(id, standing.horse_id, err))?;
            participants.push(Participant {
                horse_id: standing.horse_id,
                name: horse.name,
                date_of_birth: horse.date_of_birth,
                entry_number: standing.entry_number,
                round_reached: standing.round_reached,
            });
        }
        Ok(participants)
    }
}

fn collaborator_error(err: HorseError) -> TournamentError {
    match err {
        HorseError::Database(inner) => TournamentError::Database(inner),
        other => TournamentError::Inconsistent(other.to_string()),
    }
}

/// A standing row pointing at a horse the horse store no longer knows is a
/// broken invariant on the store's side, so a not-found there becomes a
/// consistency fault here.
fn standing_horse_error(
    tournament_id: TournamentId,
    horse_id: HorseId,
    err: HorseError,
) -> TournamentError {
    match err {
        HorseError::NotFound(_) => {
            let fault = TournamentError::Inconsistent(format!(
                "standing of tournament {tournament_id} references horse {horse_id}, \
                 which does not exist"
            ));
            error!("{fault}");
            fault
        }
        HorseError::Database(inner) => TournamentError::Database(inner),
        other => TournamentError::Inconsistent(other.to_string()),
    }
}
