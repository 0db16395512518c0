//! Repository trait definitions for testability and dependency injection.
//!
//! The managers are written against these traits; production wires in the
//! PostgreSQL implementations, tests use the in-memory mocks. The standing
//! store contract lives here: creation of a tournament header and its
//! standings is one transaction, and round-result writes are serialized per
//! tournament through a row lock on the header.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::horse::{Horse, HorseError, HorseId, HorseResult, NewHorse};
use crate::horse::models::HorseSearchParams;
use crate::tournament::bracket::assign_entry_numbers;
use crate::tournament::{
    NewTournament, Standing, Tournament, TournamentError, TournamentId, TournamentResult,
    TournamentSearchParams,
};

/// Trait for horse repository operations
#[async_trait]
pub trait HorseRepository: Send + Sync {
    /// Create a new horse
    async fn create(&self, new_horse: &NewHorse) -> HorseResult<Horse>;

    /// Get a horse by ID
    async fn get_by_id(&self, id: HorseId) -> HorseResult<Horse>;

    /// The universe of known horse IDs, used for entrant existence checks
    async fn all_ids(&self) -> HorseResult<Vec<HorseId>>;

    /// Get the horses matching the given filters
    async fn search(&self, params: &HorseSearchParams) -> HorseResult<Vec<Horse>>;

    /// Delete a horse by ID
    async fn delete(&self, id: HorseId) -> HorseResult<()>;
}

/// Trait for tournament and standing repository operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Create the tournament header together with one standing row per
    /// entrant (entry numbers by list position, zero rounds reached).
    ///
    /// Atomic: either the header and all standings exist afterwards, or
    /// nothing does.
    async fn create(&self, new_tournament: &NewTournament) -> TournamentResult<Tournament>;

    /// Get a tournament header by ID
    async fn get_by_id(&self, id: TournamentId) -> TournamentResult<Tournament>;

    /// Get one entrant's standing
    async fn get_standing(
        &self,
        tournament_id: TournamentId,
        horse_id: HorseId,
    ) -> TournamentResult<Standing>;

    /// All standings of a tournament, ordered by entry number.
    /// A tournament without standings reports not-found.
    async fn list_standings(&self, tournament_id: TournamentId)
    -> TournamentResult<Vec<Standing>>;

    /// IDs of every tournament a horse is entered in
    async fn list_tournament_ids_for_horse(
        &self,
        horse_id: HorseId,
    ) -> TournamentResult<Vec<TournamentId>>;

    /// Overwrite one standing's rounds-won counter.
    ///
    /// Serialized per tournament: concurrent writers for the same tournament
    /// queue on the header row lock.
    async fn update_round_reached(
        &self,
        tournament_id: TournamentId,
        horse_id: HorseId,
        round_reached: i32,
    ) -> TournamentResult<()>;

    /// Get the tournaments matching the given filters, newest first
    async fn search(&self, params: &TournamentSearchParams) -> TournamentResult<Vec<Tournament>>;
}

/// PostgreSQL implementation of [`HorseRepository`]
pub struct PgHorseRepository {
    pool: PgPool,
}

impl PgHorseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_horse_row(row: &sqlx::postgres::PgRow) -> Horse {
    Horse {
        id: row.get("id"),
        name: row.get("name"),
        date_of_birth: row.get("date_of_birth"),
    }
}

#[async_trait]
impl HorseRepository for PgHorseRepository {
    async fn create(&self, new_horse: &NewHorse) -> HorseResult<Horse> {
        let row = sqlx::query(
            "INSERT INTO horses (name, date_of_birth) VALUES ($1, $2)
             RETURNING id, name, date_of_birth",
        )
        .bind(&new_horse.name)
        .bind(new_horse.date_of_birth)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_horse_row(&row))
    }

    async fn get_by_id(&self, id: HorseId) -> HorseResult<Horse> {
        let rows = sqlx::query("SELECT id, name, date_of_birth FROM horses WHERE id = $1")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        match rows.len() {
            0 => Err(HorseError::NotFound(id)),
            1 => Ok(map_horse_row(&rows[0])),
            n => Err(HorseError::Inconsistent(format!(
                "{n} horses share ID {id}"
            ))),
        }
    }

    async fn all_ids(&self) -> HorseResult<Vec<HorseId>> {
        let rows = sqlx::query("SELECT id FROM horses")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("id")).collect())
    }

    async fn search(&self, params: &HorseSearchParams) -> HorseResult<Vec<Horse>> {
        let rows = sqlx::query(
            "SELECT id, name, date_of_birth FROM horses
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::date IS NULL OR date_of_birth <= $2)
             ORDER BY name
             LIMIT $3",
        )
        .bind(params.name.as_deref())
        .bind(params.born_before)
        .bind(params.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_horse_row).collect())
    }

    async fn delete(&self, id: HorseId) -> HorseResult<()> {
        let result = sqlx::query("DELETE FROM horses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HorseError::NotFound(id));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of [`TournamentRepository`]
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_tournament_row(row: &sqlx::postgres::PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    }
}

fn map_standing_row(row: &sqlx::postgres::PgRow) -> Standing {
    Standing {
        tournament_id: row.get("tournament_id"),
        horse_id: row.get("horse_id"),
        entry_number: row.get("entry_number"),
        round_reached: row.get("round_reached"),
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn create(&self, new_tournament: &NewTournament) -> TournamentResult<Tournament> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "INSERT INTO tournaments (name, start_date, end_date) VALUES ($1, $2, $3)
             RETURNING id, name, start_date, end_date",
        )
        .bind(&new_tournament.name)
        .bind(new_tournament.start_date)
        .bind(new_tournament.end_date)
        .fetch_one(&mut *tx)
        .await?;
        let tournament = map_tournament_row(&row);

        for (horse_id, entry_number) in assign_entry_numbers(&new_tournament.entrant_ids) {
            sqlx::query(
                "INSERT INTO standings (tournament_id, horse_id, entry_number, round_reached)
                 VALUES ($1, $2, $3, 0)",
            )
            .bind(tournament.id)
            .bind(horse_id)
            .bind(entry_number)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(tournament)
    }

    async fn get_by_id(&self, id: TournamentId) -> TournamentResult<Tournament> {
        let rows =
            sqlx::query("SELECT id, name, start_date, end_date FROM tournaments WHERE id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        match rows.len() {
            0 => Err(TournamentError::NotFound(id)),
            1 => Ok(map_tournament_row(&rows[0])),
            n => Err(TournamentError::Inconsistent(format!(
                "{n} tournaments share ID {id}"
            ))),
        }
    }

    async fn get_standing(
        &self,
        tournament_id: TournamentId,
        horse_id: HorseId,
    ) -> TournamentResult<Standing> {
        let rows = sqlx::query(
            "SELECT tournament_id, horse_id, entry_number, round_reached FROM standings
             WHERE tournament_id = $1 AND horse_id = $2",
        )
        .bind(tournament_id)
        .bind(horse_id)
        .fetch_all(&self.pool)
        .await?;

        match rows.len() {
            0 => Err(TournamentError::StandingNotFound {
                tournament_id,
                horse_id,
            }),
            1 => Ok(map_standing_row(&rows[0])),
            n => Err(TournamentError::Inconsistent(format!(
                "{n} standings for tournament {tournament_id} and horse {horse_id}"
            ))),
        }
    }

    async fn list_standings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Standing>> {
        let rows = sqlx::query(
            "SELECT tournament_id, horse_id, entry_number, round_reached FROM standings
             WHERE tournament_id = $1
             ORDER BY entry_number",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(TournamentError::NotFound(tournament_id));
        }
        Ok(rows.iter().map(map_standing_row).collect())
    }

    async fn list_tournament_ids_for_horse(
        &self,
        horse_id: HorseId,
    ) -> TournamentResult<Vec<TournamentId>> {
        let rows = sqlx::query("SELECT tournament_id FROM standings WHERE horse_id = $1")
            .bind(horse_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("tournament_id")).collect())
    }

    async fn update_round_reached(
        &self,
        tournament_id: TournamentId,
        horse_id: HorseId,
        round_reached: i32,
    ) -> TournamentResult<()> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the header serializes concurrent result recording for
        // the same tournament.
        let header = sqlx::query("SELECT id FROM tournaments WHERE id = $1 FOR UPDATE")
            .bind(tournament_id)
            .fetch_optional(&mut *tx)
            .await?;
        if header.is_none() {
            return Err(TournamentError::NotFound(tournament_id));
        }

        let result = sqlx::query(
            "UPDATE standings SET round_reached = $1
             WHERE tournament_id = $2 AND horse_id = $3",
        )
        .bind(round_reached)
        .bind(tournament_id)
        .bind(horse_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TournamentError::StandingNotFound {
                tournament_id,
                horse_id,
            });
        }

        tx.commit().await?;
        Ok(())
    }

    async fn search(&self, params: &TournamentSearchParams) -> TournamentResult<Vec<Tournament>> {
        // A tournament matches a date range when at least one of its days
        // falls inside it.
        let rows = sqlx::query(
            "SELECT id, name, start_date, end_date FROM tournaments
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::date IS NULL OR end_date >= $2)
               AND ($3::date IS NULL OR start_date <= $3)
             ORDER BY start_date DESC",
        )
        .bind(params.name.as_deref())
        .bind(params.start_date)
        .bind(params.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_tournament_row).collect())
    }
}
