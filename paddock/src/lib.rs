//! # Paddock
//!
//! A horse tournament library built around single-elimination brackets.
//!
//! Horses are registered once and can then be entered into tournaments of a
//! fixed bracket size. Per-entrant progress is stored flat (seed position plus
//! rounds won); the bracket tree itself is never persisted and is instead
//! reassembled from the flat standings on every read.
//!
//! ## Core Modules
//!
//! - [`horse`]: horse records, search and lifecycle management
//! - [`tournament`]: tournament creation, standings and the bracket assembler
//! - [`db`]: PostgreSQL connection pooling and repository implementations
//!
//! ## Example
//!
//! ```
//! use paddock::tournament::{BRACKET_SIZE, bracket::assign_entry_numbers};
//!
//! // Seeding follows submission order: first horse gets entry number 1.
//! let seeds = assign_entry_numbers(&[401, 402, 403, 404, 405, 406, 407, 408]);
//! assert_eq!(seeds.len(), BRACKET_SIZE);
//! assert_eq!(seeds[0], (401, 1));
//! ```

/// PostgreSQL connection pooling and repositories.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Horse records and lifecycle management.
pub mod horse;
pub use horse::{Horse, HorseError, HorseId, HorseManager, HorseResult};

/// Tournament creation, standings and bracket assembly.
pub mod tournament;
pub use tournament::{
    BRACKET_SIZE, BracketNode, Participant, Standing, Tournament, TournamentError, TournamentId,
    TournamentManager, TournamentResult,
};
