//! Horse module providing registration, search and lifecycle management.
//!
//! Horses are the entrant universe for tournaments: creation of a tournament
//! checks its entrant IDs against this module, and read paths come back here
//! for display names and birth dates. Deleting a horse that is entered in a
//! tournament is refused to keep standings from dangling.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{HorseError, HorseResult};
pub use manager::HorseManager;
pub use models::{Horse, HorseCandidate, HorseId, HorseSearchParams, NewHorse};
