//! Horse data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Horse ID type
pub type HorseId = i64;

/// A registered horse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horse {
    pub id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

/// Unvalidated horse registration data as submitted by a caller.
///
/// Fields are optional so that validation can report every missing or invalid
/// field at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HorseCandidate {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// A validated horse ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHorse {
    pub name: String,
    pub date_of_birth: NaiveDate,
}

/// Horse search filters; `None` fields are ignored.
///
/// The name matches as a case-insensitive substring. `born_before` bounds the
/// date of birth inclusively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HorseSearchParams {
    pub name: Option<String>,
    pub born_before: Option<NaiveDate>,
    pub limit: Option<i64>,
}
