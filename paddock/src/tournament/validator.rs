//! Structural validation for tournament creation.
//!
//! All checks run and every violation is collected before anything is
//! returned, so a caller sees the complete list of problems in one response.

use std::collections::HashSet;

use log::debug;

use crate::horse::HorseId;

use super::errors::{TournamentError, TournamentResult};
use super::models::{BRACKET_SIZE, NewTournament, TournamentCandidate};

/// Maximum accepted name length
const MAX_NAME_LEN: usize = 255;

/// Check a creation candidate against the structural rules and, if every rule
/// holds, produce the validated [`NewTournament`].
///
/// Rules:
/// - name present, non-blank, at most 255 characters, letters only;
/// - start date present; end date present and not before the start date;
/// - entrant list present with exactly [`BRACKET_SIZE`] entries;
/// - every entrant ID exists in `known_horse_ids`;
/// - no entrant listed twice.
///
/// Pure check: no side effects, and the full list of violated rules is
/// returned in a single [`TournamentError::Validation`].
pub fn validate_create(
    candidate: &TournamentCandidate,
    known_horse_ids: &HashSet<HorseId>,
) -> TournamentResult<NewTournament> {
    debug!("validate_create({:?})", candidate.name);
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

    if candidate.start_date.is_none() {
        errors.push("no start date given".to_string());
    }
    match candidate.end_date {
        None => errors.push("no end date given".to_string()),
        Some(end) => {
            if let Some(start) = candidate.start_date {
                if end < start {
                    errors.push("end date must not be before start date".to_string());
                }
            }
        }
    }

    match candidate.entrants.as_deref() {
        None => errors.push("no entrants given".to_string()),
        Some(entrants) => {
            if entrants.len() != BRACKET_SIZE {
                errors.push(format!(
                    "exactly {BRACKET_SIZE} entrants are required, got {}",
                    entrants.len()
                ));
            }

            let mut seen = HashSet::new();
            for entrant in entrants {
                if !known_horse_ids.contains(&entrant.id) {
                    errors.push(format!("horse {} does not exist", entrant.id));
                }
                if !seen.insert(entrant.id) {
                    errors.push(format!("horse {} is listed more than once", entrant.id));
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(TournamentError::Validation { errors });
    }

    match (
        candidate.name.as_deref(),
        candidate.start_date,
        candidate.end_date,
        candidate.entrants.as_deref(),
    ) {
        (Some(name), Some(start_date), Some(end_date), Some(entrants)) => Ok(NewTournament {
            name: name.to_string(),
            start_date,
            end_date,
            entrant_ids: entrants.iter().map(|e| e.id).collect(),
        }),
        // Presence of every field was checked above.
        _ => Err(TournamentError::Inconsistent(
            "validated candidate is missing fields".to_string(),
        )),
    }
}

/// Reject the unset sentinel ID before it reaches a lookup.
///
/// Request paths deserialize absent IDs to zero; zero is never a valid key.
pub fn validate_id(id: i64) -> TournamentResult<()> {
    if id == 0 {
        return Err(TournamentError::validation("id must not be zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::tournament::models::EntrantSelection;

    fn entrant(id: HorseId) -> EntrantSelection {
        EntrantSelection {
            id,
            name: None,
            date_of_birth: None,
        }
    }

    fn known_ids() -> HashSet<HorseId> {
        (1..=20).collect()
    }

    fn valid_candidate() -> TournamentCandidate {
        TournamentCandidate {
            name: Some("SummerCup".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 8),
            entrants: Some((1..=8).map(entrant).collect()),
        }
    }

    fn expect_errors(result: TournamentResult<NewTournament>) -> Vec<String> {
        match result {
            Err(TournamentError::Validation { errors }) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_candidate_passes() {
        let new_tournament = validate_create(&valid_candidate(), &known_ids()).unwrap();
        assert_eq!(new_tournament.name, "SummerCup");
        assert_eq!(new_tournament.entrant_ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_entrant_order_is_preserved() {
        let mut candidate = valid_candidate();
        candidate.entrants = Some([5, 3, 8, 1, 2, 7, 4, 6].map(entrant).to_vec());

        let new_tournament = validate_create(&candidate, &known_ids()).unwrap();
        assert_eq!(new_tournament.entrant_ids, vec![5, 3, 8, 1, 2, 7, 4, 6]);
    }

    #[test]
    fn test_missing_name() {
        let mut candidate = valid_candidate();
        candidate.name = None;
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["no name given"]);
    }

    #[test]
    fn test_blank_name() {
        let mut candidate = valid_candidate();
        candidate.name = Some("   ".to_string());
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["no name given"]);
    }

    #[test]
    fn test_name_with_digits_rejected() {
        let mut candidate = valid_candidate();
        candidate.name = Some("Cup2024".to_string());
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["name must contain letters only"]);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut candidate = valid_candidate();
        candidate.name = Some("a".repeat(256));
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["name must not exceed 255 characters"]);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut candidate = valid_candidate();
        candidate.start_date = NaiveDate::from_ymd_opt(2024, 6, 8);
        candidate.end_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["end date must not be before start date"]);
    }

    #[test]
    fn test_single_day_tournament_allowed() {
        let mut candidate = valid_candidate();
        candidate.start_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        candidate.end_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(validate_create(&candidate, &known_ids()).is_ok());
    }

    #[test]
    fn test_seven_entrants_cites_count_rule() {
        let mut candidate = valid_candidate();
        candidate.entrants = Some((1..=7).map(entrant).collect());
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["exactly 8 entrants are required, got 7"]);
    }

    #[test]
    fn test_unknown_horse_rejected() {
        let mut candidate = valid_candidate();
        candidate.entrants = Some([1, 2, 3, 4, 5, 6, 7, 999].map(entrant).to_vec());
        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert_eq!(errors, vec!["horse 999 does not exist"]);
    }

    #[test]
    fn test_duplicate_cited_alongside_other_violations() {
        let mut candidate = valid_candidate();
        candidate.name = Some("Cup 24".to_string());
        candidate.entrants = Some([1, 2, 3, 4, 5, 6, 7, 7].map(entrant).to_vec());

        let errors = expect_errors(validate_create(&candidate, &known_ids()));
        assert!(errors.contains(&"name must contain letters only".to_string()));
        assert!(errors.contains(&"horse 7 is listed more than once".to_string()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_everything_missing_reports_every_rule() {
        let errors = expect_errors(validate_create(&TournamentCandidate::default(), &known_ids()));
        assert_eq!(
            errors,
            vec!["no name given", "no start date given", "no end date given", "no entrants given"]
        );
    }

    #[test]
    fn test_zero_id_rejected() {
        assert!(matches!(
            validate_id(0),
            Err(TournamentError::Validation { .. })
        ));
        assert!(validate_id(1).is_ok());
    }
}
