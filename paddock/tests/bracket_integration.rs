//! Integration tests for bracket assembly
//!
//! These tests drive a bracket through its rounds the way a tournament
//! operator would: record the winners of each round in the flat standings,
//! reassemble the tree, and check what the presentation layer would show.

use chrono::NaiveDate;
use paddock::tournament::bracket::{assign_entry_numbers, build_bracket};
use paddock::tournament::{BRACKET_SIZE, BracketNode, Participant, TournamentError, total_rounds};

fn participant(horse_id: i64, entry_number: i32, round_reached: i32) -> Participant {
    Participant {
        horse_id,
        name: format!("Horse{horse_id}"),
        date_of_birth: NaiveDate::from_ymd_opt(2018, 3, 14).unwrap(),
        entry_number,
        round_reached,
    }
}

/// Standings for a full reference-size bracket, seeds 1..=8, nothing played.
fn fresh_bracket() -> Vec<Participant> {
    (1..=8).map(|n| participant(n as i64, n, 0)).collect()
}

fn occupant_id(node: &BracketNode) -> Option<i64> {
    node.occupant.as_ref().map(|p| p.horse_id)
}

#[test]
fn test_reference_bracket_plays_three_rounds() {
    assert_eq!(total_rounds(BRACKET_SIZE), 3);
}

#[test]
fn test_entry_assignment_covers_the_whole_bracket() {
    let ids: Vec<i64> = vec![19, 3, 44, 8, 27, 92, 5, 61];
    let seeds = assign_entry_numbers(&ids);

    let numbers: Vec<i32> = seeds.iter().map(|&(_, n)| n).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    // Submission order is authoritative.
    assert_eq!(seeds[0], (19, 1));
    assert_eq!(seeds[7], (61, 8));
}

#[test]
fn test_fresh_bracket_is_fully_open() {
    let tree = build_bracket(&fresh_bracket(), BRACKET_SIZE).unwrap();

    assert_eq!(tree.leaf_count(), 8);
    assert_eq!(tree.matchup_count(), 7);
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.occupant, None);

    // Every matchup above the leaves is open.
    let finals = tree.branches.as_ref().unwrap();
    for semi in finals.iter() {
        assert_eq!(semi.occupant, None);
        for quarter in semi.branches.as_ref().unwrap().iter() {
            assert_eq!(quarter.occupant, None);
        }
    }
}

#[test]
fn test_bracket_through_a_whole_tournament() {
    let mut standings = fresh_bracket();

    // Round one: seeds 2, 3, 5, 8 win.
    for winner in [2, 3, 5, 8] {
        standings[winner - 1].round_reached = 1;
    }
    let tree = build_bracket(&standings, BRACKET_SIZE).unwrap();
    let semis = tree.branches.as_ref().unwrap();
    let quarters_left = semis[0].branches.as_ref().unwrap();
    let quarters_right = semis[1].branches.as_ref().unwrap();
    assert_eq!(occupant_id(&quarters_left[0]), Some(2));
    assert_eq!(occupant_id(&quarters_left[1]), Some(3));
    assert_eq!(occupant_id(&quarters_right[0]), Some(5));
    assert_eq!(occupant_id(&quarters_right[1]), Some(8));
    assert_eq!(tree.occupant, None);

    // Round two: seeds 3 and 8 advance to the final.
    standings[2].round_reached = 2;
    standings[7].round_reached = 2;
    let tree = build_bracket(&standings, BRACKET_SIZE).unwrap();
    let semis = tree.branches.as_ref().unwrap();
    assert_eq!(occupant_id(&semis[0]), Some(3));
    assert_eq!(occupant_id(&semis[1]), Some(8));
    assert_eq!(tree.occupant, None);

    // Final: seed 8 takes the tournament.
    standings[7].round_reached = 3;
    let tree = build_bracket(&standings, BRACKET_SIZE).unwrap();
    assert_eq!(occupant_id(&tree), Some(8));

    // The flat rows still carry the whole history.
    assert_eq!(standings[7].round_reached, 3);
    assert_eq!(standings[2].round_reached, 2);
    assert_eq!(standings[1].round_reached, 1);
}

#[test]
fn test_partial_round_leaves_other_matchups_open() {
    let mut standings = fresh_bracket();
    // Only the first matchup of round one has been played.
    standings[0].round_reached = 1;

    let tree = build_bracket(&standings, BRACKET_SIZE).unwrap();
    let semis = tree.branches.as_ref().unwrap();
    let quarters_left = semis[0].branches.as_ref().unwrap();

    assert_eq!(occupant_id(&quarters_left[0]), Some(1));
    assert_eq!(quarters_left[1].occupant, None);
    assert_eq!(semis[0].occupant, None);
}

#[test]
fn test_corrupted_standings_fail_as_internal_faults() {
    // Short one row.
    let short: Vec<Participant> = fresh_bracket().into_iter().take(7).collect();
    assert!(matches!(
        build_bracket(&short, BRACKET_SIZE),
        Err(TournamentError::Inconsistent(_))
    ));

    // Two winners recorded for the first matchup.
    let mut double = fresh_bracket();
    double[0].round_reached = 1;
    double[1].round_reached = 1;
    assert!(matches!(
        build_bracket(&double, BRACKET_SIZE),
        Err(TournamentError::Inconsistent(_))
    ));
}

#[test]
fn test_consistency_faults_never_leak_detail_to_clients() {
    let mut double = fresh_bracket();
    double[0].round_reached = 1;
    double[1].round_reached = 1;

    let err = build_bracket(&double, BRACKET_SIZE).unwrap_err();
    assert_eq!(err.client_message(), "internal server error");
}
