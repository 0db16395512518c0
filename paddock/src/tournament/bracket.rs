//! Single-elimination bracket assembly.
//!
//! Standings are stored flat (seed position plus rounds won, one row per
//! entrant); the bracket tree is derived from them on every read and never
//! persisted. Assembly is a pure function: the same standings always
//! reconstruct the same tree.
//!
//! Seeding pairs neighbours: entry numbers (1,2), (3,4), … meet in round one,
//! the winners of adjacent matchups meet in the next round, and so on up to
//! the final at the root. A node belonging to round `r` is occupied by
//! whichever child entrant has won at least `r` rounds; if neither has, the
//! matchup is still open. Both having won `r` rounds is impossible under
//! well-formed data and is reported as a consistency fault, never resolved
//! silently.

use serde::Serialize;

use crate::horse::HorseId;

use super::errors::{TournamentError, TournamentResult};
use super::models::Participant;

/// One matchup slot in the bracket tree.
///
/// Leaves carry a single entrant; internal nodes carry the two feeding
/// matchups and the entrant who advanced into the slot, if that round has
/// been played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketNode {
    pub occupant: Option<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Box<[BracketNode; 2]>>,
}

impl BracketNode {
    fn leaf(participant: Participant) -> Self {
        Self {
            occupant: Some(participant),
            branches: None,
        }
    }

    /// Join two previous-round nodes into the node for `round`.
    fn pair(left: BracketNode, right: BracketNode, round: i32) -> TournamentResult<Self> {
        let advanced_left = left
            .occupant
            .as_ref()
            .filter(|p| p.round_reached >= round);
        let advanced_right = right
            .occupant
            .as_ref()
            .filter(|p| p.round_reached >= round);

        let occupant = match (advanced_left, advanced_right) {
            (Some(a), Some(b)) => {
                return Err(TournamentError::Inconsistent(format!(
                    "horses {} and {} are both recorded as winning round {round}",
                    a.horse_id, b.horse_id
                )));
            }
            (Some(winner), None) | (None, Some(winner)) => Some(winner.clone()),
            (None, None) => None,
        };

        Ok(Self {
            occupant,
            branches: Some(Box::new([left, right])),
        })
    }

    /// Number of levels below and including this node; 1 for a leaf.
    pub fn depth(&self) -> usize {
        match &self.branches {
            None => 1,
            Some(children) => 1 + children[0].depth().max(children[1].depth()),
        }
    }

    /// Number of leaves under this node
    pub fn leaf_count(&self) -> usize {
        match &self.branches {
            None => 1,
            Some(children) => children[0].leaf_count() + children[1].leaf_count(),
        }
    }

    /// Number of internal (matchup) nodes under and including this node
    pub fn matchup_count(&self) -> usize {
        match &self.branches {
            None => 0,
            Some(children) => 1 + children[0].matchup_count() + children[1].matchup_count(),
        }
    }
}

/// Assign entry numbers to entrants by submission order, 1-based.
///
/// This is the only seeding the system performs; caller order is
/// authoritative and the bracket is never re-seeded afterwards.
pub fn assign_entry_numbers(entrant_ids: &[HorseId]) -> Vec<(HorseId, i32)> {
    entrant_ids
        .iter()
        .enumerate()
        .map(|(position, &id)| (id, position as i32 + 1))
        .collect()
}

/// Rebuild the bracket tree from one tournament's flat standings.
///
/// Expects exactly `bracket_size` participants whose entry numbers form the
/// contiguous range 1..=N; anything else means the stored standings are
/// corrupt and yields [`TournamentError::Inconsistent`], deliberately
/// distinct from not-found and validation errors.
///
/// Read-only transform, O(N) in the number of participants.
pub fn build_bracket(
    participants: &[Participant],
    bracket_size: usize,
) -> TournamentResult<BracketNode> {
    if bracket_size < 2 || !bracket_size.is_power_of_two() {
        return Err(TournamentError::Inconsistent(format!(
            "bracket size {bracket_size} is not a power of two"
        )));
    }
    if participants.len() != bracket_size {
        return Err(TournamentError::Inconsistent(format!(
            "expected {bracket_size} standings, found {}",
            participants.len()
        )));
    }

    let mut seeded = participants.to_vec();
    seeded.sort_by_key(|p| p.entry_number);
    for (index, participant) in seeded.iter().enumerate() {
        let expected = index as i32 + 1;
        if participant.entry_number != expected {
            return Err(TournamentError::Inconsistent(format!(
                "entry numbers are not a contiguous permutation of 1..={bracket_size}: \
                 expected {expected}, found {}",
                participant.entry_number
            )));
        }
    }

    let mut nodes: Vec<BracketNode> = seeded.into_iter().map(BracketNode::leaf).collect();
    let mut round = 1;
    while nodes.len() > 1 {
        let mut next = Vec::with_capacity(nodes.len() / 2);
        let mut pairs = nodes.into_iter();
        while let (Some(left), Some(right)) = (pairs.next(), pairs.next()) {
            next.push(BracketNode::pair(left, right, round)?);
        }
        nodes = next;
        round += 1;
    }

    nodes.pop().ok_or_else(|| {
        TournamentError::Inconsistent("bracket assembly produced no root".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn participant(horse_id: HorseId, entry_number: i32, round_reached: i32) -> Participant {
        Participant {
            horse_id,
            name: format!("Horse{horse_id}"),
            date_of_birth: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            entry_number,
            round_reached,
        }
    }

    /// Four-entrant bracket with round one played: seeds 1 and 3 won.
    fn four_after_round_one() -> Vec<Participant> {
        vec![
            participant(11, 1, 1),
            participant(12, 2, 0),
            participant(13, 3, 1),
            participant(14, 4, 0),
        ]
    }

    fn occupant_id(node: &BracketNode) -> Option<HorseId> {
        node.occupant.as_ref().map(|p| p.horse_id)
    }

    #[test]
    fn test_entry_numbers_follow_submission_order() {
        let seeds = assign_entry_numbers(&[50, 40, 30, 20]);
        assert_eq!(seeds, vec![(50, 1), (40, 2), (30, 3), (20, 4)]);
    }

    #[test]
    fn test_round_one_pairs_neighbouring_seeds() {
        let tree = build_bracket(&four_after_round_one(), 4).unwrap();

        let semis = tree.branches.as_ref().unwrap();
        let left_pair = semis[0].branches.as_ref().unwrap();
        let right_pair = semis[1].branches.as_ref().unwrap();

        assert_eq!(occupant_id(&left_pair[0]), Some(11));
        assert_eq!(occupant_id(&left_pair[1]), Some(12));
        assert_eq!(occupant_id(&right_pair[0]), Some(13));
        assert_eq!(occupant_id(&right_pair[1]), Some(14));
    }

    #[test]
    fn test_round_winners_occupy_their_matchups() {
        let tree = build_bracket(&four_after_round_one(), 4).unwrap();

        let semis = tree.branches.as_ref().unwrap();
        assert_eq!(occupant_id(&semis[0]), Some(11));
        assert_eq!(occupant_id(&semis[1]), Some(13));
        // Neither semifinal winner has won round two, so the final is open.
        assert_eq!(tree.occupant, None);
    }

    #[test]
    fn test_seed_order_is_independent_of_row_order() {
        let mut shuffled = four_after_round_one();
        shuffled.reverse();

        let tree = build_bracket(&four_after_round_one(), 4).unwrap();
        let tree_from_shuffled = build_bracket(&shuffled, 4).unwrap();
        assert_eq!(tree, tree_from_shuffled);
    }

    #[test]
    fn test_champion_occupies_the_root() {
        let participants = vec![
            participant(11, 1, 1),
            participant(12, 2, 0),
            participant(13, 3, 2),
            participant(14, 4, 0),
        ];

        let tree = build_bracket(&participants, 4).unwrap();
        assert_eq!(occupant_id(&tree), Some(13));
    }

    #[test]
    fn test_unplayed_bracket_has_open_matchups() {
        let participants: Vec<_> = (1..=8).map(|n| participant(n as HorseId, n, 0)).collect();
        let tree = build_bracket(&participants, 8).unwrap();

        assert_eq!(tree.occupant, None);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.matchup_count(), 7);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let participants = four_after_round_one();
        let first = build_bracket(&participants, 4).unwrap();
        let second = build_bracket(&participants, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_row_count_is_a_consistency_fault() {
        let participants: Vec<_> = (1..=7).map(|n| participant(n as HorseId, n, 0)).collect();
        let err = build_bracket(&participants, 8).unwrap_err();
        assert!(matches!(err, TournamentError::Inconsistent(_)));
    }

    #[test]
    fn test_gapped_entry_numbers_are_a_consistency_fault() {
        let participants = vec![
            participant(11, 1, 0),
            participant(12, 2, 0),
            participant(13, 3, 0),
            participant(14, 5, 0),
        ];
        let err = build_bracket(&participants, 4).unwrap_err();
        assert!(matches!(err, TournamentError::Inconsistent(_)));
    }

    #[test]
    fn test_duplicate_entry_numbers_are_a_consistency_fault() {
        let participants = vec![
            participant(11, 1, 0),
            participant(12, 2, 0),
            participant(13, 2, 0),
            participant(14, 4, 0),
        ];
        let err = build_bracket(&participants, 4).unwrap_err();
        assert!(matches!(err, TournamentError::Inconsistent(_)));
    }

    #[test]
    fn test_two_winners_for_one_matchup_is_a_consistency_fault() {
        let participants = vec![
            participant(11, 1, 1),
            participant(12, 2, 1),
            participant(13, 3, 0),
            participant(14, 4, 0),
        ];
        let err = build_bracket(&participants, 4).unwrap_err();
        match err {
            TournamentError::Inconsistent(message) => {
                assert!(message.contains("both recorded as winning round 1"));
            }
            other => panic!("expected consistency fault, got {other:?}"),
        }
    }

    #[test]
    fn test_non_power_of_two_size_is_a_consistency_fault() {
        let participants: Vec<_> = (1..=6).map(|n| participant(n as HorseId, n, 0)).collect();
        let err = build_bracket(&participants, 6).unwrap_err();
        assert!(matches!(err, TournamentError::Inconsistent(_)));
    }

    #[test]
    fn test_tree_serializes_without_branches_on_leaves() {
        let tree = build_bracket(&four_after_round_one(), 4).unwrap();
        let json = serde_json::to_value(&tree).unwrap();

        // Root is open and has two branches.
        assert!(json["occupant"].is_null());
        assert_eq!(json["branches"].as_array().unwrap().len(), 2);

        // Leaves omit the branches field entirely.
        let leaf = &json["branches"][0]["branches"][0];
        assert_eq!(leaf["occupant"]["horse_id"], 11);
        assert!(leaf.get("branches").is_none());
    }
}
