//! Board scoring: the external oracle the search ranks children by.
//!
//! A score is a lexicographic key, not a scalar, so a rubric can say
//! "equipped bodies first, then bodies, then cards in hand" without
//! collapsing those into weights. The search never interprets the key
//! beyond ordering it; `reached_target` alone feeds the diversified
//! beam selection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::snapshot::BoardSnapshot;

/// Total-order rank for one board.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardScore {
    /// Lexicographic key; greater is better.
    pub rank_key: SmallVec<[i64; 6]>,

    /// Has this board reached the outcome class the rubric is after?
    /// States that have not are "setup" and get reserved beam slots.
    pub reached_target: bool,
}

impl BoardScore {
    #[must_use]
    pub fn new(rank_key: impl Into<SmallVec<[i64; 6]>>, reached_target: bool) -> Self {
        Self { rank_key: rank_key.into(), reached_target }
    }
}

/// Scoring policy over projected boards.
///
/// Implementations must be pure functions of the snapshot: the search
/// assumes two projections of the same state score identically.
pub trait BoardEvaluator {
    fn evaluate(&self, snapshot: &BoardSnapshot) -> BoardScore;
}

/// Default rubric: chase equipped boards.
///
/// Ranks by attached equips, then hosts wearing them, then fielded
/// bodies, then cards kept in hand. The target outcome is any board
/// with at least one equip attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct EquipCountEvaluator;

impl BoardEvaluator for EquipCountEvaluator {
    fn evaluate(&self, snapshot: &BoardSnapshot) -> BoardScore {
        let attached = snapshot.equip_count() as i64;
        let hosts = snapshot.equips.len() as i64;
        let bodies = snapshot.field.len() as i64;
        let in_hand = snapshot.hand.len() as i64;
        BoardScore::new(
            SmallVec::from_slice(&[attached, hosts, bodies, in_hand]),
            attached > 0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::snapshot::EquipSummary;

    fn board(field: &[&str], hand: &[&str], equips: Vec<EquipSummary>) -> BoardSnapshot {
        BoardSnapshot {
            field: field.iter().map(|s| s.to_string()).collect(),
            hand: hand.iter().map(|s| s.to_string()).collect(),
            equips,
            ..BoardSnapshot::default()
        }
    }

    #[test]
    fn test_scores_order_lexicographically() {
        let eval = EquipCountEvaluator;

        let bare = eval.evaluate(&board(&["Spark Relay"], &[], Vec::new()));
        let equipped = eval.evaluate(&board(
            &["Spark Relay"],
            &[],
            vec![EquipSummary {
                host: "Spark Relay".to_string(),
                equips: vec!["Ember Blade".to_string()],
            }],
        ));

        assert!(equipped > bare);
        assert!(equipped.reached_target);
        assert!(!bare.reached_target);
    }

    #[test]
    fn test_wider_board_beats_fuller_hand() {
        let eval = EquipCountEvaluator;
        let wide = eval.evaluate(&board(&["A", "B"], &[], Vec::new()));
        let holding = eval.evaluate(&board(&["A"], &["B", "C", "D"], Vec::new()));
        assert!(wide > holding);
    }

    #[test]
    fn test_score_serializes() {
        let score = BoardScore::new(SmallVec::from_slice(&[2, 1, 3, 4]), true);
        let json = serde_json::to_string(&score).unwrap();
        let back: BoardScore = serde_json::from_str(&json).unwrap();
        assert_eq!(score, back);
    }
}
