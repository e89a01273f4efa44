//! The state-to-snapshot projection the evaluator consumes.
//!
//! Evaluators rank finished boards, and their rubric is deck policy, not
//! engine rules. The projection hands them plain name lists so a rubric
//! can be written (and serialized, and diffed in test output) without
//! touching handles or metadata.

use serde::{Deserialize, Serialize};

use crate::core::CardHandle;
use crate::state::GameState;

/// The equips riding on one fielded monster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipSummary {
    /// Display name of the wearing monster.
    pub host: String,
    /// Display names of the attached cards, in attach order.
    pub equips: Vec<String>,
}

/// A GameState flattened to display names, zone by zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub hand: Vec<String>,
    /// Occupied monster slots, MZ then EMZ, ascending index.
    pub field: Vec<String>,
    /// Occupied spell/trap and field-spell slots.
    pub spells: Vec<String>,
    pub gy: Vec<String>,
    pub banished: Vec<String>,
    pub deck: Vec<String>,
    pub extra: Vec<String>,
    /// One entry per fielded monster carrying at least one equip.
    pub equips: Vec<EquipSummary>,
}

impl BoardSnapshot {
    /// Project a state. Pure: no rule logic, no mutation.
    #[must_use]
    pub fn project(state: &GameState) -> Self {
        let names = |handles: &[CardHandle]| -> Vec<String> {
            handles.iter().map(|&h| state.name_of(h).to_string()).collect()
        };

        let mut field = Vec::new();
        let mut equips = Vec::new();
        for (_, _, card) in state.field_monsters() {
            field.push(card.name.clone());
            if !card.equipped.is_empty() {
                equips.push(EquipSummary {
                    host: card.name.clone(),
                    equips: card
                        .equipped
                        .iter()
                        .map(|&h| state.name_of(h).to_string())
                        .collect(),
                });
            }
        }

        let mut spells = Vec::new();
        for slot in &state.field.stz {
            if let Some(h) = slot {
                spells.push(state.name_of(*h).to_string());
            }
        }
        if let Some(h) = state.field.fz[0] {
            spells.push(state.name_of(h).to_string());
        }

        Self {
            hand: names(&state.hand),
            field,
            spells,
            gy: names(&state.gy),
            banished: names(&state.banished),
            deck: names(&state.deck),
            extra: names(&state.extra),
            equips,
        }
    }

    /// Total equips attached across the board.
    #[must_use]
    pub fn equip_count(&self) -> usize {
        self.equips.iter().map(|e| e.equips.len()).sum()
    }
}
