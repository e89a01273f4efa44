//! Card instances - one physical card in one position.
//!
//! A `CardInstance` is a row in a state's arena: the cid and display name,
//! the provider-supplied metadata, the equip list it exclusively owns, and
//! small mutable per-instance state (level modifiers and similar).
//!
//! Zone membership is *not* stored here. The zone sequences and field slots
//! own the handles; an instance knows nothing about where it is, which keeps
//! every move a pure remove-then-append on the state side.
//!
//! ## State Values (i64 only)
//!
//! The `state` map uses `FxHashMap<String, i64>` so cloning and fingerprint
//! hashing stay cheap across millions of search nodes. Booleans are 0/1.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::meta::CardMeta;
use super::provider::CardData;
use crate::core::CardHandle;

/// Instance-state key for temporary level modifiers.
pub const LEVEL_MOD: &str = "level_mod";

/// A card instance in a position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// This instance's arena handle.
    pub handle: CardHandle,

    /// Card identifier the metadata provider and effect registry key on.
    pub cid: String,

    /// Display name (board snapshots are projected in names).
    pub name: String,

    /// Provider-supplied stat mapping. Never mutated after construction.
    pub meta: CardMeta,

    /// Cards equipped to this one. Owned exclusively: a handle in this list
    /// appears in no zone sequence and no other equip list.
    #[serde(default)]
    pub equipped: Vec<CardHandle>,

    /// Set when the card was summoned through a legal mechanic this game.
    /// Gates graveyard revival of extra-deck monsters.
    #[serde(default)]
    pub properly_summoned: bool,

    /// Mutable instance state (level modifiers, one-shot markers).
    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

impl CardInstance {
    /// Create an instance from resolved provider data.
    #[must_use]
    pub fn new(handle: CardHandle, cid: impl Into<String>, data: CardData) -> Self {
        Self {
            handle,
            cid: cid.into(),
            name: data.name,
            meta: data.meta,
            equipped: Vec::new(),
            properly_summoned: false,
            state: FxHashMap::default(),
        }
    }

    /// Read an instance-state value, with `default` for absent keys.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    /// Add `delta` to an instance-state value, treating absent as zero.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.state.insert(key.to_string(), current + delta);
    }

    /// Level after temporary modifiers. `None` for cards without a level
    /// (Link monsters, spells): modifiers never conjure a level up.
    #[must_use]
    pub fn effective_level(&self) -> Option<i64> {
        self.meta
            .level()
            .map(|base| base + self.get_state(LEVEL_MOD, 0))
    }

    /// Is any card equipped to this one?
    #[must_use]
    pub fn carries_equips(&self) -> bool {
        !self.equipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::meta::{keys, CardKind};

    fn vanguard() -> CardInstance {
        let data = CardData {
            name: "Blazing Vanguard".to_string(),
            meta: CardMeta::new()
                .with(keys::KIND, CardKind::Effect.tag())
                .with(keys::LEVEL, 4)
                .with(keys::ATTRIBUTE, "FIRE"),
        };
        CardInstance::new(CardHandle::new(0), "DEMO_EXTENDER_001", data)
    }

    #[test]
    fn test_new_instance() {
        let card = vanguard();
        assert_eq!(card.cid, "DEMO_EXTENDER_001");
        assert_eq!(card.name, "Blazing Vanguard");
        assert_eq!(card.meta.level(), Some(4));
        assert!(card.equipped.is_empty());
        assert!(!card.properly_summoned);
    }

    #[test]
    fn test_state_accumulates_deltas() {
        let mut card = vanguard();
        assert_eq!(card.get_state("uses", 0), 0);
        card.modify_state("uses", 2);
        card.modify_state("uses", 1);
        assert_eq!(card.get_state("uses", 0), 3);
        assert_eq!(card.get_state("other", 7), 7);
    }

    #[test]
    fn test_effective_level_with_modifier() {
        let mut card = vanguard();
        assert_eq!(card.effective_level(), Some(4));
        card.modify_state(LEVEL_MOD, 2);
        assert_eq!(card.effective_level(), Some(6));
        card.modify_state(LEVEL_MOD, -3);
        assert_eq!(card.effective_level(), Some(3));
    }

    #[test]
    fn test_no_level_stays_none() {
        let data = CardData {
            name: "Spark Relay".to_string(),
            meta: CardMeta::new().with(keys::KIND, "link").with(keys::LINK_RATING, 1),
        };
        let mut link = CardInstance::new(CardHandle::new(1), "DEMO_LINK1_001", data);
        link.modify_state(LEVEL_MOD, 4);
        assert_eq!(link.effective_level(), None);
    }

    #[test]
    fn test_serialization() {
        let mut card = vanguard();
        card.modify_state(LEVEL_MOD, 1);
        let json = serde_json::to_string(&card).unwrap();
        let back: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
