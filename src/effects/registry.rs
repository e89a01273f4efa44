//! Registry of scripted card abilities.
//!
//! The registry owns one `CardEffect` per cid and is the single entry
//! point for card-driven actions: enumeration scans the zones a scripted
//! card could act from, and application re-validates the declared gates
//! before dispatching, so stale actions replayed against a changed
//! position fail as illegal instead of corrupting it.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::core::ApplyError;
use crate::state::{phase, GameState};

use super::action::EffectAction;
use super::activation::ActivationTiming;
use super::effect::CardEffect;

/// All registered card behavior.
#[derive(Default)]
pub struct EffectRegistry {
    effects: FxHashMap<String, Box<dyn CardEffect>>,
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cids: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        cids.sort_unstable();
        f.debug_struct("EffectRegistry").field("cids", &cids).finish()
    }
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every scripted card in the demo pool.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for effect in super::cards::standard_effects() {
            registry.register(effect);
        }
        registry
    }

    /// Register a card's behavior.
    ///
    /// Panics if the cid already has behavior registered.
    pub fn register(&mut self, effect: Box<dyn CardEffect>) {
        let cid = effect.cid();
        if self.effects.contains_key(cid) {
            panic!("effects for {cid} already registered");
        }
        self.effects.insert(cid.to_string(), effect);
    }

    /// Look up behavior by cid.
    #[must_use]
    pub fn get(&self, cid: &str) -> Option<&dyn CardEffect> {
        self.effects.get(cid).map(Box::as_ref)
    }

    /// Is this cid scripted?
    #[must_use]
    pub fn contains(&self, cid: &str) -> bool {
        self.effects.contains_key(cid)
    }

    /// Number of scripted cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Does this cid declare any equip ability?
    #[must_use]
    pub fn has_equip_effect(&self, cid: &str) -> bool {
        self.effects
            .get(cid)
            .is_some_and(|e| e.activations().iter().any(|p| p.effect_id.starts_with("equip")))
    }

    /// Every card-driven action available from this position.
    ///
    /// Scans hand, monster field, and graveyard; each distinct cid is
    /// asked once, so duplicate copies do not duplicate actions. The
    /// result is sorted canonically and stable across runs.
    #[must_use]
    pub fn enumerate_effect_actions(&self, state: &GameState) -> Vec<EffectAction> {
        let mut cids: BTreeSet<&str> = BTreeSet::new();
        for &h in state.hand.iter().chain(state.gy.iter()) {
            cids.insert(state.cid_of(h));
        }
        for (_, _, card) in state.field_monsters() {
            cids.insert(card.cid.as_str());
        }

        let mut actions = Vec::new();
        for cid in cids {
            if let Some(effect) = self.effects.get(cid) {
                actions.extend(effect.enumerate(state));
            }
        }
        actions.sort_by_cached_key(EffectAction::canon);
        actions
    }

    /// Validate and resolve one card-driven action.
    pub fn apply_effect_action(
        &self,
        state: &GameState,
        action: &EffectAction,
    ) -> Result<GameState, ApplyError> {
        let Some(effect) = self.effects.get(action.cid.as_str()) else {
            return Err(ApplyError::defect(format!(
                "no scripted effects for {}",
                action.cid
            )));
        };
        let Some(profile) = effect
            .activations()
            .iter()
            .find(|p| p.effect_id == action.effect_id)
        else {
            return Err(ApplyError::defect(format!(
                "{} does not declare {}",
                action.cid, action.effect_id
            )));
        };

        if !profile.zone.contains(state, &action.cid) {
            return Err(ApplyError::illegal(format!(
                "{} is not in {:?}",
                action.cid, profile.zone
            )));
        }
        match profile.timing {
            ActivationTiming::Ignition => {
                if !phase::is_main(&state.phase) {
                    return Err(ApplyError::illegal(format!(
                        "ignition outside main phase: {}",
                        state.phase
                    )));
                }
            }
            ActivationTiming::Trigger => {
                let Some(kind) = profile.consumes else {
                    return Err(ApplyError::defect(format!(
                        "trigger profile {} has no event kind",
                        profile.effect_id
                    )));
                };
                if !state.has_event(kind, &action.cid) {
                    return Err(ApplyError::illegal(format!(
                        "no pending {} trigger for {}",
                        kind.tag(),
                        action.cid
                    )));
                }
            }
        }
        if profile.once_per_turn && state.opt_spent(&action.cid, &action.effect_id) {
            return Err(ApplyError::illegal(format!(
                "{} of {} already used this turn",
                action.effect_id, action.cid
            )));
        }

        let mut next = effect.apply(state, action)?;
        if let Some(kind) = profile.consumes {
            next.consume_event(kind, &action.cid)?;
        }
        if profile.once_per_turn {
            next.spend_opt(&action.cid, &action.effect_id);
        }
        Ok(next)
    }
}
