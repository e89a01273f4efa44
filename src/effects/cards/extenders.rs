//! Self-summoning monsters: the cards that put bodies on board.

use crate::cards::demo::ids;
use crate::cards::CardKind;
use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::activation::{ActivationProfile, ActivationZone};
use crate::effects::combinators::{self, can_activate, self_summon_actions, slot_param};
use crate::effects::effect::CardEffect;
use crate::state::{GameState, Zone};

use super::fire_monster;

/// Blazing Vanguard: special summon this card from your hand.
pub struct BlazingVanguard;

static VANGUARD: [ActivationProfile; 1] =
    [ActivationProfile::ignition("special_summon_self", ActivationZone::Hand)];

impl CardEffect for BlazingVanguard {
    fn cid(&self) -> &'static str {
        ids::DEMO_EXTENDER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &VANGUARD
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &VANGUARD[0], self.cid()) {
            return Vec::new();
        }
        self_summon_actions(state, self.cid(), "Blazing Vanguard", "special_summon_self")
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let slot = slot_param(action)?;
        let mut next = state.clone_step();
        combinators::special_summon(&mut next, Zone::Hand, self.cid(), slot)?;
        Ok(next)
    }
}

/// Ember Courier: if you control a FIRE monster, special summon this card
/// from your hand.
pub struct EmberCourier;

static COURIER: [ActivationProfile; 1] =
    [ActivationProfile::ignition("special_summon_self", ActivationZone::Hand)];

impl CardEffect for EmberCourier {
    fn cid(&self) -> &'static str {
        ids::DEMO_EXTENDER_002
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &COURIER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &COURIER[0], self.cid())
            || !combinators::controls_monster_where(state, fire_monster)
        {
            return Vec::new();
        }
        self_summon_actions(state, self.cid(), "Ember Courier", "special_summon_self")
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        if !combinators::controls_monster_where(state, fire_monster) {
            return Err(ApplyError::illegal("no FIRE monster on the field"));
        }
        let slot = slot_param(action)?;
        let mut next = state.clone_step();
        combinators::special_summon(&mut next, Zone::Hand, self.cid(), slot)?;
        Ok(next)
    }
}

/// Cinder Sprite: if you control a FIRE monster, special summon this card
/// from your graveyard.
pub struct CinderSprite;

static SPRITE: [ActivationProfile; 1] =
    [ActivationProfile::ignition("special_summon_self_gy", ActivationZone::Graveyard)];

impl CardEffect for CinderSprite {
    fn cid(&self) -> &'static str {
        ids::DEMO_EXTENDER_003
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &SPRITE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &SPRITE[0], self.cid())
            || !combinators::controls_monster_where(state, fire_monster)
        {
            return Vec::new();
        }
        self_summon_actions(state, self.cid(), "Cinder Sprite", "special_summon_self_gy")
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        if !combinators::controls_monster_where(state, fire_monster) {
            return Err(ApplyError::illegal("no FIRE monster on the field"));
        }
        let slot = slot_param(action)?;
        let mut next = state.clone_step();
        combinators::special_summon(&mut next, Zone::Gy, self.cid(), slot)?;
        Ok(next)
    }
}

/// Magma Leaper: if a FIRE monster is in your graveyard, special summon
/// this card from your hand.
pub struct MagmaLeaper;

static LEAPER: [ActivationProfile; 1] =
    [ActivationProfile::ignition("special_summon_self", ActivationZone::Hand)];

impl CardEffect for MagmaLeaper {
    fn cid(&self) -> &'static str {
        ids::DEMO_EXTENDER_004
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &LEAPER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &LEAPER[0], self.cid())
            || combinators::zone_targets(state, Zone::Gy, fire_monster).is_empty()
        {
            return Vec::new();
        }
        self_summon_actions(state, self.cid(), "Magma Leaper", "special_summon_self")
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        if combinators::zone_targets(state, Zone::Gy, fire_monster).is_empty() {
            return Err(ApplyError::illegal("no FIRE monster in the graveyard"));
        }
        let slot = slot_param(action)?;
        let mut next = state.clone_step();
        combinators::special_summon(&mut next, Zone::Hand, self.cid(), slot)?;
        Ok(next)
    }
}

/// Ashen Phoenix: if you control a Link monster, special summon this card
/// from your graveyard.
pub struct AshenPhoenix;

static PHOENIX: [ActivationProfile; 1] =
    [ActivationProfile::ignition("revive_self", ActivationZone::Graveyard)];

fn link_monster(card: &crate::cards::CardInstance) -> bool {
    card.meta.kind() == CardKind::Link
}

impl CardEffect for AshenPhoenix {
    fn cid(&self) -> &'static str {
        ids::DEMO_PHOENIX_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &PHOENIX
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &PHOENIX[0], self.cid())
            || !combinators::controls_monster_where(state, link_monster)
        {
            return Vec::new();
        }
        self_summon_actions(state, self.cid(), "Ashen Phoenix", "revive_self")
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        if !combinators::controls_monster_where(state, link_monster) {
            return Err(ApplyError::illegal("no Link monster on the field"));
        }
        let slot = slot_param(action)?;
        let mut next = state.clone_step();
        combinators::special_summon(&mut next, Zone::Gy, self.cid(), slot)?;
        Ok(next)
    }
}
