//! Equip spells. Attaching is repeatable, so several copies can stack on
//! one turn's board; the recovery abilities are the once-per-turn part.

use crate::cards::demo::ids;
use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::activation::{ActivationProfile, ActivationZone};
use crate::effects::combinators::{self, can_activate, monster_positions, params};
use crate::effects::effect::CardEffect;
use crate::state::{decode_field_pos, GameState, Zone};

use super::fire_monster;

fn equip_actions(cid: &str, name: &str, effect_id: &str, hosts: &[i64]) -> Vec<EffectAction> {
    hosts
        .iter()
        .map(|&pos| {
            EffectAction::for_card(cid, name, effect_id).with_int(params::TARGET_POS, pos)
        })
        .collect()
}

/// Ember Blade: equip to a monster on the field. If this card is in your
/// graveyard, add it to your hand.
pub struct EmberBlade;

static BLADE: [ActivationProfile; 2] = [
    ActivationProfile::ignition("equip_from_hand", ActivationZone::Hand).repeatable(),
    ActivationProfile::ignition("retrieve_self", ActivationZone::Graveyard),
];

impl CardEffect for EmberBlade {
    fn cid(&self) -> &'static str {
        ids::DEMO_EQUIP_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &BLADE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        let mut actions = Vec::new();
        if can_activate(state, &BLADE[0], self.cid()) {
            let hosts = monster_positions(state);
            actions.extend(equip_actions(self.cid(), "Ember Blade", "equip_from_hand", &hosts));
        }
        if can_activate(state, &BLADE[1], self.cid()) {
            actions.push(EffectAction::for_card(self.cid(), "Ember Blade", "retrieve_self"));
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let mut next = state.clone_step();
        match action.effect_id.as_str() {
            "equip_from_hand" => {
                let pos = action.params.int(params::TARGET_POS)?;
                combinators::equip_to(&mut next, Zone::Hand, self.cid(), pos)?;
            }
            "retrieve_self" => {
                combinators::add_to_hand(&mut next, Zone::Gy, self.cid())?;
            }
            other => {
                return Err(ApplyError::defect(format!("unknown blade mode: {other}")));
            }
        }
        Ok(next)
    }
}

/// Phoenix Plume: equip to a monster on the field. If this card is in your
/// graveyard, equip it to a FIRE monster you control instead.
pub struct PhoenixPlume;

static PLUME: [ActivationProfile; 2] = [
    ActivationProfile::ignition("equip_from_hand", ActivationZone::Hand).repeatable(),
    ActivationProfile::ignition("equip_self_from_gy", ActivationZone::Graveyard),
];

impl CardEffect for PhoenixPlume {
    fn cid(&self) -> &'static str {
        ids::DEMO_EQUIP_002
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &PLUME
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        let mut actions = Vec::new();
        if can_activate(state, &PLUME[0], self.cid()) {
            let hosts = monster_positions(state);
            actions.extend(equip_actions(self.cid(), "Phoenix Plume", "equip_from_hand", &hosts));
        }
        if can_activate(state, &PLUME[1], self.cid()) {
            let fire_hosts: Vec<i64> = state
                .field_monsters()
                .filter(|(_, _, card)| fire_monster(card))
                .map(|(zone, index, _)| crate::state::field_pos_code(zone, index))
                .collect();
            actions.extend(equip_actions(
                self.cid(),
                "Phoenix Plume",
                "equip_self_from_gy",
                &fire_hosts,
            ));
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let pos = action.params.int(params::TARGET_POS)?;
        let mut next = state.clone_step();
        match action.effect_id.as_str() {
            "equip_from_hand" => {
                combinators::equip_to(&mut next, Zone::Hand, self.cid(), pos)?;
            }
            "equip_self_from_gy" => {
                let host_is_fire = decode_field_pos(pos)
                    .and_then(|(zone, index)| state.field.monster_slot(zone, index))
                    .is_some_and(|h| fire_monster(state.card(h)));
                if !host_is_fire {
                    return Err(ApplyError::illegal("target is not a FIRE monster"));
                }
                combinators::equip_to(&mut next, Zone::Gy, self.cid(), pos)?;
            }
            other => {
                return Err(ApplyError::defect(format!("unknown plume mode: {other}")));
            }
        }
        Ok(next)
    }
}
