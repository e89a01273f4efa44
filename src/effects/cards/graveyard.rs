//! Graveyard recursion and resource-trading cards.

use crate::cards::demo::ids;
use crate::cards::instance::LEVEL_MOD;
use crate::cards::CardKind;
use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::activation::{ActivationProfile, ActivationZone};
use crate::effects::combinators::{self, can_activate, params, zone_targets};
use crate::effects::effect::CardEffect;
use crate::state::{decode_field_pos, EventKind, GameState, Restriction, Zone};

use super::{fire_monster, revivable, revivable_small_fire};

/// Ash Recruiter: when this card is sent to the graveyard, special summon
/// 1 Level 3 or lower FIRE monster from your deck.
pub struct AshRecruiter;

static RECRUITER: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "recruit_from_deck",
    ActivationZone::Graveyard,
    EventKind::SentToGy,
)];

impl CardEffect for AshRecruiter {
    fn cid(&self) -> &'static str {
        ids::DEMO_RECRUITER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &RECRUITER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &RECRUITER[0], self.cid())
            || state.field.open_mz_indices().is_empty()
        {
            return Vec::new();
        }
        zone_targets(state, Zone::Deck, |c| {
            fire_monster(c) && c.effective_level().is_some_and(|l| l <= 3)
        })
        .into_iter()
        .map(|t| {
            EffectAction::for_card(self.cid(), "Ash Recruiter", "recruit_from_deck")
                .with_text(params::TARGET, t)
        })
        .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::special_summon_first_open(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Kindling Loader: when this card is special summoned, send the top 2
/// cards of your deck to the graveyard.
pub struct KindlingLoader;

static LOADER: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "mill_on_summon",
    ActivationZone::MonsterField,
    EventKind::SpecialSummon,
)];

impl CardEffect for KindlingLoader {
    fn cid(&self) -> &'static str {
        ids::DEMO_LOADER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &LOADER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &LOADER[0], self.cid()) || state.deck.len() < 2 {
            return Vec::new();
        }
        vec![EffectAction::for_card(self.cid(), "Kindling Loader", "mill_on_summon")]
    }

    fn apply(&self, state: &GameState, _action: &EffectAction) -> Result<GameState, ApplyError> {
        let mut next = state.clone_step();
        for _ in 0..2 {
            let Some(h) = next.deck.pop() else {
                return Err(ApplyError::illegal("deck is empty"));
            };
            next.push_to(Zone::Gy, h);
        }
        Ok(next)
    }
}

/// Ash Salvager: when this card is special summoned, add 1 FIRE monster
/// from your graveyard to your hand.
pub struct AshSalvager;

static SALVAGER: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "retrieve_on_summon",
    ActivationZone::MonsterField,
    EventKind::SpecialSummon,
)];

impl CardEffect for AshSalvager {
    fn cid(&self) -> &'static str {
        ids::DEMO_RETRIEVER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &SALVAGER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &SALVAGER[0], self.cid()) {
            return Vec::new();
        }
        zone_targets(state, Zone::Gy, fire_monster)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Ash Salvager", "retrieve_on_summon")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::add_to_hand(&mut next, Zone::Gy, &target)?;
        Ok(next)
    }
}

/// Furnace Golem: when this card is normal summoned, special summon 1
/// Level 4 or lower FIRE monster from your graveyard. Level 5, so the
/// tribute it cost is usually the monster it brings back.
pub struct FurnaceGolem;

static GOLEM: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "revive_on_tribute_summon",
    ActivationZone::MonsterField,
    EventKind::NormalSummon,
)];

impl CardEffect for FurnaceGolem {
    fn cid(&self) -> &'static str {
        ids::DEMO_GOLEM_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &GOLEM
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &GOLEM[0], self.cid())
            || state.field.open_mz_indices().is_empty()
        {
            return Vec::new();
        }
        zone_targets(state, Zone::Gy, revivable_small_fire)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Furnace Golem", "revive_on_tribute_summon")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::special_summon_first_open(&mut next, Zone::Gy, &target)?;
        Ok(next)
    }
}

/// Rekindle: special summon 1 FIRE monster from your graveyard. You can
/// only special summon FIRE monsters for the rest of this turn.
pub struct Rekindle;

static REKINDLE: [ActivationProfile; 1] =
    [ActivationProfile::ignition("revive_fire", ActivationZone::Hand)];

impl CardEffect for Rekindle {
    fn cid(&self) -> &'static str {
        ids::DEMO_REVIVAL_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &REKINDLE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &REKINDLE[0], self.cid())
            || state.field.open_mz_indices().is_empty()
        {
            return Vec::new();
        }
        zone_targets(state, Zone::Gy, |c| fire_monster(c) && revivable(c))
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Rekindle", "revive_fire")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Hand, self.cid())?;
        combinators::special_summon_first_open(&mut next, Zone::Gy, &target)?;
        next.add_restriction(Restriction::SpecialSummonAttributeOnly("FIRE".to_string()));
        Ok(next)
    }
}

/// Ember Salvage: banish 1 FIRE monster from your graveyard; add 1 Equip
/// Spell from your graveyard to your hand.
pub struct EmberSalvage;

static SALVAGE: [ActivationProfile; 1] =
    [ActivationProfile::ignition("salvage_equip", ActivationZone::Hand)];

const BANISH: &str = "banish";

impl CardEffect for EmberSalvage {
    fn cid(&self) -> &'static str {
        ids::DEMO_SALVAGE_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &SALVAGE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &SALVAGE[0], self.cid()) {
            return Vec::new();
        }
        let costs = zone_targets(state, Zone::Gy, fire_monster);
        let equips = zone_targets(state, Zone::Gy, |c| c.meta.kind() == CardKind::EquipSpell);
        let mut actions = Vec::new();
        for cost in &costs {
            for equip in &equips {
                actions.push(
                    EffectAction::for_card(self.cid(), "Ember Salvage", "salvage_equip")
                        .with_text(BANISH, cost.clone())
                        .with_text(params::TARGET, equip.clone()),
                );
            }
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let cost = action.params.text(BANISH)?.to_string();
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Hand, self.cid())?;
        combinators::banish_from_gy(&mut next, &cost)?;
        combinators::add_to_hand(&mut next, Zone::Gy, &target)?;
        Ok(next)
    }
}

/// Cinder Trader: send this card from the field to the graveyard; draw 1
/// card.
pub struct CinderTrader;

static TRADER: [ActivationProfile; 1] =
    [ActivationProfile::ignition("trade_draw", ActivationZone::MonsterField)];

impl CardEffect for CinderTrader {
    fn cid(&self) -> &'static str {
        ids::DEMO_TRADER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &TRADER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &TRADER[0], self.cid()) || state.deck.is_empty() {
            return Vec::new();
        }
        vec![EffectAction::for_card(self.cid(), "Cinder Trader", "trade_draw")]
    }

    fn apply(&self, state: &GameState, _action: &EffectAction) -> Result<GameState, ApplyError> {
        let Some(pos) = combinators::own_field_position(state, self.cid()) else {
            return Err(ApplyError::illegal("Cinder Trader is not on the field"));
        };
        let mut next = state.clone_step();
        let (zone, index) = decode_field_pos(pos)
            .ok_or_else(|| ApplyError::defect(format!("bad field position code: {pos}")))?;
        next.field_to_gy(zone, index)?;
        next.draw(1)?;
        Ok(next)
    }
}

/// Pyre Adjuster: once per turn each way, raise or lower the Level of 1
/// monster on the field by 1.
pub struct PyreAdjuster;

static ADJUSTER: [ActivationProfile; 2] = [
    ActivationProfile::ignition("raise_level", ActivationZone::MonsterField),
    ActivationProfile::ignition("lower_level", ActivationZone::MonsterField),
];

impl PyreAdjuster {
    fn targets(state: &GameState, lowering: bool) -> Vec<i64> {
        state
            .field_monsters()
            .filter(|(_, _, card)| {
                card.effective_level()
                    .is_some_and(|l| if lowering { l >= 2 } else { true })
            })
            .map(|(zone, index, _)| crate::state::field_pos_code(zone, index))
            .collect()
    }
}

impl CardEffect for PyreAdjuster {
    fn cid(&self) -> &'static str {
        ids::DEMO_LEVELER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &ADJUSTER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        let mut actions = Vec::new();
        for profile in &ADJUSTER {
            if !can_activate(state, profile, self.cid()) {
                continue;
            }
            let lowering = profile.effect_id == "lower_level";
            for pos in Self::targets(state, lowering) {
                actions.push(
                    EffectAction::for_card(self.cid(), "Pyre Adjuster", profile.effect_id)
                        .with_int(params::TARGET_POS, pos),
                );
            }
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let delta = match action.effect_id.as_str() {
            "raise_level" => 1,
            "lower_level" => -1,
            other => {
                return Err(ApplyError::defect(format!("unknown adjuster mode: {other}")));
            }
        };
        let pos = action.params.int(params::TARGET_POS)?;
        let Some((zone, index)) = decode_field_pos(pos) else {
            return Err(ApplyError::defect(format!("bad field position code: {pos}")));
        };
        let Some(host) = state.field.monster_slot(zone, index) else {
            return Err(ApplyError::illegal(format!("no monster at {} {index}", zone.tag())));
        };
        let Some(level) = state.card(host).effective_level() else {
            return Err(ApplyError::illegal("target has no Level"));
        };
        if level + delta < 1 {
            return Err(ApplyError::illegal("Level cannot drop below 1"));
        }
        let mut next = state.clone_step();
        next.card_mut(host).modify_state(LEVEL_MOD, delta);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::demo_pool;
    use crate::cards::MetaProvider;

    fn empty() -> GameState {
        GameState::new()
    }

    fn put(state: &mut GameState, zone: Zone, cid: &str) -> crate::core::CardHandle {
        let pool = demo_pool();
        let h = state.add_card(cid, pool.resolve(cid, None));
        state.push_to(zone, h);
        h
    }

    #[test]
    fn test_recruiter_fires_from_graveyard() {
        let mut state = empty();
        put(&mut state, Zone::Gy, ids::DEMO_RECRUITER_001);
        put(&mut state, Zone::Deck, ids::DEMO_EXTENDER_002);
        put(&mut state, Zone::Deck, ids::DEMO_GOLEM_001);
        state.last_moved_to_gy.clear();
        assert!(AshRecruiter.enumerate(&state).is_empty());

        state.push_event(EventKind::SentToGy, ids::DEMO_RECRUITER_001);
        let actions = AshRecruiter.enumerate(&state);
        // Golem is Level 5, only the Courier qualifies.
        assert_eq!(actions.len(), 1);

        let next = AshRecruiter.apply(&state, &actions[0]).unwrap();
        let summoned = next.field.mz[0].unwrap();
        assert_eq!(next.cid_of(summoned), ids::DEMO_EXTENDER_002);
        assert!(next.has_event(EventKind::SpecialSummon, ids::DEMO_EXTENDER_002));
    }

    #[test]
    fn test_loader_mills_top_two() {
        let pool = demo_pool();
        let mut state = empty();
        let loader = state.add_card(ids::DEMO_LOADER_001, pool.resolve(ids::DEMO_LOADER_001, None));
        state.place_monster(Zone::Mz, 0, loader).unwrap();
        let bottom = put(&mut state, Zone::Deck, ids::DEMO_TUTOR_001);
        let mid = put(&mut state, Zone::Deck, ids::DEMO_EXTENDER_003);
        let top = put(&mut state, Zone::Deck, ids::DEMO_EXTENDER_001);
        state.push_event(EventKind::SpecialSummon, ids::DEMO_LOADER_001);

        let actions = KindlingLoader.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = KindlingLoader.apply(&state, &actions[0]).unwrap();
        assert_eq!(next.deck, vec![bottom]);
        assert_eq!(next.gy, vec![top, mid]);
        assert_eq!(next.last_moved_to_gy.len(), 2);
    }

    #[test]
    fn test_rekindle_restricts_rest_of_turn() {
        let mut state = empty();
        put(&mut state, Zone::Hand, ids::DEMO_REVIVAL_001);
        put(&mut state, Zone::Gy, ids::DEMO_EXTENDER_001);
        state.last_moved_to_gy.clear();

        let actions = Rekindle.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = Rekindle.apply(&state, &actions[0]).unwrap();

        assert_eq!(next.field.monster_count(), 1);
        assert!(next.find_in(Zone::Gy, ids::DEMO_REVIVAL_001).is_some());
        let fire = demo_pool().resolve(ids::DEMO_EXTENDER_002, None).meta;
        assert!(next.special_summon_veto(&fire).is_none());
        let water = crate::cards::CardMeta::new()
            .with(crate::cards::meta::keys::ATTRIBUTE, "WATER")
            .with(crate::cards::meta::keys::KIND, crate::cards::CardKind::Effect.tag());
        assert!(next.special_summon_veto(&water).is_some());
    }

    #[test]
    fn test_salvage_cross_product_and_cost() {
        let mut state = empty();
        put(&mut state, Zone::Hand, ids::DEMO_SALVAGE_001);
        put(&mut state, Zone::Gy, ids::DEMO_EXTENDER_001);
        put(&mut state, Zone::Gy, ids::DEMO_EXTENDER_002);
        put(&mut state, Zone::Gy, ids::DEMO_EQUIP_001);
        state.last_moved_to_gy.clear();

        let actions = EmberSalvage.enumerate(&state);
        assert_eq!(actions.len(), 2);

        let next = EmberSalvage.apply(&state, &actions[0]).unwrap();
        assert_eq!(next.banished.len(), 1);
        assert!(next.find_in(Zone::Hand, ids::DEMO_EQUIP_001).is_some());
    }

    #[test]
    fn test_trader_cashes_itself_in() {
        let pool = demo_pool();
        let mut state = empty();
        let trader = state.add_card(ids::DEMO_TRADER_001, pool.resolve(ids::DEMO_TRADER_001, None));
        state.place_monster(Zone::Mz, 4, trader).unwrap();
        put(&mut state, Zone::Deck, ids::DEMO_EXTENDER_001);

        let actions = CinderTrader.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = CinderTrader.apply(&state, &actions[0]).unwrap();
        assert!(next.field.mz[4].is_none());
        assert!(next.find_in(Zone::Gy, ids::DEMO_TRADER_001).is_some());
        assert_eq!(next.hand.len(), 1);
    }

    #[test]
    fn test_adjuster_levels_both_ways() {
        let pool = demo_pool();
        let mut state = empty();
        let adjuster = state.add_card(ids::DEMO_LEVELER_001, pool.resolve(ids::DEMO_LEVELER_001, None));
        state.place_monster(Zone::Mz, 0, adjuster).unwrap();

        let actions = PyreAdjuster.enumerate(&state);
        // Raise and lower, one target each (itself, Level 3).
        assert_eq!(actions.len(), 2);

        let raise = actions.iter().find(|a| a.effect_id == "raise_level").unwrap();
        let next = PyreAdjuster.apply(&state, raise).unwrap();
        let h = next.field.mz[0].unwrap();
        assert_eq!(next.card(h).effective_level(), Some(4));

        // A Link monster has no Level and is never a target.
        let relay = state.add_card(ids::DEMO_LINK1_001, pool.resolve(ids::DEMO_LINK1_001, None));
        state.place_monster(Zone::Emz, 0, relay).unwrap();
        let actions = PyreAdjuster.enumerate(&state);
        assert_eq!(actions.len(), 2);
    }
}
