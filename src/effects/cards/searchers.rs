//! Deck-thinning cards: searchers, the draw spell, and the field spell.

use crate::cards::demo::ids;
use crate::cards::CardInstance;
use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::activation::{ActivationProfile, ActivationZone};
use crate::effects::combinators::{self, can_activate, params, zone_targets};
use crate::effects::effect::CardEffect;
use crate::state::{EventKind, GameState, Restriction, Zone};

use super::{equip_spell, fire_monster};

fn small_fire(card: &CardInstance) -> bool {
    fire_monster(card) && card.effective_level().is_some_and(|l| l <= 4)
}

/// Flame Herald: when this card is normal summoned, add 1 Level 4 or lower
/// FIRE monster from your deck to your hand.
pub struct FlameHerald;

static HERALD: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "search_on_summon",
    ActivationZone::MonsterField,
    EventKind::NormalSummon,
)];

impl CardEffect for FlameHerald {
    fn cid(&self) -> &'static str {
        ids::DEMO_SEARCHER_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &HERALD
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &HERALD[0], self.cid()) {
            return Vec::new();
        }
        zone_targets(state, Zone::Deck, small_fire)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Flame Herald", "search_on_summon")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Torch Carrier: discard this card; add 1 Equip Spell from your deck to
/// your hand.
pub struct TorchCarrier;

static CARRIER: [ActivationProfile; 1] =
    [ActivationProfile::ignition("discard_search_equip", ActivationZone::Hand)];

impl CardEffect for TorchCarrier {
    fn cid(&self) -> &'static str {
        ids::DEMO_SEARCHER_002
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &CARRIER
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &CARRIER[0], self.cid()) {
            return Vec::new();
        }
        zone_targets(state, Zone::Deck, equip_spell)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Torch Carrier", "discard_search_equip")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Hand, self.cid())?;
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Blazing Call: add 1 FIRE monster from your deck to your hand.
pub struct BlazingCall;

static CALL: [ActivationProfile; 1] =
    [ActivationProfile::ignition("search_fire", ActivationZone::Hand)];

impl CardEffect for BlazingCall {
    fn cid(&self) -> &'static str {
        ids::DEMO_TUTOR_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &CALL
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &CALL[0], self.cid()) {
            return Vec::new();
        }
        zone_targets(state, Zone::Deck, fire_monster)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Blazing Call", "search_fire")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Hand, self.cid())?;
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Stoke the Flames: discard 1 other card; draw 2 cards. You cannot summon
/// from the Extra Deck for the rest of this turn.
pub struct StokeTheFlames;

static STOKE: [ActivationProfile; 1] =
    [ActivationProfile::ignition("discard_draw", ActivationZone::Hand)];

impl CardEffect for StokeTheFlames {
    fn cid(&self) -> &'static str {
        ids::DEMO_DRAW_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &STOKE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &STOKE[0], self.cid()) || state.deck.len() < 2 {
            return Vec::new();
        }
        zone_targets(state, Zone::Hand, |_| true)
            .into_iter()
            .filter(|t| t != self.cid() || combinators::copies_in(state, Zone::Hand, t) >= 2)
            .map(|t| {
                EffectAction::for_card(self.cid(), "Stoke the Flames", "discard_draw")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        if state.deck.len() < 2 {
            return Err(ApplyError::illegal("fewer than 2 cards in deck"));
        }
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Hand, self.cid())?;
        combinators::send_to_gy(&mut next, Zone::Hand, &target)?;
        next.draw(2)?;
        next.add_restriction(Restriction::NoExtraDeckSummon);
        Ok(next)
    }
}

/// Everburning City: activate in your Field Zone; add 1 Level 4 or lower
/// FIRE monster from your deck to your hand. A previous field spell is
/// sent to the graveyard.
pub struct EverburningCity;

static CITY: [ActivationProfile; 1] =
    [ActivationProfile::ignition("activate_field", ActivationZone::Hand)];

impl CardEffect for EverburningCity {
    fn cid(&self) -> &'static str {
        ids::DEMO_FIELD_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &CITY
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &CITY[0], self.cid()) {
            return Vec::new();
        }
        zone_targets(state, Zone::Deck, small_fire)
            .into_iter()
            .map(|t| {
                EffectAction::for_card(self.cid(), "Everburning City", "activate_field")
                    .with_text(params::TARGET, t)
            })
            .collect()
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        let h = next
            .find_in(Zone::Hand, self.cid())
            .ok_or_else(|| ApplyError::illegal("Everburning City is not in hand"))?;
        if next.field.fz[0].is_some() {
            next.field_to_gy(Zone::Fz, 0)?;
        }
        next.remove_from(Zone::Hand, h)?;
        next.place_fz(h)?;
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::demo_pool;
    use crate::cards::MetaProvider;

    fn state_with(hand: &[&str], deck: &[&str]) -> GameState {
        let pool = demo_pool();
        let mut state = GameState::new();
        for cid in hand {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(Zone::Hand, h);
        }
        for cid in deck {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(Zone::Deck, h);
        }
        state
    }

    #[test]
    fn test_herald_waits_for_summon_event() {
        let mut state = state_with(&[], &[ids::DEMO_EXTENDER_001, ids::DEMO_PHOENIX_001]);
        let pool = demo_pool();
        let herald = state.add_card(ids::DEMO_SEARCHER_001, pool.resolve(ids::DEMO_SEARCHER_001, None));
        state.place_monster(Zone::Mz, 0, herald).unwrap();
        assert!(FlameHerald.enumerate(&state).is_empty());

        state.push_event(EventKind::NormalSummon, ids::DEMO_SEARCHER_001);
        let actions = FlameHerald.enumerate(&state);
        // Phoenix is Level 7, so only the Vanguard qualifies.
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].params.text(params::TARGET).unwrap(), ids::DEMO_EXTENDER_001);

        let next = FlameHerald.apply(&state, &actions[0]).unwrap();
        assert!(next.find_in(Zone::Hand, ids::DEMO_EXTENDER_001).is_some());
        assert_eq!(next.deck.len(), 1);
    }

    #[test]
    fn test_carrier_discards_itself_for_equip() {
        let state = state_with(
            &[ids::DEMO_SEARCHER_002],
            &[ids::DEMO_EQUIP_001, ids::DEMO_EQUIP_002, ids::DEMO_TUTOR_001],
        );
        let actions = TorchCarrier.enumerate(&state);
        assert_eq!(actions.len(), 2);

        let next = TorchCarrier.apply(&state, &actions[0]).unwrap();
        assert!(next.find_in(Zone::Gy, ids::DEMO_SEARCHER_002).is_some());
        assert_eq!(next.hand.len(), 1);
        assert_eq!(next.last_moved_to_gy, vec![ids::DEMO_SEARCHER_002.to_string()]);
    }

    #[test]
    fn test_stoke_discard_rules() {
        let one_copy = state_with(
            &[ids::DEMO_DRAW_001],
            &[ids::DEMO_EXTENDER_001, ids::DEMO_EXTENDER_002, ids::DEMO_TUTOR_001],
        );
        // Nothing else to discard.
        assert!(StokeTheFlames.enumerate(&one_copy).is_empty());

        let state = state_with(
            &[ids::DEMO_DRAW_001, ids::DEMO_BLOCKER_001],
            &[ids::DEMO_EXTENDER_001, ids::DEMO_EXTENDER_002, ids::DEMO_TUTOR_001],
        );
        let actions = StokeTheFlames.enumerate(&state);
        assert_eq!(actions.len(), 1);

        let next = StokeTheFlames.apply(&state, &actions[0]).unwrap();
        assert_eq!(next.hand.len(), 2);
        assert_eq!(next.deck.len(), 1);
        assert!(next.extra_summon_veto().is_some());
    }

    #[test]
    fn test_city_replaces_previous_field_spell() {
        let pool = demo_pool();
        let mut state = state_with(&[ids::DEMO_FIELD_001], &[ids::DEMO_EXTENDER_001]);
        let old = state.add_card("OLD_FIELD", pool.resolve("OLD_FIELD", None));
        state.place_fz(old).unwrap();

        let actions = EverburningCity.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = EverburningCity.apply(&state, &actions[0]).unwrap();

        assert!(next.find_in(Zone::Gy, "OLD_FIELD").is_some());
        let fz = next.field.fz[0].unwrap();
        assert_eq!(next.cid_of(fz), ids::DEMO_FIELD_001);
        assert!(next.find_in(Zone::Hand, ids::DEMO_EXTENDER_001).is_some());
    }
}
