//! Extra-deck bodies and their payoffs.
//!
//! The summons themselves are core actions; what lives here is what the
//! bodies do once they arrive: on-summon searches and revivals, and the
//! ignition equips that make the link climb worth finishing.

use crate::cards::demo::ids;
use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::activation::{ActivationProfile, ActivationZone};
use crate::effects::combinators::{self, can_activate, params, zone_targets};
use crate::effects::effect::CardEffect;
use crate::state::{EventKind, GameState, Zone};

use super::{equip_spell, fire_monster, revivable_small_fire};

fn search_targets(
    state: &GameState,
    cid: &str,
    name: &str,
    effect_id: &str,
    zone: Zone,
    pred: impl Fn(&crate::cards::CardInstance) -> bool,
) -> Vec<EffectAction> {
    zone_targets(state, zone, pred)
        .into_iter()
        .map(|t| EffectAction::for_card(cid, name, effect_id).with_text(params::TARGET, t))
        .collect()
}

/// Attach an equip spell from the graveyard to this card itself.
fn apply_equip_from_gy(
    state: &GameState,
    cid: &str,
    action: &EffectAction,
) -> Result<GameState, ApplyError> {
    let target = action.params.text(params::TARGET)?.to_string();
    let Some(pos) = combinators::own_field_position(state, cid) else {
        return Err(ApplyError::illegal(format!("{cid} is not on the field")));
    };
    let mut next = state.clone_step();
    combinators::equip_to(&mut next, Zone::Gy, &target, pos)?;
    Ok(next)
}

/// Spark Relay: when this card is link summoned, add 1 Level 2 or lower
/// FIRE monster from your deck to your hand.
pub struct SparkRelay;

static RELAY: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "search_on_summon",
    ActivationZone::MonsterField,
    EventKind::LinkSummon,
)];

impl CardEffect for SparkRelay {
    fn cid(&self) -> &'static str {
        ids::DEMO_LINK1_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &RELAY
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &RELAY[0], self.cid()) {
            return Vec::new();
        }
        search_targets(state, self.cid(), "Spark Relay", "search_on_summon", Zone::Deck, |c| {
            fire_monster(c) && c.effective_level().is_some_and(|l| l <= 2)
        })
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Twin Furnace: when this card is link summoned, send 1 FIRE monster
/// from your deck to the graveyard.
pub struct TwinFurnace;

static FURNACE: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "send_from_deck",
    ActivationZone::MonsterField,
    EventKind::LinkSummon,
)];

impl CardEffect for TwinFurnace {
    fn cid(&self) -> &'static str {
        ids::DEMO_LINK2_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &FURNACE
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &FURNACE[0], self.cid()) {
            return Vec::new();
        }
        search_targets(
            state,
            self.cid(),
            "Twin Furnace",
            "send_from_deck",
            Zone::Deck,
            fire_monster,
        )
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Pyre Marshal: equip 1 Equip Spell from your graveyard to this card.
pub struct PyreMarshal;

static MARSHAL: [ActivationProfile; 1] =
    [ActivationProfile::ignition("equip_from_gy", ActivationZone::MonsterField)];

impl CardEffect for PyreMarshal {
    fn cid(&self) -> &'static str {
        ids::DEMO_LINK3_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &MARSHAL
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &MARSHAL[0], self.cid()) {
            return Vec::new();
        }
        search_targets(state, self.cid(), "Pyre Marshal", "equip_from_gy", Zone::Gy, equip_spell)
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        apply_equip_from_gy(state, self.cid(), action)
    }
}

/// Inferno Sovereign: when this card is link summoned, special summon 1
/// Level 4 or lower FIRE monster from your graveyard. It can also dress
/// itself from the graveyard's equips.
pub struct InfernoSovereign;

static SOVEREIGN: [ActivationProfile; 2] = [
    ActivationProfile::trigger(
        "revive_on_summon",
        ActivationZone::MonsterField,
        EventKind::LinkSummon,
    ),
    ActivationProfile::ignition("equip_from_gy", ActivationZone::MonsterField),
];

impl CardEffect for InfernoSovereign {
    fn cid(&self) -> &'static str {
        ids::DEMO_LINK4_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &SOVEREIGN
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        let mut actions = Vec::new();
        if can_activate(state, &SOVEREIGN[0], self.cid())
            && !state.field.open_mz_indices().is_empty()
        {
            actions.extend(search_targets(
                state,
                self.cid(),
                "Inferno Sovereign",
                "revive_on_summon",
                Zone::Gy,
                revivable_small_fire,
            ));
        }
        if can_activate(state, &SOVEREIGN[1], self.cid()) {
            actions.extend(search_targets(
                state,
                self.cid(),
                "Inferno Sovereign",
                "equip_from_gy",
                Zone::Gy,
                equip_spell,
            ));
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        match action.effect_id.as_str() {
            "revive_on_summon" => {
                let target = action.params.text(params::TARGET)?.to_string();
                let mut next = state.clone_step();
                combinators::special_summon_first_open(&mut next, Zone::Gy, &target)?;
                Ok(next)
            }
            "equip_from_gy" => apply_equip_from_gy(state, self.cid(), action),
            other => Err(ApplyError::defect(format!("unknown sovereign mode: {other}"))),
        }
    }
}

/// Bulwark Colossus: when this card is xyz summoned, add 1 Equip Spell
/// from your deck to your hand.
pub struct BulwarkColossus;

static COLOSSUS: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "search_equip_on_summon",
    ActivationZone::MonsterField,
    EventKind::XyzSummon,
)];

impl CardEffect for BulwarkColossus {
    fn cid(&self) -> &'static str {
        ids::DEMO_XYZ_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &COLOSSUS
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &COLOSSUS[0], self.cid()) {
            return Vec::new();
        }
        search_targets(
            state,
            self.cid(),
            "Bulwark Colossus",
            "search_equip_on_summon",
            Zone::Deck,
            equip_spell,
        )
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::add_to_hand(&mut next, Zone::Deck, &target)?;
        Ok(next)
    }
}

/// Obsidian Warlord: when this card is xyz summoned, special summon 1
/// Level 4 or lower FIRE monster from your graveyard.
pub struct ObsidianWarlord;

static WARLORD: [ActivationProfile; 1] = [ActivationProfile::trigger(
    "revive_on_summon",
    ActivationZone::MonsterField,
    EventKind::XyzSummon,
)];

impl CardEffect for ObsidianWarlord {
    fn cid(&self) -> &'static str {
        ids::DEMO_XYZ_002
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &WARLORD
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &WARLORD[0], self.cid())
            || state.field.open_mz_indices().is_empty()
        {
            return Vec::new();
        }
        search_targets(
            state,
            self.cid(),
            "Obsidian Warlord",
            "revive_on_summon",
            Zone::Gy,
            revivable_small_fire,
        )
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::special_summon_first_open(&mut next, Zone::Gy, &target)?;
        Ok(next)
    }
}

/// Volcanic Seraph: return 1 banished FIRE monster to the graveyard.
pub struct VolcanicSeraph;

static SERAPH: [ActivationProfile; 1] =
    [ActivationProfile::ignition("recover_banished", ActivationZone::MonsterField)];

impl CardEffect for VolcanicSeraph {
    fn cid(&self) -> &'static str {
        ids::DEMO_SYNCHRO_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &SERAPH
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &SERAPH[0], self.cid()) {
            return Vec::new();
        }
        search_targets(
            state,
            self.cid(),
            "Volcanic Seraph",
            "recover_banished",
            Zone::Banished,
            fire_monster,
        )
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        let target = action.params.text(params::TARGET)?.to_string();
        let mut next = state.clone_step();
        combinators::send_to_gy(&mut next, Zone::Banished, &target)?;
        Ok(next)
    }
}

/// Chimeric Pyrelord: equip 1 Equip Spell from your graveyard to this
/// card.
pub struct ChimericPyrelord;

static PYRELORD: [ActivationProfile; 1] =
    [ActivationProfile::ignition("equip_from_gy", ActivationZone::MonsterField)];

impl CardEffect for ChimericPyrelord {
    fn cid(&self) -> &'static str {
        ids::DEMO_FUSION_001
    }

    fn activations(&self) -> &'static [ActivationProfile] {
        &PYRELORD
    }

    fn enumerate(&self, state: &GameState) -> Vec<EffectAction> {
        if !can_activate(state, &PYRELORD[0], self.cid()) {
            return Vec::new();
        }
        search_targets(
            state,
            self.cid(),
            "Chimeric Pyrelord",
            "equip_from_gy",
            Zone::Gy,
            equip_spell,
        )
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        apply_equip_from_gy(state, self.cid(), action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::demo_pool;
    use crate::cards::MetaProvider;

    fn on_field(state: &mut GameState, zone: Zone, index: usize, cid: &str) -> crate::core::CardHandle {
        let pool = demo_pool();
        let h = state.add_card(cid, pool.resolve(cid, None));
        state.place_monster(zone, index, h).unwrap();
        h
    }

    fn into_zone(state: &mut GameState, zone: Zone, cid: &str) -> crate::core::CardHandle {
        let pool = demo_pool();
        let h = state.add_card(cid, pool.resolve(cid, None));
        state.push_to(zone, h);
        h
    }

    #[test]
    fn test_relay_searches_only_after_link_summon() {
        let mut state = GameState::new();
        on_field(&mut state, Zone::Emz, 0, ids::DEMO_LINK1_001);
        into_zone(&mut state, Zone::Deck, ids::DEMO_EXTENDER_003);
        into_zone(&mut state, Zone::Deck, ids::DEMO_EXTENDER_001);
        assert!(SparkRelay.enumerate(&state).is_empty());

        state.push_event(EventKind::LinkSummon, ids::DEMO_LINK1_001);
        let actions = SparkRelay.enumerate(&state);
        // Vanguard is Level 4, only the Sprite fits the Level 2 cap.
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].params.text(params::TARGET).unwrap(),
            ids::DEMO_EXTENDER_003
        );
    }

    #[test]
    fn test_marshal_equips_itself_from_gy() {
        let mut state = GameState::new();
        let marshal = on_field(&mut state, Zone::Emz, 0, ids::DEMO_LINK3_001);
        let blade = into_zone(&mut state, Zone::Gy, ids::DEMO_EQUIP_001);
        state.last_moved_to_gy.clear();

        let actions = PyreMarshal.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = PyreMarshal.apply(&state, &actions[0]).unwrap();
        assert_eq!(next.card(marshal).equipped, vec![blade]);
        assert!(next.gy.is_empty());
    }

    #[test]
    fn test_warlord_revive_skips_levelless_bodies() {
        let mut state = GameState::new();
        on_field(&mut state, Zone::Mz, 0, ids::DEMO_XYZ_002);
        into_zone(&mut state, Zone::Gy, ids::DEMO_EXTENDER_001);
        // A link body has no Level and is never a target.
        into_zone(&mut state, Zone::Gy, ids::DEMO_LINK1_001);
        state.last_moved_to_gy.clear();
        state.push_event(EventKind::XyzSummon, ids::DEMO_XYZ_002);

        let actions = ObsidianWarlord.enumerate(&state);
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].params.text(params::TARGET).unwrap(),
            ids::DEMO_EXTENDER_001
        );

        let next = ObsidianWarlord.apply(&state, &actions[0]).unwrap();
        assert_eq!(next.field.monster_count(), 2);
    }

    #[test]
    fn test_seraph_recycles_banished() {
        let mut state = GameState::new();
        on_field(&mut state, Zone::Mz, 0, ids::DEMO_SYNCHRO_001);
        into_zone(&mut state, Zone::Banished, ids::DEMO_EXTENDER_001);

        let actions = VolcanicSeraph.enumerate(&state);
        assert_eq!(actions.len(), 1);
        let next = VolcanicSeraph.apply(&state, &actions[0]).unwrap();
        assert!(next.banished.is_empty());
        assert!(next.find_in(Zone::Gy, ids::DEMO_EXTENDER_001).is_some());
        assert_eq!(next.last_moved_to_gy, vec![ids::DEMO_EXTENDER_001.to_string()]);
    }

    #[test]
    fn test_sovereign_two_abilities() {
        let mut state = GameState::new();
        on_field(&mut state, Zone::Emz, 0, ids::DEMO_LINK4_001);
        into_zone(&mut state, Zone::Gy, ids::DEMO_EXTENDER_001);
        into_zone(&mut state, Zone::Gy, ids::DEMO_EQUIP_001);
        state.last_moved_to_gy.clear();

        // No link-summon token: only the equip ignition shows up.
        let actions = InfernoSovereign.enumerate(&state);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].effect_id, "equip_from_gy");

        state.push_event(EventKind::LinkSummon, ids::DEMO_LINK4_001);
        let actions = InfernoSovereign.enumerate(&state);
        assert_eq!(actions.len(), 2);
    }
}
