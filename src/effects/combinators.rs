//! Shared building blocks for card ability implementations.
//!
//! Every ability is a composition of the same few moves: check an
//! activation gate, pick targets by predicate, summon, send, retrieve,
//! equip. Implementations call these so the rules for restrictions,
//! trigger tokens, and graveyard recording live in exactly one place.

use std::collections::BTreeSet;

use crate::cards::CardInstance;
use crate::core::{ApplyError, CardHandle};
use crate::state::{decode_field_pos, phase, EventKind, GameState, Zone};

use super::action::EffectAction;
use super::activation::{ActivationProfile, ActivationTiming};

/// Parameter keys shared across abilities.
pub mod params {
    /// Open MZ index for a summon.
    pub const SLOT: &str = "slot";
    /// Cid of the card an ability fetches, summons, or discards.
    pub const TARGET: &str = "target";
    /// Field position code of the monster an equip attaches to.
    pub const TARGET_POS: &str = "target_pos";
    /// MZ indices of tributed monsters.
    pub const TRIBUTES: &str = "tributes";
    /// Field position codes of extra-deck summon materials.
    pub const MATERIALS: &str = "materials";
}

/// Can this ability fire right now? Checks the zone, the timing gate, and
/// the once-per-turn marker; ability-specific conditions come on top.
#[must_use]
pub fn can_activate(state: &GameState, profile: &ActivationProfile, cid: &str) -> bool {
    if !profile.zone.contains(state, cid) {
        return false;
    }
    let timing_open = match profile.timing {
        ActivationTiming::Ignition => phase::is_main(&state.phase),
        ActivationTiming::Trigger => profile
            .consumes
            .is_some_and(|kind| state.has_event(kind, cid)),
    };
    if !timing_open {
        return false;
    }
    !(profile.once_per_turn && state.opt_spent(cid, profile.effect_id))
}

/// Distinct cids in a sequence zone whose instances satisfy the predicate,
/// ascending. Two copies of one card are the same choice.
#[must_use]
pub fn zone_targets(
    state: &GameState,
    zone: Zone,
    pred: impl Fn(&CardInstance) -> bool,
) -> Vec<String> {
    let handles = match zone {
        Zone::Deck => &state.deck,
        Zone::Hand => &state.hand,
        Zone::Gy => &state.gy,
        Zone::Banished => &state.banished,
        Zone::Extra => &state.extra,
        _ => return Vec::new(),
    };
    let cids: BTreeSet<String> = handles
        .iter()
        .map(|&h| state.card(h))
        .filter(|c| pred(c))
        .map(|c| c.cid.clone())
        .collect();
    cids.into_iter().collect()
}

/// One summon action per open MZ slot, for abilities where the card
/// summons itself and the slot is the only choice.
#[must_use]
pub fn self_summon_actions(
    state: &GameState,
    cid: &str,
    name: &str,
    effect_id: &str,
) -> Vec<EffectAction> {
    state
        .field
        .open_mz_indices()
        .into_iter()
        .map(|slot| EffectAction::for_card(cid, name, effect_id).with_int(params::SLOT, slot as i64))
        .collect()
}

/// Special summon a card out of a sequence zone into an MZ slot.
///
/// Enforces the active restrictions and, for graveyard and banished
/// revivals, the proper-summon rule: an extra-deck body that never hit
/// the field through its own mechanic cannot come back.
pub fn special_summon(
    state: &mut GameState,
    from: Zone,
    cid: &str,
    slot: usize,
) -> Result<CardHandle, ApplyError> {
    let h = state
        .find_in(from, cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {cid} in {}", from.tag())))?;

    if let Some(reason) = state.special_summon_veto(&state.card(h).meta) {
        return Err(ApplyError::illegal(format!(
            "special summon of {cid} blocked: {reason}"
        )));
    }
    if matches!(from, Zone::Gy | Zone::Banished) {
        let card = state.card(h);
        if card.meta.from_extra() && !card.properly_summoned {
            return Err(ApplyError::illegal(format!(
                "{cid} was never properly summoned"
            )));
        }
    }

    state.remove_from(from, h)?;
    state.place_monster(Zone::Mz, slot, h)?;
    state.push_event(EventKind::SpecialSummon, cid);
    Ok(h)
}

/// Special summon into the first open MZ slot, for abilities where the
/// target is the choice and placement is canonical.
pub fn special_summon_first_open(
    state: &mut GameState,
    from: Zone,
    cid: &str,
) -> Result<CardHandle, ApplyError> {
    let slot = state
        .field
        .open_mz_indices()
        .into_iter()
        .next()
        .ok_or_else(|| ApplyError::illegal("no open MZ slot"))?;
    special_summon(state, from, cid, slot)
}

/// Move the first copy of a cid from a sequence zone to the graveyard.
pub fn send_to_gy(state: &mut GameState, from: Zone, cid: &str) -> Result<CardHandle, ApplyError> {
    let h = state
        .find_in(from, cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {cid} in {}", from.tag())))?;
    state.move_between(from, Zone::Gy, h)?;
    Ok(h)
}

/// Move the first copy of a cid from a sequence zone to the hand.
pub fn add_to_hand(state: &mut GameState, from: Zone, cid: &str) -> Result<CardHandle, ApplyError> {
    let h = state
        .find_in(from, cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {cid} in {}", from.tag())))?;
    state.move_between(from, Zone::Hand, h)?;
    Ok(h)
}

/// Banish the first copy of a cid from the graveyard.
pub fn banish_from_gy(state: &mut GameState, cid: &str) -> Result<CardHandle, ApplyError> {
    let h = state
        .find_in(Zone::Gy, cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {cid} in gy")))?;
    state.move_between(Zone::Gy, Zone::Banished, h)?;
    Ok(h)
}

/// Attach the first copy of an equip cid from a sequence zone to the
/// monster at a field position code.
pub fn equip_to(
    state: &mut GameState,
    from: Zone,
    equip_cid: &str,
    target_pos: i64,
) -> Result<(), ApplyError> {
    let Some((zone, index)) = decode_field_pos(target_pos) else {
        return Err(ApplyError::defect(format!(
            "bad field position code: {target_pos}"
        )));
    };
    let Some(host) = state.field.monster_slot(zone, index) else {
        return Err(ApplyError::illegal(format!(
            "no monster at {} {index}",
            zone.tag()
        )));
    };
    let h = state
        .find_in(from, equip_cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {equip_cid} in {}", from.tag())))?;
    state.remove_from(from, h)?;
    state.equip_card(h, host);
    Ok(())
}

/// Field position codes of every occupied monster slot, MZ then EMZ.
#[must_use]
pub fn monster_positions(state: &GameState) -> Vec<i64> {
    state
        .field
        .field_cards()
        .map(|(zone, index, _)| crate::state::field_pos_code(zone, index))
        .collect()
}

/// Field position code of the first on-field copy of a cid.
#[must_use]
pub fn own_field_position(state: &GameState, cid: &str) -> Option<i64> {
    state
        .field_monsters()
        .find(|(_, _, card)| card.cid == cid)
        .map(|(zone, index, _)| crate::state::field_pos_code(zone, index))
}

/// Does the field hold a monster satisfying the predicate?
#[must_use]
pub fn controls_monster_where(
    state: &GameState,
    pred: impl Fn(&CardInstance) -> bool,
) -> bool {
    state.field_monsters().any(|(_, _, card)| pred(card))
}

/// Copies of a cid in a sequence zone.
#[must_use]
pub fn copies_in(state: &GameState, zone: Zone, cid: &str) -> usize {
    let handles = match zone {
        Zone::Deck => &state.deck,
        Zone::Hand => &state.hand,
        Zone::Gy => &state.gy,
        Zone::Banished => &state.banished,
        Zone::Extra => &state.extra,
        _ => return 0,
    };
    handles.iter().filter(|&&h| state.cid_of(h) == cid).count()
}

/// Read and range-check the MZ slot parameter of a summon action.
pub fn slot_param(action: &EffectAction) -> Result<usize, ApplyError> {
    let raw = action.params.int(params::SLOT)?;
    usize::try_from(raw).map_err(|_| ApplyError::defect(format!("bad slot: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::{demo_pool, ids};
    use crate::cards::MetaProvider;
    use crate::effects::activation::ActivationZone;
    use crate::state::Restriction;

    fn seeded(zone: Zone, cids: &[&str]) -> GameState {
        let pool = demo_pool();
        let mut state = GameState::new();
        for cid in cids {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(zone, h);
        }
        state
    }

    #[test]
    fn test_can_activate_gates() {
        let profile =
            ActivationProfile::ignition("special_summon_self", ActivationZone::Hand);
        let mut state = seeded(Zone::Hand, &[ids::DEMO_EXTENDER_001]);

        assert!(can_activate(&state, &profile, ids::DEMO_EXTENDER_001));
        assert!(!can_activate(&state, &profile, ids::DEMO_EXTENDER_002));

        state.spend_opt(ids::DEMO_EXTENDER_001, "special_summon_self");
        assert!(!can_activate(&state, &profile, ids::DEMO_EXTENDER_001));

        let mut battle = seeded(Zone::Hand, &[ids::DEMO_EXTENDER_001]);
        battle.phase = "Battle".to_string();
        assert!(!can_activate(&battle, &profile, ids::DEMO_EXTENDER_001));
    }

    #[test]
    fn test_trigger_needs_token() {
        let profile = ActivationProfile::trigger(
            "recruit_from_deck",
            ActivationZone::Graveyard,
            EventKind::SentToGy,
        );
        let mut state = seeded(Zone::Gy, &[ids::DEMO_RECRUITER_001]);
        assert!(!can_activate(&state, &profile, ids::DEMO_RECRUITER_001));

        state.push_event(EventKind::SentToGy, ids::DEMO_RECRUITER_001);
        assert!(can_activate(&state, &profile, ids::DEMO_RECRUITER_001));
    }

    #[test]
    fn test_zone_targets_distinct_sorted() {
        let state = seeded(
            Zone::Deck,
            &[
                ids::DEMO_SEARCHER_001,
                ids::DEMO_EXTENDER_001,
                ids::DEMO_EXTENDER_001,
                ids::DEMO_GOLEM_001,
            ],
        );
        let fire_small = zone_targets(&state, Zone::Deck, |c| {
            c.meta.attribute() == Some("FIRE") && c.effective_level().is_some_and(|l| l <= 4)
        });
        assert_eq!(
            fire_small,
            vec![ids::DEMO_EXTENDER_001.to_string(), ids::DEMO_SEARCHER_001.to_string()]
        );
    }

    #[test]
    fn test_special_summon_respects_restrictions() {
        let mut state = seeded(Zone::Hand, &[ids::DEMO_EXTENDER_001]);
        state.add_restriction(Restriction::SpecialSummonAttributeOnly("WATER".into()));
        let err = special_summon(&mut state, Zone::Hand, ids::DEMO_EXTENDER_001, 0).unwrap_err();
        assert!(err.is_illegal());
    }

    #[test]
    fn test_revival_requires_proper_summon() {
        let mut state = seeded(Zone::Gy, &[ids::DEMO_LINK2_001]);
        let err =
            special_summon_first_open(&mut state, Zone::Gy, ids::DEMO_LINK2_001).unwrap_err();
        assert!(err.is_illegal());

        let h = state.gy[0];
        state.card_mut(h).properly_summoned = true;
        let placed = special_summon_first_open(&mut state, Zone::Gy, ids::DEMO_LINK2_001).unwrap();
        assert_eq!(state.zone_of(placed), Some((Zone::Mz, 0)));
        assert!(state.has_event(EventKind::SpecialSummon, ids::DEMO_LINK2_001));
    }

    #[test]
    fn test_equip_to_field_position() {
        let pool = demo_pool();
        let mut state = GameState::new();
        let host = state.add_card(ids::DEMO_EXTENDER_001, pool.resolve(ids::DEMO_EXTENDER_001, None));
        let blade = state.add_card(ids::DEMO_EQUIP_001, pool.resolve(ids::DEMO_EQUIP_001, None));
        state.place_monster(Zone::Mz, 1, host).unwrap();
        state.push_to(Zone::Hand, blade);

        equip_to(&mut state, Zone::Hand, ids::DEMO_EQUIP_001, 1).unwrap();
        assert_eq!(state.card(host).equipped, vec![blade]);
        assert!(state.hand.is_empty());

        let bad = equip_to(&mut state, Zone::Hand, ids::DEMO_EQUIP_001, 99).unwrap_err();
        assert!(!bad.is_illegal());
    }
}
