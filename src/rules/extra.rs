//! Extra-deck summons: material validation and canonical placement.
//!
//! Materials are named by field position code, so one action pins down
//! exactly which bodies leave. Validation is per mechanic: Link targets
//! need the rating reachable as a subset sum (a Link material may count
//! as one or as its own rating), Xyz targets need every material's level
//! to equal the rank, and any declared material attribute or race binds
//! all materials. Placement is canonical: the first open slot of the
//! mechanic's landing zone, so the choice space stays material-shaped.

use std::collections::BTreeSet;

use crate::cards::{CardInstance, CardKind, CardMeta};
use crate::core::{ApplyError, CardHandle};
use crate::effects::action::EffectAction;
use crate::effects::combinators::params;
use crate::state::{decode_field_pos, field_pos_code, phase, EventKind, GameState, Zone};

use super::EXTRA_SUMMON;

/// Where a freshly summoned body of this kind lands.
fn landing_zone(kind: CardKind) -> Zone {
    match kind {
        CardKind::Link | CardKind::Pendulum => Zone::Emz,
        _ => Zone::Mz,
    }
}

/// The trigger token an extra-deck mechanic leaves behind.
fn summon_event(kind: CardKind) -> EventKind {
    match kind {
        CardKind::Link => EventKind::LinkSummon,
        CardKind::Xyz => EventKind::XyzSummon,
        CardKind::Synchro => EventKind::SynchroSummon,
        CardKind::Fusion => EventKind::FusionSummon,
        _ => EventKind::SpecialSummon,
    }
}

/// All extra-deck summons available from `state`: one action per target
/// per legal material set.
#[must_use]
pub fn enumerate_extra_summons(state: &GameState) -> Vec<EffectAction> {
    let mut out = Vec::new();
    if !phase::is_main(&state.phase) || state.extra_summon_veto().is_some() {
        return out;
    }

    let field: Vec<(Zone, usize, &CardInstance)> = state.field_monsters().collect();
    if field.is_empty() {
        return out;
    }

    let cids: BTreeSet<&str> = state
        .extra
        .iter()
        .map(|&h| state.card(h).cid.as_str())
        .collect();

    for cid in cids {
        let Some(h) = state.find_in(Zone::Extra, cid) else {
            continue;
        };
        let card = state.card(h);
        if !card.meta.from_extra() || state.special_summon_veto(&card.meta).is_some() {
            continue;
        }
        let target_zone = landing_zone(card.meta.kind());

        // Field never holds more than MZ + EMZ bodies, so a bitmask walk
        // over subsets stays small.
        for mask in 1u32..(1 << field.len()) {
            let mats: Vec<(Zone, usize, &CardInstance)> = field
                .iter()
                .enumerate()
                .filter(|(n, _)| mask & (1 << n) != 0)
                .map(|(_, &entry)| entry)
                .collect();
            if !materials_legal(&card.meta, &mats) {
                continue;
            }
            if !slot_opens(state, target_zone, &mats) {
                continue;
            }
            let codes: Vec<i64> = mats
                .iter()
                .map(|&(zone, index, _)| field_pos_code(zone, index))
                .collect();
            out.push(
                EffectAction::for_card(cid, &card.name, EXTRA_SUMMON)
                    .with_int_list(params::MATERIALS, codes),
            );
        }
    }
    out
}

/// Will the landing zone have an open slot once these materials leave?
fn slot_opens(state: &GameState, zone: Zone, mats: &[(Zone, usize, &CardInstance)]) -> bool {
    let vacating = mats.iter().filter(|&&(z, _, _)| z == zone).count();
    let open = match zone {
        Zone::Emz => state.field.open_emz_indices().len(),
        _ => state.field.open_mz_indices().len(),
    };
    open + vacating > 0
}

/// Does this material set satisfy the target's declared requirements?
fn materials_legal(target: &CardMeta, mats: &[(Zone, usize, &CardInstance)]) -> bool {
    let count = mats.len() as i64;
    if count < target.materials_min().unwrap_or(1) {
        return false;
    }
    if let Some(max) = target.materials_max() {
        if count > max {
            return false;
        }
    }
    if let Some(attr) = target.material_attribute() {
        if !mats.iter().all(|&(_, _, m)| m.meta.attribute() == Some(attr)) {
            return false;
        }
    }
    if let Some(race) = target.material_race() {
        if !mats.iter().all(|&(_, _, m)| m.meta.race() == Some(race)) {
            return false;
        }
    }
    match target.kind() {
        CardKind::Link => target
            .link_rating()
            .is_some_and(|rating| link_value_reachable(rating, mats)),
        CardKind::Xyz => target
            .rank()
            .is_some_and(|rank| mats.iter().all(|&(_, _, m)| m.effective_level() == Some(rank))),
        _ => true,
    }
}

/// Can the materials' link values sum to exactly `rating`? A non-Link
/// material contributes one; a Link material contributes one or its own
/// rating, which is what lets a Link body climb into a bigger one.
fn link_value_reachable(rating: i64, mats: &[(Zone, usize, &CardInstance)]) -> bool {
    fn reachable(remaining: i64, owns: &[i64]) -> bool {
        let Some((&own, rest)) = owns.split_first() else {
            return remaining == 0;
        };
        if remaining <= 0 {
            return false;
        }
        reachable(remaining - 1, rest) || (own > 1 && reachable(remaining - own, rest))
    }

    let owns: Vec<i64> = mats
        .iter()
        .map(|&(_, _, m)| {
            if m.meta.kind() == CardKind::Link {
                m.meta.link_rating().unwrap_or(1)
            } else {
                1
            }
        })
        .collect();
    reachable(rating, &owns)
}

/// Apply an extra-deck summon: send materials to the GY, place the body
/// in the first open slot of its landing zone, mark it properly summoned.
pub fn apply_extra_summon(
    state: &GameState,
    action: &EffectAction,
) -> Result<GameState, ApplyError> {
    let mut next = state.clone_step();

    if !phase::is_main(&next.phase) {
        return Err(ApplyError::illegal(format!("not a main phase: {}", next.phase)));
    }
    if let Some(reason) = next.extra_summon_veto() {
        return Err(ApplyError::illegal(reason));
    }
    let h = next
        .find_in(Zone::Extra, &action.cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {} in the extra deck", action.cid)))?;
    let meta = next.card(h).meta.clone();
    if !meta.from_extra() {
        return Err(ApplyError::illegal(format!(
            "{} is not an extra-deck card",
            action.cid
        )));
    }
    if let Some(reason) = next.special_summon_veto(&meta) {
        return Err(ApplyError::illegal(format!(
            "summon of {} blocked: {reason}",
            action.cid
        )));
    }

    let codes = action.params.int_list(params::MATERIALS)?;
    if !codes.windows(2).all(|w| w[0] < w[1]) {
        return Err(ApplyError::defect(
            "material codes must be strictly ascending",
        ));
    }
    let mut mats: Vec<(Zone, usize, CardHandle)> = Vec::with_capacity(codes.len());
    for &code in codes {
        let Some((zone, index)) = decode_field_pos(code) else {
            return Err(ApplyError::defect(format!("bad field position code: {code}")));
        };
        if !matches!(zone, Zone::Mz | Zone::Emz) {
            return Err(ApplyError::defect(format!(
                "{} is not a monster zone",
                zone.tag()
            )));
        }
        let Some(mh) = next.field.monster_slot(zone, index) else {
            return Err(ApplyError::illegal(format!(
                "{} slot {index} holds no material",
                zone.tag()
            )));
        };
        mats.push((zone, index, mh));
    }

    // Re-validate against the live instances before anything moves.
    {
        let live: Vec<(Zone, usize, &CardInstance)> = mats
            .iter()
            .map(|&(zone, index, mh)| (zone, index, next.card(mh)))
            .collect();
        if !materials_legal(&meta, &live) {
            return Err(ApplyError::illegal(format!(
                "materials do not satisfy {}",
                action.cid
            )));
        }
    }

    for &(zone, index, _) in &mats {
        next.field_to_gy(zone, index)?;
    }

    let target_zone = landing_zone(meta.kind());
    let slot = match target_zone {
        Zone::Emz => next.field.open_emz_indices().first().copied(),
        _ => next.field.open_mz_indices().first().copied(),
    };
    let Some(slot) = slot else {
        return Err(ApplyError::illegal(format!(
            "no open {} slot",
            target_zone.tag()
        )));
    };

    next.remove_from(Zone::Extra, h)?;
    next.place_monster(target_zone, slot, h)?;
    next.card_mut(h).properly_summoned = true;
    next.push_event(summon_event(meta.kind()), action.cid.as_str());
    Ok(next)
}
