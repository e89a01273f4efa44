//! Normal summons and the generic special summon.
//!
//! The normal summon is gated by the shared once-per-turn flag and pays
//! tributes from the main monster zone. A tribute summon lands in the
//! first tribute's former slot; a tributeless summon names its slot
//! explicitly, one action per open slot. The generic special summon
//! places metadata-flagged hand cards and exists for vanilla bodies
//! whose summon no ability governs.

use crate::core::ApplyError;
use crate::effects::action::EffectAction;
use crate::effects::combinators::{self, params, zone_targets};
use crate::state::{phase, EventKind, GameState, Zone, MZ_SLOTS};

use super::{tributes_required, NORMAL_SUMMON, SPECIAL_SUMMON};

/// All normal-summon actions available from `state`.
///
/// One action per open MZ slot for tributeless summons; one action per
/// tribute combination otherwise. A monster whose tribute requirement
/// exceeds the bodies on field contributes no actions.
#[must_use]
pub fn enumerate_normal_summons(state: &GameState) -> Vec<EffectAction> {
    let mut out = Vec::new();
    if state.normal_summon_set_used || !phase::is_main(&state.phase) {
        return out;
    }

    let occupied: Vec<usize> = state
        .field
        .mz
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.map(|_| i))
        .collect();
    let open = state.field.open_mz_indices();

    for cid in zone_targets(state, Zone::Hand, |card| {
        card.meta.kind().is_monster() && !card.meta.from_extra()
    }) {
        let Some(h) = state.find_in(Zone::Hand, &cid) else {
            continue;
        };
        let card = state.card(h);
        let Some(level) = card.effective_level() else {
            continue;
        };

        let need = tributes_required(level);
        if need == 0 {
            for &slot in &open {
                out.push(
                    EffectAction::for_card(&cid, &card.name, NORMAL_SUMMON)
                        .with_int(params::SLOT, slot as i64)
                        .with_int_list(params::TRIBUTES, Vec::new()),
                );
            }
        } else {
            for combo in tribute_combos(&occupied, need) {
                out.push(
                    EffectAction::for_card(&cid, &card.name, NORMAL_SUMMON)
                        .with_int_list(params::TRIBUTES, combo),
                );
            }
        }
    }
    out
}

/// Ascending index combinations of `need` tributes. The tribute table
/// tops out at two, so only the two small arities exist.
fn tribute_combos(occupied: &[usize], need: usize) -> Vec<Vec<i64>> {
    match need {
        1 => occupied.iter().map(|&i| vec![i as i64]).collect(),
        2 => {
            let mut out = Vec::new();
            for (n, &i) in occupied.iter().enumerate() {
                for &j in &occupied[n + 1..] {
                    out.push(vec![i as i64, j as i64]);
                }
            }
            out
        }
        _ => Vec::new(),
    }
}

/// Apply a normal summon: pay tributes, place the body, spend the flag.
pub fn apply_normal_summon(
    state: &GameState,
    action: &EffectAction,
) -> Result<GameState, ApplyError> {
    let mut next = state.clone_step();

    if next.normal_summon_set_used {
        return Err(ApplyError::illegal("normal summon already used this turn"));
    }
    if !phase::is_main(&next.phase) {
        return Err(ApplyError::illegal(format!("not a main phase: {}", next.phase)));
    }

    let h = next
        .find_in(Zone::Hand, &action.cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {} in hand", action.cid)))?;
    let card = next.card(h);
    if !card.meta.kind().is_monster() || card.meta.from_extra() {
        return Err(ApplyError::illegal(format!(
            "{} cannot be normal summoned",
            action.cid
        )));
    }
    let level = card
        .effective_level()
        .ok_or_else(|| ApplyError::illegal(format!("{} has no level", action.cid)))?;

    let tributes = action.params.int_list(params::TRIBUTES)?;
    let need = tributes_required(level);
    if tributes.len() != need {
        return Err(ApplyError::illegal(format!(
            "level {level} needs {need} tributes, action names {}",
            tributes.len()
        )));
    }
    if !tributes.windows(2).all(|w| w[0] < w[1]) {
        return Err(ApplyError::defect(
            "tribute indices must be strictly ascending",
        ));
    }

    let mut indices = Vec::with_capacity(tributes.len());
    for &t in tributes {
        let index = usize::try_from(t)
            .map_err(|_| ApplyError::defect(format!("negative tribute index: {t}")))?;
        if index >= MZ_SLOTS {
            return Err(ApplyError::defect(format!("tribute index {index} out of range")));
        }
        if next.field.mz[index].is_none() {
            return Err(ApplyError::illegal(format!("mz slot {index} holds no tribute")));
        }
        indices.push(index);
    }

    let target = match indices.first() {
        Some(&first) => first,
        None => combinators::slot_param(action)?,
    };

    // Tributes leave in descending index order.
    for &index in indices.iter().rev() {
        next.field_to_gy(Zone::Mz, index)?;
    }
    next.remove_from(Zone::Hand, h)?;
    next.place_monster(Zone::Mz, target, h)?;
    next.normal_summon_set_used = true;
    next.push_event(EventKind::NormalSummon, action.cid.as_str());
    Ok(next)
}

/// All generic special summons available from `state`: one action per
/// flagged hand card per open MZ slot.
#[must_use]
pub fn enumerate_special_summons(state: &GameState) -> Vec<EffectAction> {
    let mut out = Vec::new();
    if !phase::is_main(&state.phase) {
        return out;
    }
    let open = state.field.open_mz_indices();
    if open.is_empty() {
        return out;
    }

    for cid in zone_targets(state, Zone::Hand, |card| {
        card.meta.kind().is_monster() && card.meta.generic_special()
    }) {
        let Some(h) = state.find_in(Zone::Hand, &cid) else {
            continue;
        };
        let card = state.card(h);
        if state.special_summon_veto(&card.meta).is_some() {
            continue;
        }
        for &slot in &open {
            out.push(
                EffectAction::for_card(&cid, &card.name, SPECIAL_SUMMON)
                    .with_int(params::SLOT, slot as i64),
            );
        }
    }
    out
}

/// Apply a generic special summon of a flagged hand card.
pub fn apply_special_summon(
    state: &GameState,
    action: &EffectAction,
) -> Result<GameState, ApplyError> {
    let mut next = state.clone_step();
    if !phase::is_main(&next.phase) {
        return Err(ApplyError::illegal(format!("not a main phase: {}", next.phase)));
    }
    let h = next
        .find_in(Zone::Hand, &action.cid)
        .ok_or_else(|| ApplyError::illegal(format!("no {} in hand", action.cid)))?;
    if !next.card(h).meta.generic_special() {
        return Err(ApplyError::illegal(format!(
            "{} has no generic summon permission",
            action.cid
        )));
    }
    let slot = combinators::slot_param(action)?;
    combinators::special_summon(&mut next, Zone::Hand, &action.cid, slot)?;
    Ok(next)
}
