//! Universal summoning mechanics.
//!
//! Card abilities are exceptions; these are the defaults they are
//! exceptions to. Three core actions exist: the once-per-turn normal
//! summon (with the tribute table), the generic special summon for
//! metadata-flagged hand cards, and the extra-deck summon with its
//! per-mechanic material validation.
//!
//! Core actions reuse the [`EffectAction`] shape so the search can
//! interleave them with ability activations; they are distinguished by
//! the reserved effect ids below, which no card ability may claim.

pub mod extra;
pub mod summon;

use crate::core::ApplyError;
use crate::effects::EffectAction;
use crate::state::GameState;

pub use extra::enumerate_extra_summons;
pub use summon::{enumerate_normal_summons, enumerate_special_summons};

/// Reserved effect id for the once-per-turn normal summon.
pub const NORMAL_SUMMON: &str = "normal_summon";

/// Reserved effect id for the generic special summon of flagged hand cards.
pub const SPECIAL_SUMMON: &str = "special_summon";

/// Reserved effect id for summons out of the extra deck.
pub const EXTRA_SUMMON: &str = "extra_summon";

/// Tributes owed for normal summoning a monster of this level.
#[must_use]
pub fn tributes_required(level: i64) -> usize {
    match level {
        ..=4 => 0,
        5..=6 => 1,
        _ => 2,
    }
}

/// True when `effect_id` names a core mechanic rather than a card ability.
#[must_use]
pub fn is_core_action(effect_id: &str) -> bool {
    matches!(effect_id, NORMAL_SUMMON | SPECIAL_SUMMON | EXTRA_SUMMON)
}

/// Every core action available from `state`, in canonical order.
#[must_use]
pub fn enumerate_core_actions(state: &GameState) -> Vec<EffectAction> {
    let mut out = summon::enumerate_normal_summons(state);
    out.extend(summon::enumerate_special_summons(state));
    out.extend(extra::enumerate_extra_summons(state));
    out.sort_by_cached_key(EffectAction::canon);
    out
}

/// Apply one core action, routing on its reserved effect id.
pub fn apply_core_action(
    state: &GameState,
    action: &EffectAction,
) -> Result<GameState, ApplyError> {
    match action.effect_id.as_str() {
        NORMAL_SUMMON => summon::apply_normal_summon(state, action),
        SPECIAL_SUMMON => summon::apply_special_summon(state, action),
        EXTRA_SUMMON => extra::apply_extra_summon(state, action),
        other => Err(ApplyError::defect(format!(
            "not a core effect id: {other}"
        ))),
    }
}
