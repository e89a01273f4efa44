//! Canonical position hashing for search deduplication.
//!
//! The hash covers card content by zone, never arena handles, so two
//! positions that differ only in instance allocation order collide on
//! purpose. Unordered collections (once-per-turn spends, restrictions,
//! pending trigger tokens) are folded in sorted order.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::field::{field_pos_code, Zone};
use super::game::GameState;
use crate::core::CardHandle;

/// SplitMix64 step for stable, fast mixing.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn mix(acc: u64, token: u64) -> u64 {
    splitmix64(acc ^ token)
}

#[inline]
fn str_token(s: &str) -> u64 {
    let mut h = FxHasher::default();
    s.hash(&mut h);
    h.finish()
}

// Domain tags (arbitrary but fixed)
const DOM_CARD: u64 = 0x5EED_CA2D_0000_0001;
const DOM_PROPER: u64 = 0x5EED_CA2D_0000_0002;
const DOM_EQUIP: u64 = 0x5EED_CA2D_0000_0003;
const DOM_SEQ: u64 = 0x5EED_CA2D_0000_0010;
const DOM_SLOT: u64 = 0x5EED_CA2D_0000_0020;
const DOM_STZ: u64 = 0x5EED_CA2D_0000_0021;
const DOM_FZ: u64 = 0x5EED_CA2D_0000_0022;
const DOM_TURN: u64 = 0x5EED_CA2D_0000_0030;
const DOM_OPT: u64 = 0x5EED_CA2D_0000_0040;
const DOM_RESTRICT: u64 = 0x5EED_CA2D_0000_0041;
const DOM_EVENT: u64 = 0x5EED_CA2D_0000_0042;

/// Content token for one card instance: cid, mutable state, proper-summon
/// flag, and the content of anything equipped to it. Equip lists are one
/// level deep, so the recursion is bounded.
fn card_token(state: &GameState, h: CardHandle) -> u64 {
    let card = state.card(h);
    let mut acc = DOM_CARD ^ str_token(&card.cid);
    if card.properly_summoned {
        acc = mix(acc, DOM_PROPER);
    }
    let mut entries: Vec<(&String, &i64)> = card.state.iter().collect();
    entries.sort();
    for (key, value) in entries {
        acc = mix(acc, str_token(key) ^ (*value as u64));
    }
    for &attached in &card.equipped {
        acc = mix(acc, DOM_EQUIP ^ card_token(state, attached));
    }
    acc
}

/// Canonical hash of a full position.
#[must_use]
pub fn state_hash(state: &GameState) -> u64 {
    let mut acc = 0u64;

    // Ordered sequences, oldest first. Deck order is live information:
    // draws come off the end.
    for zone in [Zone::Deck, Zone::Hand, Zone::Gy, Zone::Banished, Zone::Extra] {
        acc = mix(acc, DOM_SEQ ^ str_token(zone.tag()));
        let handles = match zone {
            Zone::Deck => &state.deck,
            Zone::Hand => &state.hand,
            Zone::Gy => &state.gy,
            Zone::Banished => &state.banished,
            Zone::Extra => &state.extra,
            _ => unreachable!(),
        };
        for &h in handles {
            acc = mix(acc, card_token(state, h));
        }
    }

    // Field slots are positional.
    for (zone, index, h) in state.field.field_cards() {
        let pos = field_pos_code(zone, index) as u64;
        acc = mix(acc, DOM_SLOT ^ (pos << 8) ^ card_token(state, h));
    }
    for (index, slot) in state.field.stz.iter().enumerate() {
        if let Some(h) = slot {
            acc = mix(acc, DOM_STZ ^ ((index as u64) << 8) ^ card_token(state, *h));
        }
    }
    if let Some(h) = state.field.fz[0] {
        acc = mix(acc, DOM_FZ ^ card_token(state, h));
    }

    // Turn bookkeeping.
    acc = mix(
        acc,
        DOM_TURN
            ^ u64::from(state.turn_number)
            ^ (u64::from(state.normal_summon_set_used) << 32)
            ^ str_token(&state.phase).rotate_left(16),
    );

    // Unordered bookkeeping, sorted for canonical form.
    let mut opts: Vec<(&String, &u32)> = state.opt_used.iter().collect();
    opts.sort();
    for (key, count) in opts {
        acc = mix(acc, DOM_OPT ^ str_token(key) ^ u64::from(*count));
    }

    let mut restrictions: Vec<String> = state.restrictions.iter().map(|r| r.canon()).collect();
    restrictions.sort();
    for r in &restrictions {
        acc = mix(acc, DOM_RESTRICT ^ str_token(r));
    }

    let mut events: Vec<String> = state
        .events
        .iter()
        .map(|e| format!("{}:{}", e.kind.tag(), e.cid))
        .collect();
    events.sort();
    for e in &events {
        acc = mix(acc, DOM_EVENT ^ str_token(e));
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::{demo_pool, ids};
    use crate::cards::MetaProvider;
    use crate::state::events::{EventKind, Restriction};

    fn two_card_state() -> GameState {
        let pool = demo_pool();
        let mut state = GameState::new();
        let a = state.add_card(ids::DEMO_EXTENDER_001, pool.resolve(ids::DEMO_EXTENDER_001, None));
        let b = state.add_card(ids::DEMO_TUTOR_001, pool.resolve(ids::DEMO_TUTOR_001, None));
        state.push_to(Zone::Hand, a);
        state.push_to(Zone::Hand, b);
        state
    }

    #[test]
    fn test_hash_ignores_allocation_order() {
        let pool = demo_pool();

        let mut flipped = GameState::new();
        let b = flipped.add_card(ids::DEMO_TUTOR_001, pool.resolve(ids::DEMO_TUTOR_001, None));
        let a = flipped.add_card(ids::DEMO_EXTENDER_001, pool.resolve(ids::DEMO_EXTENDER_001, None));
        flipped.push_to(Zone::Hand, a);
        flipped.push_to(Zone::Hand, b);

        assert_eq!(state_hash(&two_card_state()), state_hash(&flipped));
    }

    #[test]
    fn test_hash_sees_zone_and_slot() {
        let mut state = two_card_state();
        let base = state_hash(&state);

        let h = state.hand[0];
        state.remove_from(Zone::Hand, h).unwrap();
        state.place_monster(Zone::Mz, 0, h).unwrap();
        let on_field = state_hash(&state);
        assert_ne!(base, on_field);

        state.field.mz[0] = None;
        state.place_monster(Zone::Mz, 3, h).unwrap();
        assert_ne!(on_field, state_hash(&state));
    }

    #[test]
    fn test_hash_sees_bookkeeping() {
        let mut state = two_card_state();
        let base = state_hash(&state);

        state.spend_opt(ids::DEMO_EXTENDER_001, "special_summon_self");
        let with_opt = state_hash(&state);
        assert_ne!(base, with_opt);

        state.add_restriction(Restriction::NoExtraDeckSummon);
        let with_restriction = state_hash(&state);
        assert_ne!(with_opt, with_restriction);

        state.push_event(EventKind::NormalSummon, ids::DEMO_EXTENDER_001);
        assert_ne!(with_restriction, state_hash(&state));
    }

    #[test]
    fn test_hash_sees_equips_and_state() {
        let pool = demo_pool();
        let mut state = GameState::new();
        let host = state.add_card(ids::DEMO_EXTENDER_001, pool.resolve(ids::DEMO_EXTENDER_001, None));
        state.place_monster(Zone::Mz, 0, host).unwrap();
        let base = state_hash(&state);

        let blade = state.add_card(ids::DEMO_EQUIP_001, pool.resolve(ids::DEMO_EQUIP_001, None));
        state.equip_card(blade, host);
        let equipped = state_hash(&state);
        assert_ne!(base, equipped);

        state.card_mut(host).modify_state(crate::cards::instance::LEVEL_MOD, 1);
        assert_ne!(equipped, state_hash(&state));
    }
}
