//! The position: one arena of card instances plus every zone that can hold
//! them, and the turn bookkeeping the rules read.
//!
//! All moves go through the helpers here. Each one is a remove-then-append
//! of a handle, so a card is reachable from exactly one zone sequence, field
//! slot, or equip list at any moment. Transitions never mutate their input
//! state: callers `clone_step()` first, mutate the copy, and return it.
//!
//! Cards that reach the graveyard in a transition are recorded in
//! `last_moved_to_gy`; `derive_events` later drains that list into
//! `SentToGy` trigger tokens.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::events::{EventKind, Restriction, TriggerEvent};
use super::field::{FieldZones, Zone};
use crate::cards::provider::CardData;
use crate::cards::{CardInstance, CardMeta};
use crate::core::{ApplyError, CardHandle};

/// Phase tags.
pub mod phase {
    pub const MAIN1: &str = "Main1";
    pub const MAIN2: &str = "Main2";

    /// Is this a phase in which ignition effects may be activated?
    #[must_use]
    pub fn is_main(tag: &str) -> bool {
        tag == MAIN1 || tag == MAIN2
    }
}

/// A full game position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Every card instance in this position. Append-only.
    cards: Vec<CardInstance>,

    /// Ordered zones, newest at the end. The deck's top is its last element.
    pub deck: Vec<CardHandle>,
    pub hand: Vec<CardHandle>,
    pub gy: Vec<CardHandle>,
    pub banished: Vec<CardHandle>,
    pub extra: Vec<CardHandle>,

    /// Fixed-slot field zones.
    pub field: FieldZones,

    pub turn_number: u32,
    pub phase: String,

    /// The turn's one normal summon/set has been used.
    pub normal_summon_set_used: bool,

    /// Once-per-turn markers, keyed `"{cid}:{effect_id}"`.
    pub opt_used: FxHashMap<String, u32>,

    /// Continuous-effect markers, append-only within a turn.
    pub restrictions: Vec<Restriction>,

    /// Pending trigger tokens.
    pub events: Vec<TriggerEvent>,

    /// Cids sent to the graveyard by the most recent transition. Drained
    /// into `SentToGy` tokens by `derive_events`.
    pub last_moved_to_gy: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Empty position at the start of turn 1, Main Phase 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            deck: Vec::new(),
            hand: Vec::new(),
            gy: Vec::new(),
            banished: Vec::new(),
            extra: Vec::new(),
            field: FieldZones::new(),
            turn_number: 1,
            phase: phase::MAIN1.to_string(),
            normal_summon_set_used: false,
            opt_used: FxHashMap::default(),
            restrictions: Vec::new(),
            events: Vec::new(),
            last_moved_to_gy: Vec::new(),
        }
    }

    // ---- arena ----

    /// Add a card instance to the arena. The new card is in no zone until a
    /// placement helper files its handle somewhere.
    pub fn add_card(&mut self, cid: impl Into<String>, data: CardData) -> CardHandle {
        let handle = CardHandle::new(self.cards.len());
        self.cards.push(CardInstance::new(handle, cid, data));
        handle
    }

    /// Borrow a card. Panics on a foreign handle: handles never leave the
    /// state that minted them, so this is a programming error, not input.
    #[must_use]
    pub fn card(&self, h: CardHandle) -> &CardInstance {
        &self.cards[h.index()]
    }

    /// Mutably borrow a card. Same contract as `card`.
    pub fn card_mut(&mut self, h: CardHandle) -> &mut CardInstance {
        &mut self.cards[h.index()]
    }

    /// Number of instances in the arena.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cid of a card.
    #[must_use]
    pub fn cid_of(&self, h: CardHandle) -> &str {
        &self.card(h).cid
    }

    /// Display name of a card.
    #[must_use]
    pub fn name_of(&self, h: CardHandle) -> &str {
        &self.card(h).name
    }

    // ---- lookups ----

    fn vec_zone(&self, zone: Zone) -> &Vec<CardHandle> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Gy => &self.gy,
            Zone::Banished => &self.banished,
            Zone::Extra => &self.extra,
            _ => panic!("not a sequence zone: {}", zone.tag()),
        }
    }

    fn vec_zone_mut(&mut self, zone: Zone) -> &mut Vec<CardHandle> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Gy => &mut self.gy,
            Zone::Banished => &mut self.banished,
            Zone::Extra => &mut self.extra,
            _ => panic!("not a sequence zone: {}", zone.tag()),
        }
    }

    /// First card in a sequence zone with this cid (oldest first).
    #[must_use]
    pub fn find_in(&self, zone: Zone, cid: &str) -> Option<CardHandle> {
        self.vec_zone(zone)
            .iter()
            .copied()
            .find(|&h| self.card(h).cid == cid)
    }

    /// Where does this handle currently sit? Equip lists are not zones, so
    /// an equipped card reports `None`.
    #[must_use]
    pub fn zone_of(&self, h: CardHandle) -> Option<(Zone, usize)> {
        for zone in [Zone::Deck, Zone::Hand, Zone::Gy, Zone::Banished, Zone::Extra] {
            if let Some(i) = self.vec_zone(zone).iter().position(|&x| x == h) {
                return Some((zone, i));
            }
        }
        for (zone, i, occupant) in self.field.field_cards() {
            if occupant == h {
                return Some((zone, i));
            }
        }
        if let Some(i) = self.field.stz.iter().position(|&s| s == Some(h)) {
            return Some((Zone::Stz, i));
        }
        if self.field.fz[0] == Some(h) {
            return Some((Zone::Fz, 0));
        }
        None
    }

    /// Occupied monster slots with their instances, MZ then EMZ ascending.
    pub fn field_monsters(&self) -> impl Iterator<Item = (Zone, usize, &CardInstance)> + '_ {
        self.field.field_cards().map(|(zone, i, h)| (zone, i, self.card(h)))
    }

    // ---- moves ----

    /// Remove a handle from a sequence zone.
    pub fn remove_from(&mut self, zone: Zone, h: CardHandle) -> Result<(), ApplyError> {
        let vec = self.vec_zone_mut(zone);
        match vec.iter().position(|&x| x == h) {
            Some(i) => {
                vec.remove(i);
                Ok(())
            }
            None => Err(ApplyError::illegal(format!(
                "{} is not in {}",
                h,
                zone.tag()
            ))),
        }
    }

    /// Append a handle to a sequence zone. Graveyard arrivals are recorded
    /// for trigger derivation.
    pub fn push_to(&mut self, zone: Zone, h: CardHandle) {
        if zone == Zone::Gy {
            let cid = self.card(h).cid.clone();
            self.last_moved_to_gy.push(cid);
        }
        self.vec_zone_mut(zone).push(h);
    }

    /// Put a handle into an empty monster slot.
    pub fn place_monster(
        &mut self,
        zone: Zone,
        index: usize,
        h: CardHandle,
    ) -> Result<(), ApplyError> {
        let slot = match zone {
            Zone::Mz => self.field.mz.get_mut(index),
            Zone::Emz => self.field.emz.get_mut(index),
            _ => return Err(ApplyError::defect(format!("not a monster zone: {}", zone.tag()))),
        };
        let Some(slot) = slot else {
            return Err(ApplyError::defect(format!(
                "{} index {index} out of range",
                zone.tag()
            )));
        };
        if slot.is_some() {
            return Err(ApplyError::illegal(format!(
                "{} slot {index} occupied",
                zone.tag()
            )));
        }
        *slot = Some(h);
        Ok(())
    }

    /// Put a handle into the field-spell slot, which must be empty.
    pub fn place_fz(&mut self, h: CardHandle) -> Result<(), ApplyError> {
        if self.field.fz[0].is_some() {
            return Err(ApplyError::illegal("field zone occupied"));
        }
        self.field.fz[0] = Some(h);
        Ok(())
    }

    /// Move every card equipped to `host` to the graveyard, in equip-list
    /// order. Equip lists never nest: a card in the graveyard cannot carry
    /// equips, so one level is all there is.
    pub fn release_equips_to_gy(&mut self, host: CardHandle) {
        let released = std::mem::take(&mut self.card_mut(host).equipped);
        for h in released {
            self.push_to(Zone::Gy, h);
        }
    }

    /// Send a field-slot occupant (and its equips) to the graveyard.
    pub fn field_to_gy(&mut self, zone: Zone, index: usize) -> Result<CardHandle, ApplyError> {
        let slot = match zone {
            Zone::Mz => self.field.mz.get_mut(index),
            Zone::Emz => self.field.emz.get_mut(index),
            Zone::Stz => self.field.stz.get_mut(index),
            Zone::Fz => self.field.fz.get_mut(index),
            _ => return Err(ApplyError::defect(format!("not a field zone: {}", zone.tag()))),
        };
        let Some(slot) = slot else {
            return Err(ApplyError::defect(format!(
                "{} index {index} out of range",
                zone.tag()
            )));
        };
        let Some(h) = slot.take() else {
            return Err(ApplyError::illegal(format!(
                "{} slot {index} is empty",
                zone.tag()
            )));
        };
        self.release_equips_to_gy(h);
        // Temporary modifiers do not survive leaving the field.
        self.card_mut(h).state.clear();
        self.push_to(Zone::Gy, h);
        Ok(h)
    }

    /// Move a card between two sequence zones.
    pub fn move_between(
        &mut self,
        from: Zone,
        to: Zone,
        h: CardHandle,
    ) -> Result<(), ApplyError> {
        self.remove_from(from, h)?;
        self.push_to(to, h);
        Ok(())
    }

    /// Draw from the top of the deck (the end of the vector).
    pub fn draw(&mut self, count: usize) -> Result<(), ApplyError> {
        if self.deck.len() < count {
            return Err(ApplyError::illegal(format!(
                "deck has {} cards, cannot draw {count}",
                self.deck.len()
            )));
        }
        for _ in 0..count {
            if let Some(h) = self.deck.pop() {
                self.hand.push(h);
            }
        }
        Ok(())
    }

    /// Attach a card to a host's equip list. The card must already have
    /// been removed from wherever it was; no removal happens here.
    pub fn equip_card(&mut self, card: CardHandle, target: CardHandle) {
        self.card_mut(target).equipped.push(card);
    }

    // ---- transitions & bookkeeping ----

    /// Clone for a new transition: the copy starts with an empty
    /// most-recent-graveyard list.
    #[must_use]
    pub fn clone_step(&self) -> Self {
        let mut next = self.clone();
        next.last_moved_to_gy.clear();
        next
    }

    /// Drain the most-recent-graveyard list into `SentToGy` tokens. Called
    /// once per child by the search, and once on the seed state.
    pub fn derive_events(&mut self) {
        for cid in std::mem::take(&mut self.last_moved_to_gy) {
            self.events.push(TriggerEvent::new(EventKind::SentToGy, cid));
        }
    }

    /// Append a trigger token.
    pub fn push_event(&mut self, kind: EventKind, cid: impl Into<String>) {
        self.events.push(TriggerEvent::new(kind, cid));
    }

    /// Is a matching token pending?
    #[must_use]
    pub fn has_event(&self, kind: EventKind, cid: &str) -> bool {
        self.events.iter().any(|e| e.matches(kind, cid))
    }

    /// Remove the first matching token. Fails when the window has passed.
    pub fn consume_event(&mut self, kind: EventKind, cid: &str) -> Result<(), ApplyError> {
        match self.events.iter().position(|e| e.matches(kind, cid)) {
            Some(i) => {
                self.events.remove(i);
                Ok(())
            }
            None => Err(ApplyError::illegal(format!(
                "no pending {} event for {cid}",
                kind.tag()
            ))),
        }
    }

    /// Once-per-turn key for a card ability.
    #[must_use]
    pub fn opt_key(cid: &str, effect_id: &str) -> String {
        format!("{cid}:{effect_id}")
    }

    /// Has this ability been used this turn?
    #[must_use]
    pub fn opt_spent(&self, cid: &str, effect_id: &str) -> bool {
        self.opt_used
            .get(&Self::opt_key(cid, effect_id))
            .is_some_and(|&n| n > 0)
    }

    /// Mark this ability used.
    pub fn spend_opt(&mut self, cid: &str, effect_id: &str) {
        *self.opt_used.entry(Self::opt_key(cid, effect_id)).or_insert(0) += 1;
    }

    /// First restriction that vetoes special-summoning these stats.
    #[must_use]
    pub fn special_summon_veto(&self, meta: &CardMeta) -> Option<String> {
        self.restrictions
            .iter()
            .find(|r| !r.permits_special(meta))
            .map(Restriction::canon)
    }

    /// First restriction that vetoes the extra-deck mechanic.
    #[must_use]
    pub fn extra_summon_veto(&self) -> Option<String> {
        self.restrictions
            .iter()
            .find(|r| !r.permits_extra_summon())
            .map(Restriction::canon)
    }

    /// Add a restriction marker.
    pub fn add_restriction(&mut self, restriction: Restriction) {
        self.restrictions.push(restriction);
    }

    /// End-of-turn reset: clears the turn flags, markers, tokens, and
    /// once-per-turn spends, and bumps the turn counter.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.phase = phase::MAIN1.to_string();
        self.normal_summon_set_used = false;
        self.opt_used.clear();
        self.restrictions.clear();
        self.events.clear();
        self.last_moved_to_gy.clear();
    }
}
