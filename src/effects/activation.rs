//! Static activation metadata for card abilities.
//!
//! Every ability declares where its card must sit and when it may fire.
//! The registry enforces these gates centrally before dispatching to the
//! ability's own logic, so individual implementations can assume them.

use crate::state::{EventKind, GameState, Zone};

/// Zone the acting card must occupy when the ability resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationZone {
    Hand,
    /// Any main or extra monster zone slot.
    MonsterField,
    Graveyard,
    SpellTrap,
    FieldZone,
}

impl ActivationZone {
    /// Is a card with this cid currently in the zone?
    #[must_use]
    pub fn contains(self, state: &GameState, cid: &str) -> bool {
        match self {
            Self::Hand => state.find_in(Zone::Hand, cid).is_some(),
            Self::Graveyard => state.find_in(Zone::Gy, cid).is_some(),
            Self::MonsterField => state.field_monsters().any(|(_, _, c)| c.cid == cid),
            Self::SpellTrap => state
                .field
                .stz
                .iter()
                .flatten()
                .any(|&h| state.cid_of(h) == cid),
            Self::FieldZone => state.field.fz[0].is_some_and(|h| state.cid_of(h) == cid),
        }
    }
}

/// When the ability may fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationTiming {
    /// Player-initiated, main phase only.
    Ignition,
    /// Fires off a pending trigger token, which it consumes.
    Trigger,
}

/// One declared ability of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationProfile {
    pub effect_id: &'static str,
    pub zone: ActivationZone,
    pub timing: ActivationTiming,
    /// For triggers: the event kind the ability consumes, always keyed to
    /// the acting card's own cid.
    pub consumes: Option<EventKind>,
    /// Hard once-per-turn, per card name. On by default; equips opt out.
    pub once_per_turn: bool,
}

impl ActivationProfile {
    /// An ignition ability.
    #[must_use]
    pub const fn ignition(effect_id: &'static str, zone: ActivationZone) -> Self {
        Self {
            effect_id,
            zone,
            timing: ActivationTiming::Ignition,
            consumes: None,
            once_per_turn: true,
        }
    }

    /// A trigger ability consuming one token of the given kind.
    #[must_use]
    pub const fn trigger(effect_id: &'static str, zone: ActivationZone, consumes: EventKind) -> Self {
        Self {
            effect_id,
            zone,
            timing: ActivationTiming::Trigger,
            consumes: Some(consumes),
            once_per_turn: true,
        }
    }

    /// Lift the once-per-turn cap.
    #[must_use]
    pub const fn repeatable(mut self) -> Self {
        self.once_per_turn = false;
        self
    }
}
