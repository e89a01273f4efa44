//! Zone vocabulary and the fixed-slot field.
//!
//! Non-field zones (deck/hand/gy/banished/extra) are ordered handle vectors
//! owned by `GameState`; this module models the four fixed-capacity slot
//! arrays cards occupy while on the field, plus the `Zone` tags the rest of
//! the engine uses to talk about locations.
//!
//! Slot capacities never change for the lifetime of a state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CardHandle;

/// Main monster zone slot count.
pub const MZ_SLOTS: usize = 5;
/// Extra monster zone slot count.
pub const EMZ_SLOTS: usize = 2;
/// Spell/trap zone slot count.
pub const STZ_SLOTS: usize = 5;
/// Field zone slot count.
pub const FZ_SLOTS: usize = 1;

/// Every place a card can sit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Gy,
    Banished,
    Extra,
    /// Main monster zone.
    Mz,
    /// Extra monster zone.
    Emz,
    /// Spell/trap zone.
    Stz,
    /// Field spell zone.
    Fz,
}

impl Zone {
    /// Short text tag (action params, reasons).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Gy => "gy",
            Zone::Banished => "banished",
            Zone::Extra => "extra",
            Zone::Mz => "mz",
            Zone::Emz => "emz",
            Zone::Stz => "stz",
            Zone::Fz => "fz",
        }
    }
}

/// Flat position code for a monster slot, used in action parameters:
/// MZ slots are 0..5, EMZ slots are 5..7.
#[must_use]
pub fn field_pos_code(zone: Zone, index: usize) -> i64 {
    match zone {
        Zone::Mz => index as i64,
        Zone::Emz => (MZ_SLOTS + index) as i64,
        _ => panic!("not a monster slot: {}", zone.tag()),
    }
}

/// Invert `field_pos_code`. `None` for codes outside the monster slots.
#[must_use]
pub fn decode_field_pos(code: i64) -> Option<(Zone, usize)> {
    let code = usize::try_from(code).ok()?;
    if code < MZ_SLOTS {
        Some((Zone::Mz, code))
    } else if code < MZ_SLOTS + EMZ_SLOTS {
        Some((Zone::Emz, code - MZ_SLOTS))
    } else {
        None
    }
}

/// The fixed-slot half of a position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldZones {
    /// Main monster zone.
    pub mz: [Option<CardHandle>; MZ_SLOTS],
    /// Extra monster zone.
    pub emz: [Option<CardHandle>; EMZ_SLOTS],
    /// Spell/trap zone.
    pub stz: [Option<CardHandle>; STZ_SLOTS],
    /// Field spell zone.
    pub fz: [Option<CardHandle>; FZ_SLOTS],
}

impl FieldZones {
    /// Empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ascending indices of empty MZ slots.
    #[must_use]
    pub fn open_mz_indices(&self) -> SmallVec<[usize; MZ_SLOTS]> {
        self.mz
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect()
    }

    /// Ascending indices of empty EMZ slots.
    #[must_use]
    pub fn open_emz_indices(&self) -> SmallVec<[usize; EMZ_SLOTS]> {
        self.emz
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect()
    }

    /// Occupied monster slots in scan order: MZ ascending, then EMZ
    /// ascending. This order is relied on everywhere enumeration has to be
    /// reproducible.
    pub fn field_cards(&self) -> impl Iterator<Item = (Zone, usize, CardHandle)> + '_ {
        let mz = self
            .mz
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|h| (Zone::Mz, i, h)));
        let emz = self
            .emz
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|h| (Zone::Emz, i, h)));
        mz.chain(emz)
    }

    /// Occupied monster slot count.
    #[must_use]
    pub fn monster_count(&self) -> usize {
        self.field_cards().count()
    }

    /// Handle in a monster slot, by zone tag.
    #[must_use]
    pub fn monster_slot(&self, zone: Zone, index: usize) -> Option<CardHandle> {
        match zone {
            Zone::Mz => self.mz.get(index).copied().flatten(),
            Zone::Emz => self.emz.get(index).copied().flatten(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities() {
        let field = FieldZones::new();
        assert_eq!(field.mz.len(), 5);
        assert_eq!(field.emz.len(), 2);
        assert_eq!(field.stz.len(), 5);
        assert_eq!(field.fz.len(), 1);
    }

    #[test]
    fn test_open_indices_ascending() {
        let mut field = FieldZones::new();
        field.mz[1] = Some(CardHandle::new(0));
        field.mz[3] = Some(CardHandle::new(1));
        assert_eq!(field.open_mz_indices().as_slice(), &[0, 2, 4]);
        assert_eq!(field.open_emz_indices().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_field_cards_scan_order() {
        let mut field = FieldZones::new();
        field.emz[0] = Some(CardHandle::new(10));
        field.mz[4] = Some(CardHandle::new(11));
        field.mz[0] = Some(CardHandle::new(12));

        let scan: Vec<_> = field.field_cards().collect();
        assert_eq!(
            scan,
            vec![
                (Zone::Mz, 0, CardHandle::new(12)),
                (Zone::Mz, 4, CardHandle::new(11)),
                (Zone::Emz, 0, CardHandle::new(10)),
            ]
        );
        assert_eq!(field.monster_count(), 3);
    }

    #[test]
    fn test_pos_codes_roundtrip() {
        assert_eq!(field_pos_code(Zone::Mz, 3), 3);
        assert_eq!(field_pos_code(Zone::Emz, 1), 6);
        assert_eq!(decode_field_pos(3), Some((Zone::Mz, 3)));
        assert_eq!(decode_field_pos(6), Some((Zone::Emz, 1)));
        assert_eq!(decode_field_pos(7), None);
        assert_eq!(decode_field_pos(-1), None);
    }
}
