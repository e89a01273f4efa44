//! Stable handles into a state's card arena.
//!
//! Every card instance lives in exactly one arena (`GameState::cards`), and
//! everything else (zone sequences, field slots, equip lists, action
//! parameters) refers to it by `CardHandle`. Cloning a state clones the
//! arena and the handle containers; handles stay valid across clones, and
//! two children forked from the same parent can never alias each other's
//! instances.
//!
//! ## Usage
//!
//! ```
//! use combo_sim::core::CardHandle;
//!
//! let h = CardHandle::new(7);
//! assert_eq!(h.index(), 7);
//! assert_eq!(format!("{}", h), "Card(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Index of a card instance in a state's arena.
///
/// Handles are allocated densely in construction order and are never reused
/// or freed for the lifetime of a search: abandoned cards stay in the arena
/// until the state itself is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    /// Create a handle from an arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Arena index this handle points at.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardHandle {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_index() {
        let h = CardHandle::new(12);
        assert_eq!(h.index(), 12);
        assert_eq!(h.raw(), 12);
        assert_eq!(CardHandle::from(12u32), h);
    }

    #[test]
    fn test_ordering_follows_index() {
        let mut handles = vec![CardHandle::new(3), CardHandle::new(0), CardHandle::new(2)];
        handles.sort();
        assert_eq!(handles, vec![CardHandle::new(0), CardHandle::new(2), CardHandle::new(3)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardHandle(42)), "Card(42)");
    }

    #[test]
    fn test_serialization() {
        let h = CardHandle(123);
        let json = serde_json::to_string(&h).unwrap();
        let back: CardHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
