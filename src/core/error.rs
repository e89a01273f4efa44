//! The two-variant apply result every state transition returns.
//!
//! Enumeration and application are separate passes over the same
//! preconditions, so a transition can fail in exactly two ways:
//!
//! - the state no longer satisfies a game precondition (`Illegal`): the
//!   caller drops the branch and moves on;
//! - the action itself is malformed (`Defect`): enumeration and application
//!   have fallen out of sync, and the whole run is unsound.
//!
//! Callers must treat the variants differently: `Illegal` is routine during
//! search (an earlier sibling consumed the resource this action wanted),
//! while `Defect` is never caught below the top level.

use serde::{Deserialize, Serialize};

/// Why applying an action failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyError {
    /// Well-formed action that violates a game-state precondition: zone
    /// full, once-per-turn spent, required trigger token absent, target
    /// missing, restriction marker in force. Locally recoverable.
    Illegal(String),
    /// The action references an unregistered card, an undeclared effect id,
    /// or parameters the implementation cannot interpret. Propagates.
    Defect(String),
}

impl ApplyError {
    /// Shorthand for an `Illegal` with a formatted reason.
    #[must_use]
    pub fn illegal(reason: impl Into<String>) -> Self {
        Self::Illegal(reason.into())
    }

    /// Shorthand for a `Defect` with a formatted reason.
    #[must_use]
    pub fn defect(reason: impl Into<String>) -> Self {
        Self::Defect(reason.into())
    }

    /// True for the locally recoverable variant.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, Self::Illegal(_))
    }

    /// The human-readable reason, whichever variant.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Illegal(r) | Self::Defect(r) => r,
        }
    }
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Illegal(r) => write!(f, "illegal action: {r}"),
            Self::Defect(r) => write!(f, "model defect: {r}"),
        }
    }
}

impl std::error::Error for ApplyError {}

/// Failures while building a state from a starting-position description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// A fixed-capacity zone was given more cards than it has slots.
    ZoneOverflow { zone: &'static str, len: usize, cap: usize },
    /// A slot list addressed a slot index past the zone's capacity.
    SlotOutOfRange { zone: &'static str, index: usize, cap: usize },
    /// The same field slot was given two cards.
    SlotCollision { zone: &'static str, index: usize },
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZoneOverflow { zone, len, cap } => {
                write!(f, "{zone} holds {len} cards but has {cap} slots")
            }
            Self::SlotOutOfRange { zone, index, cap } => {
                write!(f, "{zone} slot {index} out of range (capacity {cap})")
            }
            Self::SlotCollision { zone, index } => {
                write!(f, "{zone} slot {index} assigned twice")
            }
        }
    }
}

impl std::error::Error for SetupError {}
