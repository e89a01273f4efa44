//! The per-card ability protocol.
//!
//! Cards with scripted abilities implement `CardEffect`. The two halves
//! mirror each other: `enumerate` lists every fully specified activation
//! the card offers from a position, and `apply` resolves one of those
//! actions against a position, returning the successor. `apply` must
//! tolerate any action `enumerate` could have produced from ANY position,
//! because the search replays actions against states that have moved on.

use crate::core::ApplyError;
use crate::state::GameState;

use super::action::EffectAction;
use super::activation::ActivationProfile;

/// Scripted behavior for one card, registered by cid.
pub trait CardEffect: Send + Sync {
    /// Cid this implementation is registered under.
    fn cid(&self) -> &'static str;

    /// The card's declared abilities. The registry gates every activation
    /// against these before dispatching.
    fn activations(&self) -> &'static [ActivationProfile];

    /// Every distinct activation available from this position. Actions
    /// must pin down all choices; applying one is deterministic.
    fn enumerate(&self, state: &GameState) -> Vec<EffectAction>;

    /// Resolve one activation. Never mutates `state`: implementations
    /// `clone_step` and return the successor.
    ///
    /// A condition that no longer holds is `Illegal`; a malformed action
    /// is a `Defect`.
    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError>;
}
