//! # combo-sim
//!
//! A single-turn combo simulator for a Yu-Gi-Oh-style card game, with a
//! deterministic beam search that finds strong opening lines.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same position, same configuration, same line.
//!    Every enumeration is canonically ordered and every tie-break is
//!    total, so a search result is reproducible bit for bit.
//!
//! 2. **Immutable Transitions**: Applying an action never mutates its
//!    input. Rules clone the position, mutate the copy, and return it,
//!    which is what lets the search hold thousands of positions at once.
//!
//! 3. **Data-Driven Cards**: The engine hardcodes no card stat. Metadata
//!    comes from a `MetaProvider`; behavior is scripted against the
//!    `CardEffect` protocol and registered by cid.
//!
//! ## Architecture
//!
//! - **Handle Arena**: Positions own an append-only arena of card
//!   instances; zones hold `CardHandle`s. A card sits in exactly one
//!   zone sequence, field slot, or equip list at a time.
//!
//! - **Two Action Sources**: Universal summoning mechanics live in
//!   `rules`; card abilities live in `effects`. The search merges both
//!   enumerations each round.
//!
//! - **Beam With Closure**: The main beam keeps a diversified frontier
//!   (best boards plus not-yet-finished setups), then two narrow closure
//!   passes spend leftover resources on the winning line.
//!
//! ## Modules
//!
//! - `core`: Arena handles, apply errors, seeded shuffling
//! - `cards`: Metadata, instances, providers, the demo pool table
//! - `state`: Zones, the position, trigger tokens, position hashing
//! - `effects`: Ability scripting, activation gates, the registry
//! - `rules`: Normal/tribute, generic special, and extra-deck summons
//! - `setup`: Serialized starting positions
//! - `search`: Beam search, evaluation, snapshots, statistics

pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod search;
pub mod setup;
pub mod state;

// Re-export commonly used types
pub use crate::core::{ApplyError, CardHandle, DealRng, SetupError};

pub use crate::cards::{
    CardData, CardInstance, CardKind, CardMeta, MetaProvider, MetaValue, StaticMetaProvider,
};

pub use crate::state::{
    phase, state_hash, EventKind, FieldZones, GameState, Restriction, TriggerEvent, Zone,
};

pub use crate::effects::{
    ActionParams, ActivationProfile, ActivationTiming, ActivationZone, CardEffect, EffectAction,
    EffectRegistry,
};

pub use crate::rules::{apply_core_action, enumerate_core_actions, tributes_required};

pub use crate::setup::{deal, CardSpec, OptMark, SlotSpec, StartingPosition, ZoneSpec};

pub use crate::search::{
    BoardEvaluator, BoardScore, BoardSnapshot, ComboSearch, EquipCountEvaluator, EquipSummary,
    SearchConfig, SearchOutcome, SearchStats,
};
