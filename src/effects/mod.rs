//! Card abilities and the machinery that runs them.
//!
//! - `EffectAction`: one fully specified activation (card + ability +
//!   choices)
//! - `ActivationProfile`: where and when each ability may fire
//! - `CardEffect`: the per-card enumerate/apply protocol
//! - `EffectRegistry`: gates and dispatches registered behavior
//! - `combinators`: the shared moves implementations compose
//! - `cards`: the scripted demo pool
//!
//! Core summoning mechanics are not abilities and live in `crate::rules`;
//! everything card-specific routes through here.

pub mod action;
pub mod activation;
pub mod cards;
pub mod combinators;
mod effect;
pub mod registry;

pub use action::{ActionParams, EffectAction};
pub use activation::{ActivationProfile, ActivationTiming, ActivationZone};
pub use effect::CardEffect;
pub use registry::EffectRegistry;
