//! Card data: metadata mappings, instances, and metadata providers.
//!
//! ## Key Types
//!
//! - `MetaValue` / `CardMeta`: the provider-supplied stat mapping
//! - `CardKind`: monster/spell classification driving summon placement
//! - `CardInstance`: one physical card (cid, name, meta, equips, state)
//! - `MetaProvider` / `StaticMetaProvider`: cid → name + stats lookup
//! - `demo`: the bundled demo pool table and deck lists
//!
//! Instances are always built through a provider; the engine itself never
//! hardcodes a card stat.

pub mod demo;
pub mod instance;
pub mod meta;
pub mod provider;

pub use instance::CardInstance;
pub use meta::{CardKind, CardMeta, MetaValue};
pub use provider::{CardData, MetaProvider, StaticMetaProvider};
