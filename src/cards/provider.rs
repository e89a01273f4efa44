//! Card metadata providers.
//!
//! The engine never hardcodes card stats: every `CardInstance` is built by
//! asking a `MetaProvider` for the cid's display name and stat mapping. A
//! production deployment backs this with a card database; the crate ships a
//! static table-backed provider that covers the bundled demo pool and is
//! handy for tests.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::meta::CardMeta;

/// Resolved provider data for one cid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    /// Display name.
    pub name: String,
    /// Stat mapping.
    pub meta: CardMeta,
}

impl CardData {
    /// Build provider data from a name and mapping.
    #[must_use]
    pub fn new(name: impl Into<String>, meta: CardMeta) -> Self {
        Self { name: name.into(), meta }
    }

    /// Builder-style extra meta entry.
    #[must_use]
    pub fn with_meta(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::cards::meta::MetaValue>,
    ) -> Self {
        self.meta = self.meta.with(key, value);
        self
    }
}

/// Source of card names and stat mappings, consulted at instance
/// construction time.
pub trait MetaProvider {
    /// Look up a cid. `None` when the provider has never heard of it.
    fn lookup(&self, cid: &str) -> Option<CardData>;

    /// Resolve a cid, falling back to an inert card named after the cid (or
    /// the caller's fallback name) when unknown. Construction never fails:
    /// unknown cards simply have no stats and therefore no legal actions.
    fn resolve(&self, cid: &str, fallback_name: Option<&str>) -> CardData {
        self.lookup(cid).unwrap_or_else(|| CardData {
            name: fallback_name.unwrap_or(cid).to_string(),
            meta: CardMeta::new(),
        })
    }
}

/// Table-backed provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticMetaProvider {
    cards: FxHashMap<String, CardData>,
}

impl StaticMetaProvider {
    /// Empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cid's data.
    ///
    /// Panics if the cid is already registered: duplicate rows in a static
    /// table are a construction bug, not a runtime condition.
    pub fn register(&mut self, cid: impl Into<String>, data: CardData) {
        let cid = cid.into();
        assert!(
            !self.cards.contains_key(&cid),
            "card already registered: {cid}"
        );
        self.cards.insert(cid, data);
    }

    /// Builder-style register.
    #[must_use]
    pub fn with_card(mut self, cid: impl Into<String>, data: CardData) -> Self {
        self.register(cid, data);
        self
    }

    /// Number of registered cids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the table empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl MetaProvider for StaticMetaProvider {
    fn lookup(&self, cid: &str) -> Option<CardData> {
        self.cards.get(cid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::meta::keys;

    #[test]
    fn test_lookup_registered() {
        let provider = StaticMetaProvider::new().with_card(
            "DEMO_EXTENDER_001",
            CardData::new("Blazing Vanguard", CardMeta::new().with(keys::LEVEL, 4)),
        );

        let data = provider.lookup("DEMO_EXTENDER_001").unwrap();
        assert_eq!(data.name, "Blazing Vanguard");
        assert_eq!(data.meta.level(), Some(4));
    }

    #[test]
    fn test_resolve_unknown_is_inert() {
        let provider = StaticMetaProvider::new();
        let data = provider.resolve("NOT_A_CARD", None);
        assert_eq!(data.name, "NOT_A_CARD");
        assert!(data.meta.level().is_none());

        let named = provider.resolve("NOT_A_CARD", Some("Mystery"));
        assert_eq!(named.name, "Mystery");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut provider = StaticMetaProvider::new();
        provider.register("X", CardData::default());
        provider.register("X", CardData::default());
    }
}
