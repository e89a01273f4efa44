//! Trigger tokens and continuous-restriction markers.
//!
//! Transitions append `TriggerEvent`s as they resolve (one per summon, one
//! per card that hits the graveyard); trigger abilities consume a matching
//! token as part of their precondition, so each event fires each listener at
//! most once. Restrictions are append-only for the rest of the turn and are
//! consulted by every special-summon path.

use serde::{Deserialize, Serialize};

use crate::cards::CardMeta;

/// What just happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NormalSummon,
    SpecialSummon,
    LinkSummon,
    XyzSummon,
    SynchroSummon,
    FusionSummon,
    SentToGy,
}

impl EventKind {
    /// Stable tag for hashing and display.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::NormalSummon => "normal_summon",
            Self::SpecialSummon => "special_summon",
            Self::LinkSummon => "link_summon",
            Self::XyzSummon => "xyz_summon",
            Self::SynchroSummon => "synchro_summon",
            Self::FusionSummon => "fusion_summon",
            Self::SentToGy => "sent_to_gy",
        }
    }
}

/// One pending trigger token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub kind: EventKind,
    /// Cid of the card the event happened to.
    pub cid: String,
}

impl TriggerEvent {
    #[must_use]
    pub fn new(kind: EventKind, cid: impl Into<String>) -> Self {
        Self { kind, cid: cid.into() }
    }

    /// Does this token satisfy a listener waiting on `kind` for `cid`?
    #[must_use]
    pub fn matches(&self, kind: EventKind, cid: &str) -> bool {
        self.kind == kind && self.cid == cid
    }
}

/// A continuous-effect marker active for the rest of the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Restriction {
    /// Only monsters of this attribute may be special summoned.
    SpecialSummonAttributeOnly(String),
    /// The extra-deck summon mechanic is off entirely.
    NoExtraDeckSummon,
}

impl Restriction {
    /// Does this marker permit special-summoning a card with these stats?
    #[must_use]
    pub fn permits_special(&self, meta: &CardMeta) -> bool {
        match self {
            Self::SpecialSummonAttributeOnly(attr) => meta.attribute() == Some(attr.as_str()),
            Self::NoExtraDeckSummon => true,
        }
    }

    /// Does this marker permit any extra-deck summon at all?
    #[must_use]
    pub fn permits_extra_summon(&self) -> bool {
        !matches!(self, Self::NoExtraDeckSummon)
    }

    /// Canonical text form, used for fingerprinting and reasons.
    #[must_use]
    pub fn canon(&self) -> String {
        match self {
            Self::SpecialSummonAttributeOnly(attr) => format!("ss_attribute_only:{attr}"),
            Self::NoExtraDeckSummon => "no_extra_deck_summon".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::meta::keys;

    #[test]
    fn test_event_matching() {
        let ev = TriggerEvent::new(EventKind::NormalSummon, "DEMO_SEARCHER_001");
        assert!(ev.matches(EventKind::NormalSummon, "DEMO_SEARCHER_001"));
        assert!(!ev.matches(EventKind::SpecialSummon, "DEMO_SEARCHER_001"));
        assert!(!ev.matches(EventKind::NormalSummon, "DEMO_SEARCHER_002"));
    }

    #[test]
    fn test_attribute_restriction() {
        let r = Restriction::SpecialSummonAttributeOnly("FIRE".to_string());
        let fire = CardMeta::new().with(keys::ATTRIBUTE, "FIRE");
        let water = CardMeta::new().with(keys::ATTRIBUTE, "WATER");
        let none = CardMeta::new();

        assert!(r.permits_special(&fire));
        assert!(!r.permits_special(&water));
        assert!(!r.permits_special(&none));
        assert!(r.permits_extra_summon());
    }

    #[test]
    fn test_no_extra_restriction() {
        let r = Restriction::NoExtraDeckSummon;
        let fire = CardMeta::new().with(keys::ATTRIBUTE, "FIRE");
        assert!(r.permits_special(&fire));
        assert!(!r.permits_extra_summon());
    }

    #[test]
    fn test_canon_is_stable() {
        assert_eq!(
            Restriction::SpecialSummonAttributeOnly("FIRE".into()).canon(),
            "ss_attribute_only:FIRE"
        );
        assert_eq!(Restriction::NoExtraDeckSummon.canon(), "no_extra_deck_summon");
    }
}
