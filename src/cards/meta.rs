//! Card metadata: the provider-supplied stat mapping.
//!
//! Card stats (attribute, race, level/rank/link rating, kind, per-card
//! flags) come from an external metadata provider and are carried as an
//! opaque typed map. The engine reads them through typed accessors and never
//! hardcodes a stat; an unknown cid simply yields an empty map and an inert
//! card.
//!
//! ## MetaValue Types
//!
//! - `Int`: levels, ranks, link ratings, material counts
//! - `Bool`: flags (generic_special, from_extra)
//! - `Text`: attribute, race, kind
//! - `IntList` / `TextList`: multi-valued entries (also reused for action
//!   parameters, e.g. tribute index lists and material cid lists)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Well-known metadata keys.
pub mod keys {
    pub const ATTRIBUTE: &str = "attribute";
    pub const RACE: &str = "race";
    pub const LEVEL: &str = "level";
    pub const RANK: &str = "rank";
    pub const LINK_RATING: &str = "link_rating";
    pub const KIND: &str = "kind";
    pub const FROM_EXTRA: &str = "from_extra";
    pub const GENERIC_SPECIAL: &str = "generic_special";
    pub const MATERIALS_MIN: &str = "materials_min";
    pub const MATERIALS_MAX: &str = "materials_max";
    pub const MATERIAL_ATTRIBUTE: &str = "material_attribute";
    pub const MATERIAL_RACE: &str = "material_race";
}

/// One metadata (or action-parameter) value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaValue {
    /// Integer value (level, rank, link rating).
    Int(i64),
    /// Boolean flag (from_extra, generic_special).
    Bool(bool),
    /// Text value (attribute, race, kind).
    Text(String),
    /// List of integers (tribute slot indices, material position codes).
    IntList(Vec<i64>),
    /// List of strings (cid lists).
    TextList(Vec<String>),
}

impl MetaValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as int list reference if this is an IntList value.
    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            MetaValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as text list reference if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Int(v as i64)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

impl From<Vec<i64>> for MetaValue {
    fn from(v: Vec<i64>) -> Self {
        MetaValue::IntList(v)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(v: Vec<String>) -> Self {
        MetaValue::TextList(v)
    }
}

/// How a card reaches the field (and which half of the pool it lives in).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Vanilla main-deck monster.
    Normal,
    /// Effect main-deck monster.
    Effect,
    /// Extra-deck kinds.
    Fusion,
    Synchro,
    Xyz,
    Link,
    Pendulum,
    /// Spells.
    Spell,
    EquipSpell,
    FieldSpell,
}

impl CardKind {
    /// Parse the provider's text tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "normal" => Self::Normal,
            "effect" => Self::Effect,
            "fusion" => Self::Fusion,
            "synchro" => Self::Synchro,
            "xyz" => Self::Xyz,
            "link" => Self::Link,
            "pendulum" => Self::Pendulum,
            "spell" => Self::Spell,
            "equip_spell" => Self::EquipSpell,
            "field_spell" => Self::FieldSpell,
            _ => return None,
        })
    }

    /// Text tag the provider uses for this kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Effect => "effect",
            Self::Fusion => "fusion",
            Self::Synchro => "synchro",
            Self::Xyz => "xyz",
            Self::Link => "link",
            Self::Pendulum => "pendulum",
            Self::Spell => "spell",
            Self::EquipSpell => "equip_spell",
            Self::FieldSpell => "field_spell",
        }
    }

    /// Does this kind live in the extra deck?
    #[must_use]
    pub fn is_extra(self) -> bool {
        matches!(
            self,
            Self::Fusion | Self::Synchro | Self::Xyz | Self::Link | Self::Pendulum
        )
    }

    /// Is this a monster kind at all?
    #[must_use]
    pub fn is_monster(self) -> bool {
        !matches!(self, Self::Spell | Self::EquipSpell | Self::FieldSpell)
    }
}

/// The metadata mapping for one card, with typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMeta(pub FxHashMap<String, MetaValue>);

impl CardMeta {
    /// Empty mapping (inert card).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Integer entry, if present and an Int.
    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(MetaValue::as_int)
    }

    /// Bool entry, defaulting to false.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(MetaValue::as_bool).unwrap_or(false)
    }

    /// Text entry, if present and Text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_text)
    }

    /// Monster attribute tag ("FIRE", "WATER", ...).
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.text(keys::ATTRIBUTE)
    }

    /// Monster race tag ("Warrior", "Pyro", ...).
    #[must_use]
    pub fn race(&self) -> Option<&str> {
        self.text(keys::RACE)
    }

    /// Printed level (main-deck and fusion/synchro monsters).
    #[must_use]
    pub fn level(&self) -> Option<i64> {
        self.int(keys::LEVEL)
    }

    /// Xyz rank.
    #[must_use]
    pub fn rank(&self) -> Option<i64> {
        self.int(keys::RANK)
    }

    /// Link rating.
    #[must_use]
    pub fn link_rating(&self) -> Option<i64> {
        self.int(keys::LINK_RATING)
    }

    /// Card kind; unknown or absent tags read as `Normal` (inert).
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.text(keys::KIND)
            .and_then(CardKind::from_tag)
            .unwrap_or(CardKind::Normal)
    }

    /// Does this card live in the extra deck? Falls back to the kind when
    /// the provider did not set the derived flag explicitly.
    #[must_use]
    pub fn from_extra(&self) -> bool {
        match self.get(keys::FROM_EXTRA).and_then(MetaValue::as_bool) {
            Some(v) => v,
            None => self.kind().is_extra(),
        }
    }

    /// May this card use the generic special-summon placement mechanic?
    #[must_use]
    pub fn generic_special(&self) -> bool {
        self.flag(keys::GENERIC_SPECIAL)
    }

    /// Declared minimum material count for an extra-deck summon.
    #[must_use]
    pub fn materials_min(&self) -> Option<i64> {
        self.int(keys::MATERIALS_MIN)
    }

    /// Declared maximum material count for an extra-deck summon.
    #[must_use]
    pub fn materials_max(&self) -> Option<i64> {
        self.int(keys::MATERIALS_MAX)
    }

    /// Attribute every material must share, if declared.
    #[must_use]
    pub fn material_attribute(&self) -> Option<&str> {
        self.text(keys::MATERIAL_ATTRIBUTE)
    }

    /// Race every material must share, if declared.
    #[must_use]
    pub fn material_race(&self) -> Option<&str> {
        self.text(keys::MATERIAL_RACE)
    }
}
