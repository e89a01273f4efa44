//! Action representation: card + ability + parameters.
//!
//! Actions are compositional: the cid names the card acting (the "noun"),
//! the effect id names the ability (the "verb"), and the parameter map
//! carries whatever that ability needs (slot indices, tribute lists,
//! search targets). For example:
//! - "Normal summon X into slot 2" = X + `normal_summon` + `{slot: 2}`
//! - "Equip E to the monster at 5" = E + `equip_from_hand` + `{target_pos: 5}`
//!
//! The engine does not interpret parameters; each ability reads its own
//! keys and reports a model defect when one is missing or mistyped.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::MetaValue;
use crate::core::ApplyError;

/// Parameter map for one action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParams(pub FxHashMap<String, MetaValue>);

impl ActionParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Integer parameter. Absence or a wrong type is a model defect: the
    /// enumerator that built this action and the ability reading it
    /// disagree about its shape.
    pub fn int(&self, key: &str) -> Result<i64, ApplyError> {
        self.0
            .get(key)
            .and_then(MetaValue::as_int)
            .ok_or_else(|| ApplyError::defect(format!("missing int param: {key}")))
    }

    /// Text parameter.
    pub fn text(&self, key: &str) -> Result<&str, ApplyError> {
        self.0
            .get(key)
            .and_then(MetaValue::as_text)
            .ok_or_else(|| ApplyError::defect(format!("missing text param: {key}")))
    }

    /// Integer-list parameter.
    pub fn int_list(&self, key: &str) -> Result<&[i64], ApplyError> {
        self.0
            .get(key)
            .and_then(MetaValue::as_int_list)
            .ok_or_else(|| ApplyError::defect(format!("missing int list param: {key}")))
    }

    /// Canonical rendering with sorted keys, for ordering and display.
    #[must_use]
    pub fn canon(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut entries: Vec<(&String, &MetaValue)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let parts: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("{k}={}", value_canon(v)))
            .collect();
        format!("{{{}}}", parts.join(","))
    }
}

fn value_canon(value: &MetaValue) -> String {
    match value {
        MetaValue::Int(n) => n.to_string(),
        MetaValue::Bool(b) => b.to_string(),
        MetaValue::Text(s) => s.clone(),
        MetaValue::IntList(ns) => {
            let parts: Vec<String> = ns.iter().map(ToString::to_string).collect();
            format!("[{}]", parts.join(","))
        }
        MetaValue::TextList(ss) => format!("[{}]", ss.join(",")),
    }
}

/// One fully specified step of a line: which card, which ability, and the
/// choices that pin the step down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectAction {
    /// Cid of the acting card.
    pub cid: String,

    /// Display name of the acting card.
    pub name: String,

    /// The ability being activated. Core game actions use the reserved
    /// ids in `crate::rules`.
    pub effect_id: String,

    /// Ability-specific choices.
    pub params: ActionParams,
}

impl EffectAction {
    #[must_use]
    pub fn for_card(
        cid: impl Into<String>,
        name: impl Into<String>,
        effect_id: impl Into<String>,
    ) -> Self {
        Self {
            cid: cid.into(),
            name: name.into(),
            effect_id: effect_id.into(),
            params: ActionParams::new(),
        }
    }

    /// Add an integer parameter.
    #[must_use]
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.params.set(key, value);
        self
    }

    /// Add a text parameter.
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(key, value.into());
        self
    }

    /// Add an integer-list parameter.
    #[must_use]
    pub fn with_int_list(mut self, key: impl Into<String>, values: Vec<i64>) -> Self {
        self.params.set(key, values);
        self
    }

    /// Canonical rendering: stable across runs, used to order enumerations.
    #[must_use]
    pub fn canon(&self) -> String {
        let params = self.params.canon();
        if params.is_empty() {
            format!("{}/{}", self.cid, self.effect_id)
        } else {
            format!("{}/{}/{params}", self.cid, self.effect_id)
        }
    }
}

impl std::fmt::Display for EffectAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params.canon();
        if params.is_empty() {
            write!(f, "{} [{}]", self.name, self.effect_id)
        } else {
            write!(f, "{} [{}] {params}", self.name, self.effect_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_accessors() {
        let action = EffectAction::for_card("C1", "Card One", "do_thing")
            .with_int("slot", 3)
            .with_text("target", "C2")
            .with_int_list("tributes", vec![4, 1]);

        assert_eq!(action.params.int("slot").unwrap(), 3);
        assert_eq!(action.params.text("target").unwrap(), "C2");
        assert_eq!(action.params.int_list("tributes").unwrap(), &[4, 1]);

        let missing = action.params.int("absent").unwrap_err();
        assert!(!missing.is_illegal());
        let mistyped = action.params.int("target").unwrap_err();
        assert!(!mistyped.is_illegal());
    }

    #[test]
    fn test_canon_sorts_params() {
        let a = EffectAction::for_card("C1", "Card One", "do_thing")
            .with_int("zeta", 1)
            .with_int("alpha", 2);
        assert_eq!(a.canon(), "C1/do_thing/{alpha=2,zeta=1}");

        let bare = EffectAction::for_card("C1", "Card One", "pass");
        assert_eq!(bare.canon(), "C1/pass");
    }

    #[test]
    fn test_display() {
        let a = EffectAction::for_card("C1", "Blazing Vanguard", "special_summon_self")
            .with_int("slot", 0);
        assert_eq!(a.to_string(), "Blazing Vanguard [special_summon_self] {slot=0}");
    }

    #[test]
    fn test_serialization_round_trip() {
        let action = EffectAction::for_card("C1", "Card One", "do_thing")
            .with_int("slot", 3)
            .with_text("target", "C2");
        let json = serde_json::to_string(&action).unwrap();
        let back: EffectAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
