//! Scenes and the choices that connect them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::effect::Effect;
use crate::requirement::Requirement;

/// Identifier of a scene, as used for keys in a scene document.
pub type SceneId = String;

/// A narrative node: a title, a body of text, and the choices leading out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Heading shown above the scene text.
    #[serde(default)]
    pub title: String,
    /// Narrative body.
    #[serde(default)]
    pub text: String,
    /// Choices in authored order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Create a scene with the given title and text and no choices.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// An edge out of a scene, optionally gated and optionally side-effecting.
///
/// `require`, `effects`, `target`, and `load` decode leniently: a field of the
/// wrong shape is logged and treated as absent rather than rejecting the
/// whole scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the player.
    #[serde(default)]
    pub text: String,
    /// Precondition for the choice to be offered.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub require: Option<Requirement>,
    /// State changes applied when the choice is taken.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub effects: Option<Effect>,
    /// Scene to move to.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<SceneId>,
    /// Additional scene document to fetch and merge before moving.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub load: Option<String>,
}

impl Choice {
    /// Create a choice with the given label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Gate the choice behind a requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.require = Some(requirement);
        self
    }

    /// Attach an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects = Some(effect);
        self
    }

    /// Set the target scene.
    pub fn with_target(mut self, target: impl Into<SceneId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the scene document to load before transitioning.
    pub fn with_load(mut self, source: impl Into<String>) -> Self {
        self.load = Some(source.into());
        self
    }
}

/// Decode an optional field, treating `null` and values of the wrong shape as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            log::warn!("ignoring malformed field: {e}");
            Ok(None)
        }
    }
}

/// Decode a list of item names entry by entry. Non-string entries are skipped.
pub(crate) fn lenient_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Value>> = lenient(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name),
                other => {
                    log::warn!("ignoring non-string item {other}");
                    None
                }
            })
            .collect()
    }))
}

/// Decode stat thresholds entry by entry.
///
/// Fractional thresholds round up to the smallest integer stat that meets them,
/// so `6.0` gates at 6 and `2.5` at 3.
pub(crate) fn lenient_thresholds<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_numbers(deserializer, |number| {
        number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.ceil() as i64))
    })
}

/// Decode stat deltas entry by entry. Only whole numbers are kept.
pub(crate) fn lenient_deltas<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_numbers(deserializer, |number| {
        number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    })
}

fn lenient_numbers<'de, D>(
    deserializer: D,
    convert: fn(&Number) -> Option<i64>,
) -> Result<Option<BTreeMap<String, i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Map<String, Value>> = lenient(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(stat, value)| {
                let converted = match &value {
                    Value::Number(number) => convert(number),
                    _ => None,
                };
                if converted.is_none() {
                    log::warn!("ignoring stat '{stat}': {value} is not a usable number");
                }
                converted.map(|n| (stat, n))
            })
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_builder() {
        let scene = Scene::new("Lobby", "Marble everywhere.")
            .with_choice(Choice::new("Sneak left").with_target("gallery"))
            .with_choice(Choice::new("Wait"));

        assert_eq!(scene.title, "Lobby");
        assert_eq!(scene.choices.len(), 2);
        assert_eq!(scene.choices[0].target.as_deref(), Some("gallery"));
        assert!(scene.choices[1].target.is_none());
    }

    #[test]
    fn decode_full_choice() {
        let json = r#"{
            "text": "Pick the lock",
            "require": {"inventory": ["lockpick"]},
            "effects": {"add": ["key"], "stats": {"notoriety": 1}},
            "target": "vault",
            "load": "scenes/vault.json"
        }"#;
        let choice: Choice = serde_json::from_str(json).unwrap();

        assert_eq!(choice.text, "Pick the lock");
        assert_eq!(
            choice.require.unwrap().inventory,
            Some(vec!["lockpick".to_string()])
        );
        assert_eq!(choice.effects.unwrap().add, Some(vec!["key".to_string()]));
        assert_eq!(choice.target.as_deref(), Some("vault"));
        assert_eq!(choice.load.as_deref(), Some("scenes/vault.json"));
    }

    #[test]
    fn malformed_fields_become_absent() {
        let json = r#"{"text": "Odd", "require": 7, "effects": "lots", "target": ["a"]}"#;
        let choice: Choice = serde_json::from_str(json).unwrap();

        assert_eq!(choice.text, "Odd");
        assert!(choice.require.is_none());
        assert!(choice.effects.is_none());
        assert!(choice.target.is_none());
    }

    #[test]
    fn missing_scene_fields_default() {
        let scene: Scene = serde_json::from_str("{}").unwrap();
        assert!(scene.title.is_empty());
        assert!(scene.text.is_empty());
        assert!(scene.choices.is_empty());
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let choice = Choice::new("Go").with_target("hall");
        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Go", "target": "hall"}));
    }
}
