//! Decoding of scene documents.
//!
//! A scene document is a JSON object mapping scene identifiers to scenes.
//! Entries that fail to decode are set aside rather than failing the whole
//! document, so a single badly authored scene only makes that scene unknown.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::scene::{Scene, SceneId};

/// A decoded batch of scenes, ready to load or merge into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDocument {
    scenes: BTreeMap<SceneId, Scene>,
    rejected: Vec<(SceneId, String)>,
}

impl SceneDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from JSON text.
    pub fn from_json(src: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(src)?;
        Self::from_value(value)
    }

    /// Decode a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Err(CoreError::NotAnObject("null")),
            Value::Bool(_) => return Err(CoreError::NotAnObject("a boolean")),
            Value::Number(_) => return Err(CoreError::NotAnObject("a number")),
            Value::String(_) => return Err(CoreError::NotAnObject("a string")),
            Value::Array(_) => return Err(CoreError::NotAnObject("an array")),
        };

        let mut doc = Self::new();
        for (id, entry) in map {
            match serde_json::from_value::<Scene>(entry) {
                Ok(scene) => {
                    doc.scenes.insert(id, scene);
                }
                Err(e) => {
                    log::warn!("rejecting scene '{id}': {e}");
                    doc.rejected.push((id, e.to_string()));
                }
            }
        }
        Ok(doc)
    }

    /// Add a scene, replacing any scene with the same id in this document.
    pub fn with_scene(mut self, id: impl Into<SceneId>, scene: Scene) -> Self {
        self.scenes.insert(id.into(), scene);
        self
    }

    /// Decoded scenes, keyed by id.
    pub fn scenes(&self) -> &BTreeMap<SceneId, Scene> {
        &self.scenes
    }

    /// Entries that failed to decode, with the reason.
    pub fn rejected(&self) -> &[(SceneId, String)] {
        &self.rejected
    }

    /// Number of decoded scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene decoded.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Consume the document, yielding its scenes.
    pub fn into_scenes(self) -> BTreeMap<SceneId, Scene> {
        self.scenes
    }
}

impl FromIterator<(SceneId, Scene)> for SceneDocument {
    fn from_iter<I: IntoIterator<Item = (SceneId, Scene)>>(iter: I) -> Self {
        Self {
            scenes: iter.into_iter().collect(),
            rejected: Vec::new(),
        }
    }
}
