//! Configuration for a play session.

use std::collections::BTreeMap;

use caper_core::player::{START_SCENE, default_stats};
use caper_core::{PlayerState, SceneId};

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Scene a new game begins in, and the last-resort restore target.
    pub start_scene: SceneId,
    /// Location of the base scene document, passed to the content provider.
    pub base_document: String,
    /// Key of the save slot record.
    pub save_key: String,
    /// Stats a new player starts with.
    pub default_stats: BTreeMap<String, i64>,
    /// Renamed scenes: old id to new id, tried once when restoring a save.
    pub legacy_aliases: BTreeMap<SceneId, SceneId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_scene: START_SCENE.to_string(),
            base_document: "scenes/scenes.json".to_string(),
            save_key: "heistGameSave_v1".to_string(),
            default_stats: default_stats(),
            legacy_aliases: BTreeMap::from([("lobby".to_string(), "louvre_lobby".to_string())]),
        }
    }
}

impl EngineConfig {
    /// Set the start scene.
    pub fn with_start_scene(mut self, id: impl Into<SceneId>) -> Self {
        self.start_scene = id.into();
        self
    }

    /// Set the base document location.
    pub fn with_base_document(mut self, location: impl Into<String>) -> Self {
        self.base_document = location.into();
        self
    }

    /// Set the save slot key.
    pub fn with_save_key(mut self, key: impl Into<String>) -> Self {
        self.save_key = key.into();
        self
    }

    /// Set the starting value of a stat.
    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        self.default_stats.insert(name.into(), value);
        self
    }

    /// Map an old scene id to its replacement for restoring saves.
    pub fn with_alias(mut self, from: impl Into<SceneId>, to: impl Into<SceneId>) -> Self {
        self.legacy_aliases.insert(from.into(), to.into());
        self
    }

    /// A fresh player at the start scene.
    pub fn new_player(&self) -> PlayerState {
        PlayerState::new(self.start_scene.clone(), self.default_stats.clone())
    }
}
