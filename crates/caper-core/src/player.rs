//! The player's progress snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scene::SceneId;

/// Scene a new game begins in.
pub const START_SCENE: &str = "start";

/// Stats a new player starts with.
pub fn default_stats() -> BTreeMap<String, i64> {
    BTreeMap::from([("stealth".to_string(), 5), ("notoriety".to_string(), 0)])
}

/// Where the player is, what they carry, and their stats.
///
/// Serializes as `{"sceneId", "inventory", "stats"}`, the save record format.
/// Fields missing from a record take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerState {
    /// Current scene.
    pub scene_id: SceneId,
    /// Held items, in the order they were picked up.
    pub inventory: Vec<String>,
    /// Named integer stats.
    pub stats: BTreeMap<String, i64>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(START_SCENE, default_stats())
    }
}

impl PlayerState {
    /// Create a player in `scene_id` with an empty inventory.
    pub fn new(scene_id: impl Into<SceneId>, stats: BTreeMap<String, i64>) -> Self {
        Self {
            scene_id: scene_id.into(),
            inventory: Vec::new(),
            stats,
        }
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item unless it is already held. Returns whether it was added.
    pub fn add_item(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.has_item(&item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Remove every copy of an item. Returns whether anything was removed.
    pub fn remove_item(&mut self, item: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|i| i != item);
        self.inventory.len() != before
    }

    /// Value of a stat; missing stats read as 0.
    pub fn stat(&self, name: &str) -> i64 {
        self.stats.get(name).copied().unwrap_or(0)
    }

    /// Add `delta` to a stat and return the new value. No bounds are enforced.
    pub fn adjust_stat(&mut self, name: impl Into<String>, delta: i64) -> i64 {
        let value = self.stats.entry(name.into()).or_insert(0);
        *value = value.saturating_add(delta);
        *value
    }
}
