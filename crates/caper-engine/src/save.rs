//! Save slots and restore reconciliation.
//!
//! A slot holds one record per key; writing replaces the record wholesale.
//! Restoring a record whose scene no longer exists goes through
//! [`reconcile`], which keeps old saves playable after scenes are renamed.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use caper_core::{PlayerState, SceneId, SceneStore};

use crate::config::EngineConfig;
use crate::error::SaveError;

/// Key-value storage for serialized player state.
pub trait SaveSlot {
    /// Read the record under `key`, or `None` if there is none.
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;

    /// Replace the record under `key`.
    fn write(&mut self, key: &str, record: &str) -> Result<(), SaveError>;

    /// Delete the record under `key`. Deleting a missing record succeeds.
    fn clear(&mut self, key: &str) -> Result<(), SaveError>;
}

/// Stores each record as `<key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Store records in `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the record for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, record: &str) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the record, then rename over it.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, record)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps records in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    records: HashMap<String, String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a record already stored under `key`.
    pub fn with_record(mut self, key: impl Into<String>, record: impl Into<String>) -> Self {
        self.records.insert(key.into(), record.into());
        self
    }

    /// The record under `key`, if any.
    pub fn record(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

impl SaveSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, record: &str) -> Result<(), SaveError> {
        self.records.insert(key.to_string(), record.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SaveError> {
        self.records.remove(key);
        Ok(())
    }
}

/// How a restored scene id was resolved against the current store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// The saved scene exists.
    Exact,
    /// The saved scene was renamed; the player was moved to its new id.
    Alias {
        /// Id found in the save.
        from: SceneId,
        /// Id the player now occupies.
        to: SceneId,
    },
    /// The saved scene is gone; the player was moved to the start scene.
    Reset {
        /// Id found in the save.
        from: SceneId,
    },
}

/// Point `player` at a scene the store can resolve.
///
/// Tries the saved id, then its single legacy alias (if that alias exists in
/// the store), then falls back to the start scene.
pub fn reconcile(
    player: &mut PlayerState,
    store: &SceneStore,
    config: &EngineConfig,
) -> Reconciled {
    if store.contains(&player.scene_id) {
        return Reconciled::Exact;
    }

    let from = std::mem::take(&mut player.scene_id);
    if let Some(to) = config.legacy_aliases.get(&from)
        && store.contains(to)
    {
        log::info!("restored save moved from legacy scene '{from}' to '{to}'");
        player.scene_id = to.clone();
        return Reconciled::Alias {
            from,
            to: to.clone(),
        };
    }

    log::warn!(
        "saved scene '{from}' no longer exists; restarting at '{}'",
        config.start_scene
    );
    player.scene_id = config.start_scene.clone();
    Reconciled::Reset { from }
}
