use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::document::SceneDocument;
use crate::scene::{Scene, SceneId};

/// How [`SceneStore::merge_with`] treats ids that are already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// First-loaded wins: existing scenes are kept.
    #[default]
    KeepExisting,
    /// Incoming scenes replace existing ones.
    Override,
}

/// What a merge did with each incoming id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Ids that were new to the store.
    pub added: Vec<SceneId>,
    /// Ids already present and left untouched.
    pub kept: Vec<SceneId>,
    /// Ids already present and replaced.
    pub replaced: Vec<SceneId>,
}

/// The authoritative mapping from scene id to scene.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    scenes: BTreeMap<SceneId, Scene>,
}

impl SceneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding exactly the scenes of `document`.
    pub fn from_document(document: SceneDocument) -> Self {
        Self {
            scenes: document.into_scenes(),
        }
    }

    /// Replace the whole store with `document`.
    pub fn load(&mut self, document: SceneDocument) {
        self.scenes = document.into_scenes();
        log::debug!("scene store loaded with {} scenes", self.scenes.len());
    }

    /// Merge `document` in, keeping any scene that is already present.
    pub fn merge(&mut self, document: SceneDocument) -> MergeReport {
        self.merge_with(document, MergePolicy::KeepExisting)
    }

    /// Merge `document` in under the given policy.
    pub fn merge_with(&mut self, document: SceneDocument, policy: MergePolicy) -> MergeReport {
        let mut report = MergeReport::default();
        for (id, scene) in document.into_scenes() {
            match self.scenes.entry(id) {
                Entry::Vacant(slot) => {
                    report.added.push(slot.key().clone());
                    slot.insert(scene);
                }
                Entry::Occupied(mut slot) => match policy {
                    MergePolicy::KeepExisting => {
                        log::warn!("merge kept existing scene '{}'", slot.key());
                        report.kept.push(slot.key().clone());
                    }
                    MergePolicy::Override => {
                        report.replaced.push(slot.key().clone());
                        slot.insert(scene);
                    }
                },
            }
        }
        report
    }

    /// Look up a scene. `None` is an expected outcome for unknown ids.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Whether a scene with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// All scene ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &SceneId> {
        self.scenes.keys()
    }

    /// All scenes with their ids, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&SceneId, &Scene)> {
        self.scenes.iter()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the store has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Remove every scene.
    pub fn clear(&mut self) {
        self.scenes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: &[(&str, &str)]) -> SceneDocument {
        entries
            .iter()
            .map(|(id, title)| (id.to_string(), Scene::new(*title, "")))
            .collect()
    }

    #[test]
    fn merge_keeps_first_loaded() {
        let mut store = SceneStore::from_document(doc(&[("a", "Scene A")]));
        let report = store.merge(doc(&[("a", "Scene A2"), ("b", "Scene B")]));

        assert_eq!(store.get("a").unwrap().title, "Scene A");
        assert_eq!(store.get("b").unwrap().title, "Scene B");
        assert_eq!(report.added, vec!["b".to_string()]);
        assert_eq!(report.kept, vec!["a".to_string()]);
        assert!(report.replaced.is_empty());
    }

    #[test]
    fn explicit_override() {
        let mut store = SceneStore::from_document(doc(&[("a", "Scene A")]));
        let report = store.merge_with(doc(&[("a", "Scene A2")]), MergePolicy::Override);

        assert_eq!(store.get("a").unwrap().title, "Scene A2");
        assert_eq!(report.replaced, vec!["a".to_string()]);
    }

    #[test]
    fn load_replaces_everything() {
        let mut store = SceneStore::from_document(doc(&[("a", "A"), ("extra", "X")]));
        store.load(doc(&[("b", "B")]));

        assert!(!store.contains("a"));
        assert!(!store.contains("extra"));
        assert!(store.contains("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_id_is_none() {
        let store = SceneStore::new();
        assert!(store.is_empty());
        assert!(store.get("start").is_none());
    }

    #[test]
    fn ids_are_sorted() {
        let store = SceneStore::from_document(doc(&[("c", ""), ("a", ""), ("b", "")]));
        let ids: Vec<&str> = store.ids().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
