//! Static checks over a scene store.
//!
//! Requirements are ignored when walking the graph: whether a gated choice is
//! offered depends on player state, so every authored edge counts.

use std::collections::{BTreeSet, VecDeque};

use crate::scene::SceneId;
use crate::store::SceneStore;

/// A choice whose target is not in the store and cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTarget {
    /// Scene holding the choice.
    pub scene: SceneId,
    /// 1-based position of the choice within the scene.
    pub position: usize,
    /// The missing target.
    pub target: SceneId,
}

/// Result of auditing a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    /// Whether the start scene itself is missing.
    pub start_missing: bool,
    /// Choices pointing nowhere.
    pub dangling: Vec<DanglingTarget>,
    /// Scenes no path from the start scene reaches.
    pub unreachable: Vec<SceneId>,
    /// Distinct external documents referenced by `load`.
    pub pending_loads: Vec<String>,
}

impl Audit {
    /// Audit `store`, walking from `start`.
    pub fn run(store: &SceneStore, start: &str) -> Self {
        let mut audit = Self {
            start_missing: !store.contains(start),
            ..Self::default()
        };

        let mut loads = BTreeSet::new();
        for (id, scene) in store.iter() {
            for (idx, choice) in scene.choices.iter().enumerate() {
                if let Some(source) = &choice.load {
                    loads.insert(source.clone());
                }
                if let Some(target) = &choice.target
                    && choice.load.is_none()
                    && !store.contains(target)
                {
                    audit.dangling.push(DanglingTarget {
                        scene: id.clone(),
                        position: idx + 1,
                        target: target.clone(),
                    });
                }
            }
        }
        audit.pending_loads = loads.into_iter().collect();

        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        if store.contains(start) {
            seen.insert(start.to_string());
            queue.push_back(start.to_string());
        }
        while let Some(id) = queue.pop_front() {
            let Some(scene) = store.get(&id) else {
                continue;
            };
            for target in scene.choices.iter().filter_map(|c| c.target.as_ref()) {
                if store.contains(target) && seen.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
        }
        audit.unreachable = store.ids().filter(|id| !seen.contains(*id)).cloned().collect();

        audit
    }

    /// No missing start scene and no dangling targets.
    pub fn is_clean(&self) -> bool {
        !self.start_missing && self.dangling.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SceneDocument;
    use crate::scene::{Choice, Scene};

    fn heist_store() -> SceneStore {
        let doc = SceneDocument::new()
            .with_scene(
                "start",
                Scene::new("Start", "")
                    .with_choice(Choice::new("In").with_target("hall"))
                    .with_choice(Choice::new("Ghost").with_target("nowhere"))
                    .with_choice(
                        Choice::new("Vault")
                            .with_load("scenes/vault.json")
                            .with_target("vault"),
                    ),
            )
            .with_scene("hall", Scene::new("Hall", ""))
            .with_scene("attic", Scene::new("Attic", ""));
        SceneStore::from_document(doc)
    }

    #[test]
    fn finds_dangling_targets() {
        let audit = Audit::run(&heist_store(), "start");
        assert_eq!(
            audit.dangling,
            vec![DanglingTarget {
                scene: "start".into(),
                position: 2,
                target: "nowhere".into(),
            }]
        );
        assert!(!audit.is_clean());
    }

    #[test]
    fn loaded_targets_are_not_dangling() {
        let audit = Audit::run(&heist_store(), "start");
        assert!(audit.dangling.iter().all(|d| d.target != "vault"));
        assert_eq!(audit.pending_loads, vec!["scenes/vault.json".to_string()]);
    }

    #[test]
    fn finds_unreachable_scenes() {
        let audit = Audit::run(&heist_store(), "start");
        assert_eq!(audit.unreachable, vec!["attic".to_string()]);
    }

    #[test]
    fn missing_start() {
        let audit = Audit::run(&heist_store(), "prologue");
        assert!(audit.start_missing);
        assert_eq!(audit.unreachable.len(), 3);
    }
}
