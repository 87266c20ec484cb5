//! What the presentation layer draws.
//!
//! Shortcuts number the *offered* choices 1, 2, 3... in authored order.
//! Hidden choices do not consume a number, so the keys a player sees are
//! always contiguous.

use std::collections::BTreeMap;

use caper_core::{Choice, PlayerState, Scene, SceneId, SceneStore};

use crate::evaluator::satisfies;

/// Title shown when the current scene does not exist.
pub const UNKNOWN_TITLE: &str = "Unknown";
/// Text shown when the current scene does not exist.
pub const UNKNOWN_TEXT: &str = "The scene could not be found.";
/// Title shown for a scene authored without one.
pub const UNTITLED: &str = "Untitled";

/// A choice the player may pick right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferedChoice<'a> {
    /// 1-based key among the offered choices.
    pub shortcut: usize,
    /// 1-based position among all authored choices.
    pub position: usize,
    /// The choice itself.
    pub choice: &'a Choice,
}

/// The choices of `scene` whose requirements the player meets.
pub fn offered_choices<'a>(scene: &'a Scene, player: &PlayerState) -> Vec<OfferedChoice<'a>> {
    scene
        .choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| satisfies(choice.require.as_ref(), player))
        .enumerate()
        .map(|(offered, (position, choice))| OfferedChoice {
            shortcut: offered + 1,
            position: position + 1,
            choice,
        })
        .collect()
}

/// A labelled choice as presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceLabel {
    /// Key that selects it.
    pub shortcut: usize,
    /// Label text.
    pub text: String,
}

/// Everything needed to draw the current scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneView {
    /// Current scene id.
    pub scene_id: SceneId,
    /// Whether the scene exists in the store.
    pub found: bool,
    /// Heading.
    pub title: String,
    /// Narrative body.
    pub text: String,
    /// Offered choices.
    pub choices: Vec<ChoiceLabel>,
    /// Held items in pickup order.
    pub inventory: Vec<String>,
    /// Stats by name.
    pub stats: BTreeMap<String, i64>,
}

impl SceneView {
    /// Build the view of the player's current scene.
    pub fn build(store: &SceneStore, player: &PlayerState) -> Self {
        let (found, title, text, choices) = match store.get(&player.scene_id) {
            Some(scene) => {
                let title = if scene.title.is_empty() {
                    UNTITLED.to_string()
                } else {
                    scene.title.clone()
                };
                let choices = offered_choices(scene, player)
                    .into_iter()
                    .map(|o| ChoiceLabel {
                        shortcut: o.shortcut,
                        text: o.choice.text.clone(),
                    })
                    .collect();
                (true, title, scene.text.clone(), choices)
            }
            None => (
                false,
                UNKNOWN_TITLE.to_string(),
                UNKNOWN_TEXT.to_string(),
                Vec::new(),
            ),
        };

        Self {
            scene_id: player.scene_id.clone(),
            found,
            title,
            text,
            choices,
            inventory: player.inventory.clone(),
            stats: player.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caper_core::{Requirement, SceneDocument};

    fn gated_scene() -> Scene {
        Scene::new("Gallery", "Lasers hum.")
            .with_choice(
                Choice::new("Crawl").with_requirement(Requirement::stats([("stealth", 9)])),
            )
            .with_choice(Choice::new("Walk"))
            .with_choice(
                Choice::new("Use badge").with_requirement(Requirement::inventory(["badge"])),
            )
            .with_choice(Choice::new("Leave"))
    }

    #[test]
    fn hidden_choices_do_not_take_a_shortcut() {
        let scene = gated_scene();
        let offered = offered_choices(&scene, &PlayerState::default());

        let summary: Vec<(usize, usize, &str)> = offered
            .iter()
            .map(|o| (o.shortcut, o.position, o.choice.text.as_str()))
            .collect();
        assert_eq!(summary, vec![(1, 2, "Walk"), (2, 4, "Leave")]);
    }

    #[test]
    fn meeting_a_requirement_reveals_the_choice() {
        let scene = gated_scene();
        let mut player = PlayerState::default();
        player.add_item("badge");

        let texts: Vec<&str> = offered_choices(&scene, &player)
            .iter()
            .map(|o| o.choice.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Walk", "Use badge", "Leave"]);
    }

    #[test]
    fn view_of_known_scene() {
        let store = SceneStore::from_document(
            SceneDocument::new()
                .with_scene("start", gated_scene())
                .with_scene("bare", Scene::default()),
        );
        let view = SceneView::build(&store, &PlayerState::default());

        assert!(view.found);
        assert_eq!(view.title, "Gallery");
        assert_eq!(view.choices.len(), 2);
        assert_eq!(view.choices[1], ChoiceLabel { shortcut: 2, text: "Leave".into() });
        assert_eq!(view.stats.get("stealth"), Some(&5));

        let player = PlayerState {
            scene_id: "bare".into(),
            ..PlayerState::default()
        };
        assert_eq!(SceneView::build(&store, &player).title, UNTITLED);
    }

    #[test]
    fn view_of_unknown_scene() {
        let view = SceneView::build(&SceneStore::new(), &PlayerState::default());
        assert!(!view.found);
        assert_eq!(view.title, UNKNOWN_TITLE);
        assert_eq!(view.text, UNKNOWN_TEXT);
        assert!(view.choices.is_empty());
    }
}
