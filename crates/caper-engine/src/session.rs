//! The transition controller.
//!
//! A [`Session`] owns one game: the scene store, the player, a content
//! provider for scene documents, and a save slot. Selecting a choice applies
//! its effects in full before anything else happens, then moves the player,
//! then autosaves.
//!
//! Choices with a `load` reference are resolved in two phases so that hosts
//! with asynchronous I/O can fetch the document themselves:
//! [`Session::begin_choice`] hands back a [`LoadRequest`] and the session
//! stays in [`Phase::Resolving`] until [`Session::finish_load`] is called.
//! Nothing else that touches the store or the player is accepted meanwhile.
//! [`Session::select`] runs both phases through the session's own provider.

use caper_core::{MergeReport, PlayerState, Scene, SceneDocument, SceneId, SceneStore};

use crate::applicator::{Applied, apply};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, ProviderError, SaveError};
use crate::provider::ContentProvider;
use crate::save::{Reconciled, SaveSlot, reconcile};
use crate::view::{OfferedChoice, SceneView, offered_choices};

/// Where the session is in its render/select cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered since the last state change.
    Idle,
    /// Waiting for a scene document.
    Resolving(LoadRequest),
    /// The current scene has been rendered and its choices offered.
    Rendered,
}

/// A scene document the session is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Location to fetch from the content provider.
    pub location: String,
    /// Scene to move to once the document is merged.
    pub target: Option<SceneId>,
    /// Scene the choice was taken in.
    pub origin: SceneId,
    /// Effects already applied for this choice.
    pub applied: Applied,
}

/// Result of [`Session::begin_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The transition is complete.
    Done(Outcome),
    /// Fetch this document and pass it to [`Session::finish_load`].
    Fetch(LoadRequest),
}

/// Everything a completed transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Scene the choice was taken in.
    pub from: SceneId,
    /// Scene the player is in now.
    pub scene_id: SceneId,
    /// Effects applied.
    pub applied: Applied,
    /// Result of merging a loaded document, if one arrived.
    pub merged: Option<MergeReport>,
    /// Why a requested document could not be used.
    pub load_error: Option<String>,
    /// Why the autosave failed. Play continues regardless.
    pub save_error: Option<String>,
}

impl Outcome {
    /// Whether the player ended up in a different scene.
    pub fn moved(&self) -> bool {
        self.from != self.scene_id
    }
}

/// What happened when a session (re)loaded its base content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Startup {
    /// Why the base document could not be loaded; the store is empty if set.
    pub document_error: Option<String>,
    /// How a saved game was resumed, if one was found.
    pub restored: Option<Reconciled>,
    /// Why the save slot could not be read or cleared.
    pub save_error: Option<String>,
}

/// One game in progress.
pub struct Session<P, S> {
    config: EngineConfig,
    store: SceneStore,
    player: PlayerState,
    phase: Phase,
    provider: P,
    slot: S,
}

impl<P: ContentProvider, S: SaveSlot> Session<P, S> {
    /// Create a session with an empty store and a fresh player.
    ///
    /// Call [`start`](Self::start) to load the base document and resume any save.
    pub fn new(config: EngineConfig, provider: P, slot: S) -> Self {
        let player = config.new_player();
        Self {
            config,
            store: SceneStore::new(),
            player,
            phase: Phase::Idle,
            provider,
            slot,
        }
    }

    /// Load the base document, then resume the saved game if there is one.
    ///
    /// Neither step is fatal. Without content the store stays empty and every
    /// scene renders as unknown; an unreadable save leaves a fresh player.
    pub fn start(&mut self) -> Startup {
        let document_error = self.reload_base();
        let (restored, save_error) = match self.restore() {
            Ok(restored) => (restored, None),
            Err(e) => {
                log::warn!("could not resume saved game: {e}");
                (None, Some(e.to_string()))
            }
        };
        Startup {
            document_error,
            restored,
            save_error,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scene store.
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// The player.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether a scene document is being waited on.
    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, Phase::Resolving(_))
    }

    /// The content provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the content provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// The save slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// The scene the player is in, if it exists.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.store.get(&self.player.scene_id)
    }

    /// Choices currently on offer. Empty when the scene is unknown.
    pub fn offered(&self) -> Vec<OfferedChoice<'_>> {
        self.current_scene()
            .map(|scene| offered_choices(scene, &self.player))
            .unwrap_or_default()
    }

    /// Build the view of the current scene and mark it rendered.
    pub fn render(&mut self) -> SceneView {
        if !self.is_resolving() {
            self.phase = Phase::Rendered;
        }
        SceneView::build(&self.store, &self.player)
    }

    /// Take the offered choice with this shortcut.
    ///
    /// Effects are applied immediately. A plain choice then completes its
    /// transition and autosaves; a choice with `load` returns
    /// [`Step::Fetch`] and leaves the session resolving.
    pub fn begin_choice(&mut self, shortcut: usize) -> EngineResult<Step> {
        if self.is_resolving() {
            return Err(EngineError::Busy);
        }

        let choice = self
            .offered()
            .into_iter()
            .find(|o| o.shortcut == shortcut)
            .map(|o| o.choice.clone())
            .ok_or(EngineError::NoSuchChoice(shortcut))?;

        let applied = choice
            .effects
            .as_ref()
            .map(|effect| apply(effect, &mut self.player))
            .unwrap_or_default();
        let origin = self.player.scene_id.clone();

        if let Some(location) = choice.load {
            log::debug!("choice {shortcut} in '{origin}' needs {location}");
            let request = LoadRequest {
                location,
                target: choice.target,
                origin,
                applied,
            };
            self.phase = Phase::Resolving(request.clone());
            return Ok(Step::Fetch(request));
        }

        if let Some(target) = choice.target {
            log::debug!("'{origin}' -> '{target}'");
            self.player.scene_id = target;
        }
        let save_error = self.persist();
        self.phase = Phase::Idle;

        Ok(Step::Done(Outcome {
            from: origin,
            scene_id: self.player.scene_id.clone(),
            applied,
            merged: None,
            load_error: None,
            save_error,
        }))
    }

    /// Complete a pending load with the fetched document (or the fetch error).
    ///
    /// On success the document is merged (existing scenes win) and the player
    /// moves to the target if it now resolves. On failure the player still
    /// moves if the target already exists; otherwise they stay put. Either
    /// way the session autosaves.
    pub fn finish_load(
        &mut self,
        request: LoadRequest,
        fetched: Result<SceneDocument, ProviderError>,
    ) -> EngineResult<Outcome> {
        match &self.phase {
            Phase::Resolving(pending) if *pending == request => {}
            _ => return Err(EngineError::NotResolving),
        }

        let (merged, load_error) = match fetched {
            Ok(document) => {
                let report = self.store.merge(document);
                log::info!(
                    "merged {} new scenes from {} ({} kept)",
                    report.added.len(),
                    request.location,
                    report.kept.len()
                );
                let missing = request
                    .target
                    .as_ref()
                    .filter(|target| !self.store.contains(target))
                    .map(|target| {
                        format!(
                            "scene '{target}' not found after loading {}",
                            request.location
                        )
                    });
                (Some(report), missing)
            }
            Err(e) => {
                log::error!("failed to load scenes from {}: {e}", request.location);
                (None, Some(e.to_string()))
            }
        };

        if let Some(target) = &request.target
            && self.store.contains(target)
        {
            log::debug!("'{}' -> '{target}'", request.origin);
            self.player.scene_id = target.clone();
        }
        let save_error = self.persist();
        self.phase = Phase::Idle;

        Ok(Outcome {
            from: request.origin,
            scene_id: self.player.scene_id.clone(),
            applied: request.applied,
            merged,
            load_error,
            save_error,
        })
    }

    /// Take a choice, fetching any document it needs from the session's provider.
    pub fn select(&mut self, shortcut: usize) -> EngineResult<Outcome> {
        match self.begin_choice(shortcut)? {
            Step::Done(outcome) => Ok(outcome),
            Step::Fetch(request) => {
                let fetched = self.provider.fetch(&request.location);
                self.finish_load(request, fetched)
            }
        }
    }

    /// Write the player to the save slot.
    pub fn save(&mut self) -> EngineResult<()> {
        let record = serde_json::to_string(&self.player).map_err(SaveError::from)?;
        self.slot.write(&self.config.save_key, &record)?;
        Ok(())
    }

    fn persist(&mut self) -> Option<String> {
        self.save().err().map(|e| {
            log::warn!("autosave failed: {e}");
            e.to_string()
        })
    }

    /// Replace the player with the saved one, reconciled against the store.
    ///
    /// Returns `Ok(None)` when there is no save. On error the player is
    /// left untouched.
    pub fn restore(&mut self) -> EngineResult<Option<Reconciled>> {
        if self.is_resolving() {
            return Err(EngineError::Busy);
        }
        let Some(record) = self.slot.read(&self.config.save_key)? else {
            return Ok(None);
        };
        let mut player: PlayerState = serde_json::from_str(&record).map_err(SaveError::from)?;
        let reconciled = reconcile(&mut player, &self.store, &self.config);
        self.player = player;
        self.phase = Phase::Idle;
        Ok(Some(reconciled))
    }

    /// Start over: fresh player, no save, and only the base document's scenes.
    pub fn restart(&mut self) -> EngineResult<Startup> {
        if self.is_resolving() {
            return Err(EngineError::Busy);
        }
        self.player = self.config.new_player();
        let save_error = self.slot.clear(&self.config.save_key).err().map(|e| {
            log::warn!("could not clear save: {e}");
            e.to_string()
        });
        let document_error = self.reload_base();
        self.phase = Phase::Idle;
        Ok(Startup {
            document_error,
            restored: None,
            save_error,
        })
    }

    fn reload_base(&mut self) -> Option<String> {
        match self.provider.fetch(&self.config.base_document) {
            Ok(document) => {
                self.store.load(document);
                None
            }
            Err(e) => {
                log::error!("failed to load base scenes: {e}");
                self.store.clear();
                Some(e.to_string())
            }
        }
    }
}
