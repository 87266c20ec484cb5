//! Scene engine for Caper.
//!
//! Decides which choices a player is offered, applies the effects of the
//! chosen one, moves the player between scenes (fetching and merging extra
//! scene documents on demand), and keeps a save slot up to date.

/// Effect application.
pub mod applicator;
/// Engine configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
/// Requirement evaluation.
pub mod evaluator;
/// Sources of scene documents.
pub mod provider;
/// Save slots and restore reconciliation.
pub mod save;
/// The transition controller.
pub mod session;
/// What the presentation layer draws.
pub mod view;

pub use applicator::{Applied, StatChange, apply};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ProviderError, SaveError};
pub use evaluator::{Gate, evaluate, satisfies};
pub use provider::{ContentProvider, DirProvider, MemoryProvider};
pub use save::{FileSlot, MemorySlot, Reconciled, SaveSlot, reconcile};
pub use session::{LoadRequest, Outcome, Phase, Session, Startup, Step};
pub use view::{ChoiceLabel, OfferedChoice, SceneView, offered_choices};
