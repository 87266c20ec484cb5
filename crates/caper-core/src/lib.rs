//! Core types for Caper: scenes, choices, player state, and the scene store.
//!
//! This crate defines the data model that scene documents decode into. It
//! knows nothing about how documents are fetched or how a session moves
//! between scenes; that lives in `caper-engine`.

/// Scene-graph checks (dangling targets, unreachable scenes).
pub mod audit;
/// Decoding of scene documents.
pub mod document;
/// Inventory and stat mutations attached to choices.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// The player's progress snapshot.
pub mod player;
/// Preconditions gating a choice's visibility.
pub mod requirement;
/// Scenes and choices.
pub mod scene;
/// The mapping from scene identifier to scene definition.
pub mod store;

pub use audit::{Audit, DanglingTarget};
pub use document::SceneDocument;
pub use effect::Effect;
pub use error::{CoreError, CoreResult};
pub use player::PlayerState;
pub use requirement::{Requirement, RequirementKind};
pub use scene::{Choice, Scene, SceneId};
pub use store::{MergePolicy, MergeReport, SceneStore};
