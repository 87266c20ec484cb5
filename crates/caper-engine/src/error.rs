//! Error types for the scene engine.

use thiserror::Error;

use caper_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum EngineError {
    /// A scene document is still being fetched.
    #[error("a scene document is still loading")]
    Busy,

    /// No offered choice has this shortcut.
    #[error("invalid choice: {0}")]
    NoSuchChoice(usize),

    /// A load completion arrived that the session was not waiting for.
    #[error("no scene document is being loaded")]
    NotResolving,

    /// Scene content could not be fetched.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The save slot could not be read or written.
    #[error("{0}")]
    Save(#[from] SaveError),
}

/// Errors from fetching a scene document.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Nothing exists at this location.
    #[error("scene document not found: {0}")]
    NotFound(String),

    /// Reading the document failed.
    #[error("failed to read {location}: {error}")]
    Io {
        /// Requested location.
        location: String,
        /// Underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The document was fetched but is not a scene document.
    #[error("failed to decode {location}: {error}")]
    Document {
        /// Requested location.
        location: String,
        /// Underlying error.
        #[source]
        error: CoreError,
    },
}

/// Errors from the save slot.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Storage failed.
    #[error("save slot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not a valid player snapshot.
    #[error("save record is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
