/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while decoding scene content.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The document is not valid JSON.
    #[error("invalid scene document: {0}")]
    Document(#[from] serde_json::Error),

    /// The document parsed, but its top level is not an object keyed by scene id.
    #[error("scene document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}
