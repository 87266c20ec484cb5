//! Sources of scene documents.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use caper_core::SceneDocument;

use crate::error::ProviderError;

/// Something that can hand out scene documents by location.
///
/// The base document and every `load` reference on a choice go through the
/// same provider. No authentication or versioning is involved.
pub trait ContentProvider {
    /// Fetch and decode the document at `location`.
    fn fetch(&self, location: &str) -> Result<SceneDocument, ProviderError>;
}

/// Serves documents from files, resolving locations against a root directory.
#[derive(Debug, Clone)]
pub struct DirProvider {
    root: PathBuf,
}

impl DirProvider {
    /// Serve files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentProvider for DirProvider {
    fn fetch(&self, location: &str) -> Result<SceneDocument, ProviderError> {
        let path = self.root.join(location);
        let src = std::fs::read_to_string(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ProviderError::NotFound(location.to_string()),
            _ => ProviderError::Io {
                location: location.to_string(),
                error,
            },
        })?;
        let document = SceneDocument::from_json(&src).map_err(|error| ProviderError::Document {
            location: location.to_string(),
            error,
        })?;
        log::debug!("fetched {} scenes from {}", document.len(), path.display());
        Ok(document)
    }
}

/// Serves documents held in memory as JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    documents: HashMap<String, String>,
}

impl MemoryProvider {
    /// Create a provider with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register JSON text under `location`.
    pub fn with_document(mut self, location: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(location, json);
        self
    }

    /// Register or replace JSON text under `location`.
    pub fn insert(&mut self, location: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(location.into(), json.into());
    }

    /// Forget the document at `location`.
    pub fn remove(&mut self, location: &str) {
        self.documents.remove(location);
    }
}

impl ContentProvider for MemoryProvider {
    fn fetch(&self, location: &str) -> Result<SceneDocument, ProviderError> {
        let src = self
            .documents
            .get(location)
            .ok_or_else(|| ProviderError::NotFound(location.to_string()))?;
        SceneDocument::from_json(src).map_err(|error| ProviderError::Document {
            location: location.to_string(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_provider_serves_documents() {
        let provider =
            MemoryProvider::new().with_document("base.json", r#"{"start": {"title": "Start"}}"#);
        let doc = provider.fetch("base.json").unwrap();
        assert_eq!(doc.scenes()["start"].title, "Start");
    }

    #[test]
    fn memory_provider_missing_document() {
        let err = MemoryProvider::new().fetch("nope.json").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(loc) if loc == "nope.json"));
    }

    #[test]
    fn memory_provider_bad_json() {
        let provider = MemoryProvider::new().with_document("bad.json", "{");
        assert!(matches!(
            provider.fetch("bad.json"),
            Err(ProviderError::Document { .. })
        ));
    }

    #[test]
    fn dir_provider_reads_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("scenes")).unwrap();
        std::fs::write(
            dir.path().join("scenes/extra.json"),
            r#"{"vault": {"title": "Vault"}}"#,
        )
        .unwrap();

        let provider = DirProvider::new(dir.path());
        let doc = provider.fetch("scenes/extra.json").unwrap();
        assert!(doc.scenes().contains_key("vault"));
        assert!(matches!(
            provider.fetch("scenes/missing.json"),
            Err(ProviderError::NotFound(_))
        ));
    }
}
