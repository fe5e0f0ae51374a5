//! Context store: `memory/context.yaml`.

use codebrain_core::context::ContextDocument;
use codebrain_core::error::StoreError;
use codebrain_core::resource;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads, saves and patches the context document.
#[derive(Debug, Clone)]
pub struct ContextStore {
    path: PathBuf,
}

impl ContextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// A missing file is `StoreError::Missing`: an uninitialized project must
    /// not silently run with an empty context. Unparseable content, or a
    /// document without `brain_meta`/`current_state`, is `StoreError::Corrupt`.
    pub async fn load(&self) -> Result<ContextDocument, StoreError> {
        let content = resource::read_required(&self.path).await?;
        let doc: ContextDocument =
            serde_yaml::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))?;
        debug!(path = %self.path.display(), project = %doc.project.name, "Context loaded");
        Ok(doc)
    }

    /// Overwrite the document atomically.
    pub async fn save(&self, doc: &ContextDocument) -> Result<(), StoreError> {
        resource::save_yaml(&self.path, doc).await
    }

    /// First-time entry point: write `doc` unless a context already exists.
    /// Returns whether the file was written.
    pub async fn initialize(&self, doc: &ContextDocument, overwrite: bool) -> Result<bool, StoreError> {
        if !overwrite && resource::read_optional(&self.path).await?.is_some() {
            debug!(path = %self.path.display(), "Context already initialized");
            return Ok(false);
        }
        self.save(doc).await?;
        info!(path = %self.path.display(), "Context initialized");
        Ok(true)
    }

    /// Deep-merge `patch` into `doc` and persist the result.
    ///
    /// The patch must be a mapping, and the merged document must still fit
    /// the typed structure; otherwise nothing changes and the patch is
    /// rejected as invalid.
    pub async fn update(&self, doc: &mut ContextDocument, patch: &Value) -> Result<(), StoreError> {
        if !patch.is_mapping() {
            return Err(StoreError::Invalid("context patch must be a mapping".into()));
        }
        let merged = doc
            .merged(patch)
            .map_err(|e| StoreError::Invalid(format!("context patch rejected: {e}")))?;
        self.save(&merged).await?;
        *doc = merged;
        Ok(())
    }
}
