//! Pattern store: `patterns/code-style.yaml`.

use chrono::{DateTime, Utc};
use codebrain_core::error::StoreError;
use codebrain_core::pattern::{PatternDocument, PatternEntry};
use codebrain_core::resource;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PatternStore {
    path: PathBuf,
}

impl PatternStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is an empty, undetected document.
    pub async fn load(&self) -> Result<PatternDocument, StoreError> {
        Ok(resource::load_yaml(&self.path).await?.unwrap_or_default())
    }

    pub async fn save(&self, doc: &PatternDocument) -> Result<(), StoreError> {
        resource::save_yaml(&self.path, doc).await
    }

    /// Append a pattern to a category and persist.
    /// Returns the number of patterns now in that category.
    pub async fn learn(
        &self,
        category: &str,
        pattern: &str,
        example: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let category = category.trim();
        let pattern = pattern.trim();
        if category.is_empty() || pattern.is_empty() {
            return Err(StoreError::Invalid(
                "pattern category and text must not be empty".into(),
            ));
        }

        let mut doc = self.load().await?;
        doc.patterns
            .entry(category.to_string())
            .or_default()
            .push(PatternEntry {
                pattern: pattern.to_string(),
                example: example.unwrap_or_default().trim().to_string(),
                learned: now,
            });
        doc.detected = true;
        self.save(&doc).await?;

        let count = doc.count(category);
        info!(%category, count, "Pattern learned");
        Ok(count)
    }
}
