//! Vendor spec sources: external framework documentation tracked locally.
//!
//! A source is a documentation target (Next.js, React, …) whose generated
//! spec document may go stale. The registry itself lives in
//! `codebrain-vendor`; this module defines the record types and the
//! [`SpecGenerator`] seam that produces spec payloads.

use crate::error::VendorError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered vendor spec source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSource {
    /// Display name
    pub name: String,

    /// Documentation reference URL
    #[serde(alias = "docUrl")]
    pub doc_url: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Set when project inspection finds the dependency in use
    #[serde(default)]
    pub detected: bool,

    /// When the spec document was last regenerated
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl VendorSource {
    pub fn new(name: impl Into<String>, doc_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc_url: doc_url.into(),
            enabled: true,
            detected: false,
            last_updated: None,
        }
    }

    /// Whether this source needs a refresh at `now`.
    ///
    /// Disabled sources never do. Enabled sources do when they were never
    /// updated or when more than `threshold` has elapsed.
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: chrono::Duration) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_updated {
            None => true,
            Some(updated) => now - updated > threshold,
        }
    }
}

/// The subset of a `package.json` used for stack detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,

    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
}

/// Outcome of a batch sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub key: String,
    pub error: String,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Produces the spec payload for a source.
///
/// The default implementation is a fixed template lookup; fetching real
/// documentation would be another implementation of this trait.
#[async_trait]
pub trait SpecGenerator: Send + Sync {
    /// The generator name (e.g., "template").
    fn name(&self) -> &str;

    /// Build the spec document for `key`.
    async fn generate(
        &self,
        key: &str,
        source: &VendorSource,
        now: DateTime<Utc>,
    ) -> std::result::Result<serde_json::Value, VendorError>;
}
