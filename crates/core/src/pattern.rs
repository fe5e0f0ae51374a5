//! Learned code-style patterns.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub pattern: String,
    #[serde(default)]
    pub example: String,
    pub learned: DateTime<Utc>,
}

/// The `patterns/code-style.yaml` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    /// Category → patterns in the order they were learned.
    #[serde(default)]
    pub patterns: IndexMap<String, Vec<PatternEntry>>,

    /// Set once any pattern has been learned.
    #[serde(default)]
    pub detected: bool,
}

impl PatternDocument {
    pub fn count(&self, category: &str) -> usize {
        self.patterns.get(category).map_or(0, Vec::len)
    }
}
