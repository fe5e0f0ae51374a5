//! Solution memory: `memory/solutions.yaml`.
//!
//! A YAML mapping from problem digest to [`SolutionRecord`]. The whole store
//! is read for every operation and rewritten on every change, keeping the
//! file the single source of truth. Insertion order is preserved, which makes
//! equal-score recall results come back in the order they were remembered.

use crate::similarity::{extract_keywords, jaccard_similarity, problem_key};
use chrono::{DateTime, Utc};
use codebrain_core::error::StoreError;
use codebrain_core::resource;
use codebrain_core::solution::{SolutionMatch, SolutionRecord};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Digest → record, in insertion order.
pub type SolutionTable = IndexMap<String, SolutionRecord>;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_KEY_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct SolutionMemory {
    path: PathBuf,
    threshold: f64,
    key_length: usize,
}

impl SolutionMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            key_length: DEFAULT_KEY_LENGTH,
        }
    }

    /// Override the recall threshold (matches must score strictly above it).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The storage key for a problem.
    pub fn key_for(&self, problem: &str) -> String {
        problem_key(problem, self.key_length)
    }

    /// Read the whole store. A missing file is an empty store.
    pub async fn load(&self) -> Result<SolutionTable, StoreError> {
        Ok(resource::load_yaml(&self.path).await?.unwrap_or_default())
    }

    async fn save(&self, table: &SolutionTable) -> Result<(), StoreError> {
        resource::save_yaml(&self.path, table).await
    }

    /// Store a solution under the problem's digest and persist.
    ///
    /// A record already stored under the same digest is replaced, even when
    /// it was for a different problem text.
    pub async fn remember(
        &self,
        problem: &str,
        solution: &str,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let problem = problem.trim();
        let solution = solution.trim();
        if solution.is_empty() {
            return Err(StoreError::Invalid("solution must not be empty".into()));
        }
        let key = self.key_for(problem);
        if key.is_empty() {
            return Err(StoreError::Invalid(
                "problem must contain at least one letter or digit".into(),
            ));
        }

        let mut table = self.load().await?;
        if let Some(previous) = table.get(&key) {
            if previous.problem != problem {
                warn!(%key, previous = %previous.problem, "Overwriting solution stored under the same digest");
            }
        }
        table.insert(
            key.clone(),
            SolutionRecord {
                problem: problem.to_string(),
                solution: solution.to_string(),
                timestamp: now,
                times_used: 0,
            },
        );
        self.save(&table).await?;

        info!(%key, total = table.len(), "Solution remembered");
        Ok(key)
    }

    /// Find stored solutions similar to `problem`, best first.
    ///
    /// A stored record scores the better of two comparisons: against its
    /// problem's keywords, and against its problem and solution keywords
    /// together. Only scores strictly above the threshold are kept; equal
    /// scores keep store order.
    pub async fn recall(&self, problem: &str) -> Result<Vec<SolutionMatch>, StoreError> {
        let table = self.load().await?;
        let query = extract_keywords(problem);

        let mut matches: Vec<SolutionMatch> = table
            .iter()
            .filter_map(|(key, record)| {
                let similarity = record_similarity(&query, record);
                (similarity > self.threshold).then(|| SolutionMatch {
                    key: key.clone(),
                    record: record.clone(),
                    similarity,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(stored = table.len(), matched = matches.len(), "Solution recall");
        Ok(matches)
    }

    /// Record one reuse of a solution. Returns the new count, or `None` if
    /// no record has that key.
    pub async fn mark_used(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let mut table = self.load().await?;
        let Some(record) = table.get_mut(key) else {
            return Ok(None);
        };
        record.times_used = record.times_used.saturating_add(1);
        let count = record.times_used;
        self.save(&table).await?;
        Ok(Some(count))
    }
}

fn record_similarity(query: &HashSet<String>, record: &SolutionRecord) -> f64 {
    let problem = extract_keywords(&record.problem);
    let by_problem = jaccard_similarity(query, &problem);

    let mut combined = problem;
    combined.extend(extract_keywords(&record.solution));
    by_problem.max(jaccard_similarity(query, &combined))
}
