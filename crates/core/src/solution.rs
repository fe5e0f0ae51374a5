//! Solution memory records: previously solved problems.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored problem → solution pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub problem: String,
    pub solution: String,
    pub timestamp: DateTime<Utc>,
    /// Incremented by callers when they reuse the solution.
    #[serde(default, alias = "timesUsed")]
    pub times_used: u32,
}

/// A recalled solution with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionMatch {
    pub key: String,
    #[serde(flatten)]
    pub record: SolutionRecord,
    pub similarity: f64,
}
