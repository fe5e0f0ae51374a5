//! Task records: the project's TODO checklist.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority. `Normal` is implied when the checklist line carries no tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            other => Err(StoreError::Invalid(format!(
                "unknown priority '{other}' (expected high, normal or low)"
            ))),
        }
    }
}

/// A single checklist item.
///
/// `id` and `created` are session metadata: the checklist file does not
/// persist them, so tasks parsed from disk are numbered in file order and
/// have no creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Task {
    /// The (text, completed, priority) triple the checklist file preserves.
    pub fn triple(&self) -> (&str, bool, Priority) {
        (&self.text, self.completed, self.priority)
    }

    /// Normalize and check task text before it is stored.
    ///
    /// Text must be non-empty, fit on one line, and not end in a bracketed
    /// priority tag (the checklist reader would take it for the priority).
    pub fn validate_text(text: &str) -> Result<String, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Invalid("task text must not be empty".into()));
        }
        if text.contains(['\n', '\r']) {
            return Err(StoreError::Invalid("task text must be a single line".into()));
        }
        if let (_, Some(priority)) = split_priority_tag(text) {
            return Err(StoreError::Invalid(format!(
                "task text must not end with a priority tag [{priority}]"
            )));
        }
        Ok(text.to_string())
    }
}

/// Split a trailing `[priority]` tag off checklist text.
///
/// Brackets that do not hold a priority (`arr[0]`) are left in the text, and
/// so is a tag with nothing in front of it.
pub fn split_priority_tag(text: &str) -> (&str, Option<Priority>) {
    let text = text.trim_end();
    let Some(inner) = text.strip_suffix(']') else {
        return (text, None);
    };
    let Some(open) = inner.rfind('[') else {
        return (text, None);
    };
    let body = inner[..open].trim_end();
    match inner[open + 1..].parse::<Priority>() {
        Ok(priority) if !body.is_empty() => (body, Some(priority)),
        _ => (text, None),
    }
}
