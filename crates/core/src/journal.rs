//! Journal entries: the changelog and the decision log.
//!
//! Both logs are append-only markdown. Each entry is a `## <timestamp>`
//! heading followed by `**Field**: value` lines. The record types here know
//! how to describe themselves as field lines; the codec that reads and writes
//! the file lives in `codebrain-memory`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Format a timestamp the way journal headings carry it
/// (`2026-10-19T08:15:30.123Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// An entry re-derived from the on-disk log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// First line of the block. Usually an ISO-8601 timestamp, but any
    /// hand-written heading (e.g. `Initialization`) is kept as-is.
    pub timestamp: String,

    /// Everything below the heading line.
    pub content: String,
}

impl LogEntry {
    /// The heading parsed as a timestamp, if it is one.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.timestamp.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Value of a `**Name**: value` line (with or without a list bullet).
    pub fn field(&self, name: &str) -> Option<&str> {
        let label = format!("**{name}**:");
        self.content.lines().find_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("- ").unwrap_or(line);
            line.strip_prefix(label.as_str()).map(str::trim)
        })
    }
}

/// Something that can be appended to a journal.
pub trait LogRecord {
    /// The lines written below the entry heading, without trailing newlines.
    fn field_lines(&self) -> Vec<String>;
}

/// A changelog entry (`checkpoint`, `note`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: String,
    pub message: String,
    /// Current focus at the time of the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ChangeRecord {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            state: None,
        }
    }
}

impl LogRecord for ChangeRecord {
    fn field_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("- **Type**: {}", one_line(&self.kind)),
            format!("- **Message**: {}", one_line(&self.message)),
        ];
        if let Some(state) = &self.state {
            lines.push(format!("- **State**: {}", one_line(state)));
        }
        lines
    }
}

/// An architectural decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub title: String,
    pub reasoning: String,
    /// Rendered comma-separated on one line.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl LogRecord for Decision {
    fn field_lines(&self) -> Vec<String> {
        let alternatives: Vec<String> = self.alternatives.iter().map(|a| one_line(a)).collect();
        vec![
            format!("**Decision**: {}", one_line(&self.title)),
            format!("**Reasoning**: {}", one_line(&self.reasoning)),
            format!("**Alternatives**: {}", alternatives.join(", ")),
        ]
    }
}

/// Fold a value onto a single line so it cannot break the block structure.
fn one_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_has_millisecond_precision() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap();
        assert_eq!(format_timestamp(at), "2026-10-19T08:15:30.000Z");
    }

    #[test]
    fn change_record_lines() {
        let mut record = ChangeRecord::new("checkpoint", "Session\nstarted");
        record.state = Some("auth flow".into());
        assert_eq!(
            record.field_lines(),
            vec![
                "- **Type**: checkpoint",
                "- **Message**: Session started",
                "- **State**: auth flow",
            ]
        );
    }

    #[test]
    fn decision_lines_join_alternatives() {
        let decision = Decision {
            title: "Use Postgres".into(),
            reasoning: "Relational data".into(),
            alternatives: vec!["MongoDB".into(), "SQLite".into()],
        };
        assert_eq!(decision.field_lines()[2], "**Alternatives**: MongoDB, SQLite");
    }

    #[test]
    fn entry_fields_are_readable() {
        let entry = LogEntry {
            timestamp: "2026-10-19T08:15:30.000Z".into(),
            content: "- **Type**: checkpoint\n- **Message**: Auto checkpoint".into(),
        };
        assert_eq!(entry.field("Type"), Some("checkpoint"));
        assert_eq!(entry.field("Message"), Some("Auto checkpoint"));
        assert_eq!(entry.field("State"), None);
        assert!(entry.recorded_at().is_some());
    }

    #[test]
    fn free_form_heading_has_no_timestamp() {
        let entry = LogEntry {
            timestamp: "Initialization".into(),
            content: "- Project initialized".into(),
        };
        assert!(entry.recorded_at().is_none());
    }
}
