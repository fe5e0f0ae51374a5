//! Journal: append-only markdown logs (changelog, decisions).
//!
//! The markdown file is the source of truth: entries are appended as
//! `## <timestamp>` blocks and re-derived by splitting on that same marker.
//! Nothing in a journal is ever rewritten or removed.
//!
//! ```text
//! # Project Changelog            <- preamble, not an entry
//!
//! ## 2026-10-19T08:15:30.123Z
//! - **Type**: checkpoint
//! - **Message**: Session started
//! ```

use chrono::{DateTime, Utc};
use codebrain_core::error::StoreError;
use codebrain_core::journal::{LogEntry, LogRecord, format_timestamp};
use codebrain_core::resource;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marks the start of an entry. Shared by [`render_entry`] and [`parse_log`].
pub const ENTRY_MARKER: &str = "## ";

/// Render one entry block, ready to be appended.
pub fn render_entry(timestamp: &str, record: &dyn LogRecord) -> String {
    let mut block = format!("\n{ENTRY_MARKER}{timestamp}\n");
    for line in record.field_lines() {
        block.push_str(&line);
        block.push('\n');
    }
    block
}

/// Split log text into entries.
///
/// Each block's first line is its timestamp/identifier and the rest is its
/// content. Text before the first marker is a preamble and blocks that are
/// empty after trimming are dropped.
pub fn parse_log(text: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix(ENTRY_MARKER) {
            if let Some(block) = current.take() {
                push_block(&mut entries, block);
            }
            current = Some((heading.trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some(block) = current {
        push_block(&mut entries, block);
    }

    entries
}

fn push_block(entries: &mut Vec<LogEntry>, (heading, body): (String, Vec<&str>)) {
    let content = body.join("\n").trim().to_string();
    if heading.is_empty() && content.is_empty() {
        return;
    }
    entries.push(LogEntry {
        timestamp: heading,
        content,
    });
}

/// A journal file plus the entries parsed from it.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    entries: Vec<LogEntry>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Journal {
    /// Load a journal. A missing file is an empty journal.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match resource::read_optional(&path).await? {
            Some(text) => parse_log(&text),
            None => Vec::new(),
        };
        let last_stamp = entries.iter().filter_map(LogEntry::recorded_at).max();
        debug!(path = %path.display(), count = entries.len(), "Journal loaded");
        Ok(Self {
            path,
            entries,
            last_stamp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a record stamped at `now`.
    ///
    /// Stamps never go backwards: if the clock reads earlier than the newest
    /// entry, the newest entry's stamp is reused. The block is synced to disk
    /// before this returns.
    pub async fn append(
        &mut self,
        record: &dyn LogRecord,
        now: DateTime<Utc>,
    ) -> Result<LogEntry, StoreError> {
        let stamp = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        let timestamp = format_timestamp(stamp);
        let block = render_entry(&timestamp, record);

        resource::append(&self.path, &block).await?;

        let entry = LogEntry {
            timestamp,
            content: record.field_lines().join("\n"),
        };
        self.entries.push(entry.clone());
        self.last_stamp = Some(stamp);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use codebrain_core::journal::{ChangeRecord, Decision};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, hour, 0, 0).unwrap()
    }

    #[test]
    fn parse_skips_preamble_and_empty_blocks() {
        let text = "# Project Changelog\n\n## Initialization\n- Project initialized\n\n## \n\n## 2026-10-19T08:00:00.000Z\n- **Type**: note\n";
        let entries = parse_log(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, "Initialization");
        assert_eq!(entries[0].content, "- Project initialized");
        assert_eq!(entries[1].field("Type"), Some("note"));
    }

    #[test]
    fn deeper_headings_stay_inside_an_entry() {
        let text = "## 2026-10-19T08:00:00.000Z\n### Details\nmore\n";
        let entries = parse_log(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "### Details\nmore");
    }

    #[test]
    fn empty_text_parses_to_nothing() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("# Architectural Decisions\n\n").is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_journal() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("changelog.md")).await.unwrap();
        assert!(journal.is_empty());
    }

    #[tokio::test]
    async fn appended_entries_parse_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changelog.md");

        let mut journal = Journal::open(&path).await.unwrap();
        for (i, msg) in ["first", "second", "third"].iter().enumerate() {
            journal
                .append(&ChangeRecord::new("note", *msg), at(8 + i as u32))
                .await
                .unwrap();
        }

        let reloaded = Journal::open(&path).await.unwrap();
        assert_eq!(reloaded.len(), 3);
        let messages: Vec<_> = reloaded
            .entries()
            .iter()
            .map(|e| e.field("Message").unwrap())
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(reloaded.entries(), journal.entries());
    }

    #[tokio::test]
    async fn stamps_never_go_backwards() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(dir.path().join("decisions.log")).await.unwrap();

        let decision = Decision {
            title: "Use Postgres".into(),
            reasoning: "Relational data".into(),
            alternatives: vec!["MongoDB".into()],
        };
        let first = journal.append(&decision, at(10)).await.unwrap();
        let second = journal
            .append(&decision, at(10) - Duration::minutes(5))
            .await
            .unwrap();

        assert_eq!(first.timestamp, second.timestamp);
        assert_eq!(second.field("Alternatives"), Some("MongoDB"));
    }

    #[tokio::test]
    async fn appends_after_existing_preamble() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.log");
        std::fs::write(&path, "# Architectural Decisions\n\n").unwrap();

        let mut journal = Journal::open(&path).await.unwrap();
        journal
            .append(&ChangeRecord::new("note", "hello"), at(9))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Architectural Decisions"));
        assert!(text.contains("\n## 2026-10-19T09:00:00.000Z\n- **Type**: note\n"));
        assert_eq!(parse_log(&text).len(), 1);
    }
}
