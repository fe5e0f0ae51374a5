//! Checklist: the TODO list kept as markdown checkboxes.
//!
//! ```text
//! # Project TODOs
//!
//! ## Current Sprint
//! - [ ] write tests
//! - [x] setup repo [high]
//! ```
//!
//! The file is always rewritten in full from the in-memory list. Task ids and
//! creation times are not written, so a reload renumbers tasks in file order.

use chrono::{DateTime, Utc};
use codebrain_core::error::StoreError;
use codebrain_core::resource;
use codebrain_core::task::{Priority, Task, split_priority_tag};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

const CHECKLIST_HEADER: &str = "# Project TODOs\n\n## Current Sprint\n";

static CHECKBOX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- \[([ xX])\] (.+)$").expect("checkbox pattern is valid")
});

/// Render tasks as checklist text, in sequence order.
pub fn render_checklist(tasks: &[Task]) -> String {
    let mut content = String::from(CHECKLIST_HEADER);
    for task in tasks {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        content.push_str(&format!("- {checkbox} {}", task.text));
        if task.priority != Priority::Normal {
            content.push_str(&format!(" [{}]", task.priority));
        }
        content.push('\n');
    }
    content
}

/// Parse checklist text. Lines that are not checkboxes are ignored.
/// Parsed tasks are numbered from 1 in file order.
pub fn parse_checklist(text: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    for line in text.lines() {
        let Some(caps) = CHECKBOX_LINE.captures(line.trim_end()) else {
            continue;
        };
        let (body, priority) = split_priority_tag(&caps[2]);
        let body = body.trim();
        if body.is_empty() {
            continue;
        }
        tasks.push(Task {
            id: tasks.len() as u64 + 1,
            text: body.to_string(),
            completed: caps[1].eq_ignore_ascii_case("x"),
            priority: priority.unwrap_or_default(),
            created: None,
        });
    }
    tasks
}

/// A checklist file plus its in-memory task list.
#[derive(Debug)]
pub struct Checklist {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl Checklist {
    /// Load a checklist. A missing file is an empty list.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = match resource::read_optional(&path).await? {
            Some(text) => parse_checklist(&text),
            None => Vec::new(),
        };
        debug!(path = %path.display(), count = tasks.len(), "Checklist loaded");
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(Self {
            path,
            tasks,
            next_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Add a task at the end of the list and persist.
    pub async fn add(
        &mut self,
        text: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        let text = Task::validate_text(text)?;
        let task = Task {
            id: self.next_id,
            text,
            completed: false,
            priority,
            created: Some(now),
        };
        self.tasks.push(task.clone());
        self.next_id += 1;
        if let Err(e) = self.save().await {
            self.tasks.pop();
            self.next_id -= 1;
            return Err(e);
        }
        info!(id = task.id, priority = %task.priority, "Task added");
        Ok(task)
    }

    /// Mark a task done and persist. Returns `false` if it was already done.
    pub async fn complete(&mut self, id: u64) -> Result<bool, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::Invalid(format!("no task with id {id}")))?;
        if task.completed {
            return Ok(false);
        }
        task.completed = true;
        if let Err(e) = self.save().await {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = false;
            }
            return Err(e);
        }
        Ok(true)
    }

    /// Replace the whole list and persist. Ids are reassigned in order.
    pub async fn replace(&mut self, tasks: Vec<Task>) -> Result<(), StoreError> {
        let mut validated = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.into_iter().enumerate() {
            validated.push(Task {
                id: index as u64 + 1,
                text: Task::validate_text(&task.text)?,
                ..task
            });
        }
        let previous = std::mem::replace(&mut self.tasks, validated);
        if let Err(e) = self.save().await {
            self.tasks = previous;
            return Err(e);
        }
        self.next_id = self.tasks.len() as u64 + 1;
        Ok(())
    }

    async fn save(&self) -> Result<(), StoreError> {
        resource::write_atomic(&self.path, &render_checklist(&self.tasks)).await
    }
}
