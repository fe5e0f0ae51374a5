//! The brain: one project's memory, opened once per invocation.
//!
//! `Brain` owns a repository per resource and routes every operation to the
//! one responsible for it. Nothing is cached across invocations: each
//! operation finishes its reads and writes before returning.

use crate::checklist::Checklist;
use crate::context_store::ContextStore;
use crate::journal::Journal;
use crate::patterns::PatternStore;
use crate::solutions::SolutionMemory;
use chrono::{DateTime, Utc};
use codebrain_config::{BrainConfig, BrainLayout};
use codebrain_core::context::ContextDocument;
use codebrain_core::error::{Result, StoreError};
use codebrain_core::journal::{ChangeRecord, Decision, LogEntry};
use codebrain_core::resource;
use codebrain_core::solution::SolutionMatch;
use codebrain_core::task::{Priority, Task};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CHECKPOINT_MESSAGE: &str = "Auto checkpoint";

const CHANGELOG_SEED: &str =
    "# Project Changelog\n\n## Initialization\n- Project initialized with codebrain\n";
const TODOS_SEED: &str =
    "# Project TODOs\n\n## Current Sprint\n- [ ] Complete project setup\n- [ ] Define core features\n";
const DECISIONS_SEED: &str = "# Architectural Decisions\n\n";
const PATTERNS_SEED: &str = "patterns: {}\ndetected: false\n";

/// What `Brain::init` wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Whether the context document was (re)written.
    pub context_written: bool,
    /// Seed files created because they did not exist yet.
    pub seeded: Vec<PathBuf>,
}

/// Snapshot for `codebrain status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainStatus {
    /// When the previous session was active (before this one opened).
    pub last_active: Option<DateTime<Utc>>,
    pub current_focus: Option<String>,
    pub open_tasks: usize,
    /// Changelog entries stamped on the current UTC day.
    pub changes_today: usize,
    /// Categories with at least one learned pattern.
    pub pattern_categories: usize,
}

pub struct Brain {
    layout: BrainLayout,
    config: BrainConfig,
    context_store: ContextStore,
    context: ContextDocument,
    changelog: Journal,
    decisions: Journal,
    todos: Checklist,
    solutions: SolutionMemory,
    patterns: PatternStore,
    previous_active: Option<DateTime<Utc>>,
}

impl Brain {
    /// First-time setup: create the directory tree, write the context
    /// skeleton and seed every other resource that does not exist yet.
    ///
    /// An existing context is only replaced when `force` is set. Existing
    /// logs, checklists and stores are never touched.
    pub async fn init(
        layout: &BrainLayout,
        project_name: &str,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<InitReport> {
        for dir in layout.directories() {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| StoreError::io(&dir, e))?;
        }

        let skeleton = ContextDocument::skeleton(project_name, now.date_naive());
        let context_written = ContextStore::new(layout.context_path())
            .initialize(&skeleton, force)
            .await?;

        let seeds = [
            (layout.changelog_path(), CHANGELOG_SEED.to_string()),
            (layout.todos_path(), TODOS_SEED.to_string()),
            (layout.decisions_path(), DECISIONS_SEED.to_string()),
            (layout.patterns_path(), PATTERNS_SEED.to_string()),
            (layout.config_path(), BrainConfig::default_toml()),
        ];
        let mut seeded = Vec::new();
        for (path, content) in seeds {
            if seed(&path, &content).await? {
                seeded.push(path);
            }
        }

        info!(
            root = %layout.root().display(),
            project = %project_name,
            context_written,
            seeded = seeded.len(),
            "Brain initialized"
        );
        Ok(InitReport {
            context_written,
            seeded,
        })
    }

    /// Open an initialized brain.
    ///
    /// Fails with `StoreError::Missing` when the project has no context yet.
    /// `brain_meta.last_active` is stamped with `now` in memory and persisted
    /// with the next context write.
    pub async fn open(layout: BrainLayout, config: BrainConfig, now: DateTime<Utc>) -> Result<Self> {
        let context_store = ContextStore::new(layout.context_path());
        let mut context = context_store.load().await?;
        let previous_active = context.brain_meta.last_active.replace(now);

        let changelog = Journal::open(layout.changelog_path()).await?;
        let decisions = Journal::open(layout.decisions_path()).await?;
        let todos = Checklist::open(layout.todos_path()).await?;
        let solutions = SolutionMemory::new(layout.solutions_path())
            .with_threshold(config.memory.similarity_threshold)
            .with_key_length(config.memory.key_length);
        let patterns = PatternStore::new(layout.patterns_path());

        debug!(
            root = %layout.root().display(),
            changes = changelog.len(),
            decisions = decisions.len(),
            tasks = todos.tasks().len(),
            "Brain opened"
        );

        Ok(Self {
            layout,
            config,
            context_store,
            context,
            changelog,
            decisions,
            todos,
            solutions,
            patterns,
            previous_active,
        })
    }

    pub fn layout(&self) -> &BrainLayout {
        &self.layout
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn context(&self) -> &ContextDocument {
        &self.context
    }

    pub fn changelog(&self) -> &[LogEntry] {
        self.changelog.entries()
    }

    pub fn decisions(&self) -> &[LogEntry] {
        self.decisions.entries()
    }

    pub fn tasks(&self) -> &[Task] {
        self.todos.tasks()
    }

    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.todos.open_tasks()
    }

    /// Deep-merge a patch into the context and persist it.
    pub async fn update_context(&mut self, patch: &Value) -> Result<()> {
        self.context_store.update(&mut self.context, patch).await?;
        Ok(())
    }

    /// Stamp the checkpoint time, persist the context and log a
    /// `checkpoint` change carrying the current focus.
    pub async fn checkpoint(&mut self, message: Option<&str>, now: DateTime<Utc>) -> Result<LogEntry> {
        self.context.brain_meta.last_checkpoint = Some(now);
        self.context_store.save(&self.context).await?;

        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_CHECKPOINT_MESSAGE);
        let mut record = ChangeRecord::new("checkpoint", message);
        record.state = self.context.working_on().map(str::to_string);

        let entry = self.changelog.append(&record, now).await?;
        info!(%message, "Checkpoint saved");
        Ok(entry)
    }

    pub async fn log_change(&mut self, kind: &str, message: &str, now: DateTime<Utc>) -> Result<LogEntry> {
        let kind = kind.trim();
        if kind.is_empty() || message.trim().is_empty() {
            return Err(StoreError::Invalid("change kind and message must not be empty".into()).into());
        }
        Ok(self.changelog.append(&ChangeRecord::new(kind, message), now).await?)
    }

    pub async fn add_task(&mut self, text: &str, priority: Priority, now: DateTime<Utc>) -> Result<Task> {
        Ok(self.todos.add(text, priority, now).await?)
    }

    pub async fn complete_task(&mut self, id: u64) -> Result<bool> {
        Ok(self.todos.complete(id).await?)
    }

    /// Rewrite the whole checklist. Tasks are renumbered from 1.
    pub async fn replace_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        Ok(self.todos.replace(tasks).await?)
    }

    /// Append a decision to the decision log. Alternatives are written as
    /// one comma-separated line, so an alternative may not contain a comma.
    pub async fn add_decision(&mut self, decision: &Decision, now: DateTime<Utc>) -> Result<LogEntry> {
        if decision.title.trim().is_empty() {
            return Err(StoreError::Invalid("decision title must not be empty".into()).into());
        }
        if let Some(alternative) = decision.alternatives.iter().find(|a| a.contains(',')) {
            return Err(StoreError::Invalid(format!(
                "alternative must not contain a comma: {alternative:?}"
            ))
            .into());
        }
        let entry = self.decisions.append(decision, now).await?;
        info!(title = %decision.title, "Decision recorded");
        Ok(entry)
    }

    /// Learn a pattern and mirror the category's count into
    /// `patterns_learned` in the context.
    pub async fn learn_pattern(
        &mut self,
        category: &str,
        pattern: &str,
        example: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let count = self.patterns.learn(category, pattern, example, now).await?;

        let mut counts = Mapping::new();
        counts.insert(Value::from(category.trim()), Value::from(count as u64));
        let mut patch = Mapping::new();
        patch.insert(Value::from("patterns_learned"), Value::Mapping(counts));
        self.update_context(&Value::Mapping(patch)).await?;

        Ok(count)
    }

    pub async fn remember_solution(&self, problem: &str, solution: &str, now: DateTime<Utc>) -> Result<String> {
        Ok(self.solutions.remember(problem, solution, now).await?)
    }

    pub async fn find_similar_solutions(&self, problem: &str) -> Result<Vec<SolutionMatch>> {
        Ok(self.solutions.recall(problem).await?)
    }

    pub async fn mark_solution_used(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.solutions.mark_used(key).await?)
    }

    pub fn status(&self, now: DateTime<Utc>) -> BrainStatus {
        let today = now.date_naive();
        BrainStatus {
            last_active: self.previous_active,
            current_focus: self.context.working_on().map(str::to_string),
            open_tasks: self.todos.open_tasks().count(),
            changes_today: self
                .changelog
                .entries()
                .iter()
                .filter_map(LogEntry::recorded_at)
                .filter(|at| at.date_naive() == today)
                .count(),
            pattern_categories: self.context.patterns_learned.len(),
        }
    }
}

/// Write `content` unless the file already exists. Returns whether it wrote.
async fn seed(path: &Path, content: &str) -> Result<bool> {
    if resource::read_optional(path).await?.is_some() {
        return Ok(false);
    }
    resource::write_atomic(path, content).await?;
    Ok(true)
}
