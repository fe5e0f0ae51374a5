//! On-disk layout of a project brain.
//!
//! ```text
//! <root>/
//!   config.toml
//!   memory/        context.yaml changelog.md todos.md decisions.log solutions.yaml
//!   vendor-specs/  manifest.yaml <key>-spec.yaml
//!   patterns/      code-style.yaml
//! ```

use std::path::{Path, PathBuf};

pub const CONTEXT_FILE: &str = "context.yaml";
pub const CHANGELOG_FILE: &str = "changelog.md";
pub const TODOS_FILE: &str = "todos.md";
pub const DECISIONS_FILE: &str = "decisions.log";
pub const SOLUTIONS_FILE: &str = "solutions.yaml";
pub const MANIFEST_FILE: &str = "manifest.yaml";
pub const PATTERNS_FILE: &str = "code-style.yaml";

/// Resolves every brain resource path from a single root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainLayout {
    root: PathBuf,
}

impl BrainLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root.join("memory")
    }

    pub fn context_path(&self) -> PathBuf {
        self.memory_dir().join(CONTEXT_FILE)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.memory_dir().join(CHANGELOG_FILE)
    }

    pub fn todos_path(&self) -> PathBuf {
        self.memory_dir().join(TODOS_FILE)
    }

    pub fn decisions_path(&self) -> PathBuf {
        self.memory_dir().join(DECISIONS_FILE)
    }

    pub fn solutions_path(&self) -> PathBuf {
        self.memory_dir().join(SOLUTIONS_FILE)
    }

    pub fn vendor_dir(&self) -> PathBuf {
        self.root.join("vendor-specs")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.vendor_dir().join(MANIFEST_FILE)
    }

    /// Payload file for one vendor source.
    pub fn spec_path(&self, key: &str) -> PathBuf {
        self.vendor_dir().join(format!("{key}-spec.yaml"))
    }

    pub fn patterns_dir(&self) -> PathBuf {
        self.root.join("patterns")
    }

    pub fn patterns_path(&self) -> PathBuf {
        self.patterns_dir().join(PATTERNS_FILE)
    }

    /// Directories created on first-time initialization.
    pub fn directories(&self) -> [PathBuf; 3] {
        [self.memory_dir(), self.vendor_dir(), self.patterns_dir()]
    }
}
