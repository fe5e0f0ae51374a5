//! # codebrain core
//!
//! Domain types, traits, and error definitions for the codebrain project
//! memory. Stores and engines live in their own crates and build on the
//! record types and resource primitives defined here.
//!
//! ## Layout
//!
//! - `context`: the project context document and deep-merge
//! - `journal`: changelog / decision log records
//! - `task`: checklist items and priorities
//! - `solution`: remembered problem → solution pairs
//! - `pattern`: learned code-style patterns
//! - `vendor`: vendor spec sources and the spec generator seam
//! - `resource`: file I/O primitives (atomic replace, durable append)

pub mod error;
pub mod context;
pub mod journal;
pub mod task;
pub mod solution;
pub mod pattern;
pub mod vendor;
pub mod resource;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, StoreError, VendorError};
pub use context::{ContextDocument, deep_merge};
pub use journal::{ChangeRecord, Decision, LogEntry, LogRecord};
pub use task::{Priority, Task};
pub use solution::{SolutionMatch, SolutionRecord};
pub use pattern::{PatternDocument, PatternEntry};
pub use vendor::{DependencyManifest, SpecGenerator, SyncFailure, SyncReport, VendorSource};
