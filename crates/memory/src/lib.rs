//! File-backed project memory for codebrain.
//!
//! One repository per resource, all owned by [`Brain`]:
//! - [`Journal`]: append-only changelog and decision log
//! - [`Checklist`]: the markdown TODO list
//! - [`ContextStore`]: the context document with deep-merge updates
//! - [`SolutionMemory`]: remembered solutions with keyword recall
//! - [`PatternStore`]: learned code-style patterns

pub mod brain;
pub mod checklist;
pub mod context_store;
pub mod journal;
pub mod patterns;
pub mod similarity;
pub mod solutions;

pub use brain::{Brain, BrainStatus, InitReport};
pub use checklist::{Checklist, parse_checklist, render_checklist};
pub use context_store::ContextStore;
pub use journal::{Journal, parse_log, render_entry};
pub use patterns::PatternStore;
pub use similarity::{extract_keywords, jaccard_similarity, problem_key};
pub use solutions::SolutionMemory;
