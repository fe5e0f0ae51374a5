//! Error types for the codebrain domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum, wrapped by [`Error`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The top-level error type for all codebrain operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Storage errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Vendor spec errors ---
    #[error("Vendor spec error: {0}")]
    Vendor(#[from] VendorError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of a file-backed resource (context, logs, checklist, stores).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing resource does not exist.
    #[error("Resource not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The resource exists but its content cannot be parsed.
    #[error("Resource at {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Reading or writing the resource failed.
    #[error("I/O failure on {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// A value was rejected before it reached storage.
    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn corrupt(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[derive(Debug, Error)]
pub enum VendorError {
    #[error("Unknown vendor source: {0}")]
    UnknownSource(String),

    #[error("Spec generation failed for {key}: {reason}")]
    GenerationFailed { key: String, reason: String },

    #[error("Invalid dependency manifest: {0}")]
    InvalidManifest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
