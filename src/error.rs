//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the crate-level error type, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Workflow-level check failures never surface here: they are reported
//!   through the error callback and a `false` return from `install`
//! - Use `RigupError` for errors on the outer surfaces (filesystem, CLI)
//! - Use `anyhow::Error` (via `RigupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Crate-level error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// Scratch directory could not be created.
    #[error("Could not create working directory {path}: {source}")]
    WorkDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;
