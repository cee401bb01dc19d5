//! Scratch space trait
//!
//! Defines where extracted payloads are materialized as files. Each
//! extraction request gets its own handle, so concurrent requests never
//! share a namespace.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when writing payloads to scratch storage
#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid payload name: {0}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Request-scoped storage for extracted payload bytes
///
/// Callers own cleanup of whatever the space writes.
pub trait ScratchSpace: Send + Sync {
    /// Writes `data` under `name` and returns the path written
    fn store(&self, name: &str, data: &[u8]) -> Result<PathBuf, ScratchError>;

    /// Returns the directory this space writes into
    fn root(&self) -> &Path;
}
