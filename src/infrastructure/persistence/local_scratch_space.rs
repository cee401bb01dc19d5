//! Local scratch space implementation
//!
//! Writes extracted payloads into a per-request directory on the local
//! filesystem.

use crate::domain::repositories::{ScratchError, ScratchSpace};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::trace;
use uuid::Uuid;

/// Scratch directory rooted at `<base>/<random uuid>`
///
/// The directory is left in place when dropped; removing it is up to the
/// caller.
pub struct LocalScratchSpace {
    root: PathBuf,
    files_written: AtomicUsize,
    bytes_written: AtomicU64,
}

impl LocalScratchSpace {
    /// Creates a fresh namespace under `base`
    pub fn new(base: &Path) -> Result<Self, ScratchError> {
        let root = base.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                ScratchError::PermissionDenied(root.display().to_string())
            } else {
                ScratchError::IoError(e)
            }
        })?;

        Ok(Self {
            root,
            files_written: AtomicUsize::new(0),
            bytes_written: AtomicU64::new(0),
        })
    }

    /// Creates a namespace under the system temporary directory
    pub fn in_temp_dir() -> Result<Self, ScratchError> {
        Self::new(&std::env::temp_dir().join("carscan"))
    }

    pub fn files_written(&self) -> usize {
        self.files_written.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

impl ScratchSpace for LocalScratchSpace {
    fn store(&self, name: &str, data: &[u8]) -> Result<PathBuf, ScratchError> {
        if !is_plain_file_name(name) {
            return Err(ScratchError::InvalidName(name.to_string()));
        }

        let path = self.root.join(name);
        let mut file = File::create(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                ScratchError::PermissionDenied(path.display().to_string())
            } else {
                ScratchError::IoError(e)
            }
        })?;
        file.write_all(data)?;

        self.files_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(data.len() as u64, Ordering::Relaxed);
        trace!(path = %path.display(), bytes = data.len(), "payload stored");

        Ok(path)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
