//! Filesystem boundary contract.

use std::path::Path;

/// Read-only existence checks used by the pipelines.
pub trait FileProbe: Send + Sync {
    /// True when anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// True when `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}
