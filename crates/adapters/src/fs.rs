//! Filesystem probe adapter.

use deploy_probe_ports::FileProbe;
use std::path::Path;

/// Local filesystem probe. Symlinks are followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileProbe;

impl FileProbe for LocalFileProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
