//! In-memory mock filesystem for testing collectors without a real `/proc`.
//!
//! `MockFs` simulates a filesystem in memory, so collector tests run the
//! same on Linux, macOS and in CI.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories.
    directories: HashSet<PathBuf>,
    /// Paths whose existence probe fails.
    probe_failures: HashSet<PathBuf>,
    /// Paths that exist but cannot be read.
    unreadable: HashSet<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();

        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }

        self.files.insert(path, content.into());
    }

    /// Removes a file, leaving its directories in place.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    /// Makes the existence probe of `path` fail with `PermissionDenied`.
    pub fn fail_probe(&mut self, path: impl AsRef<Path>) {
        self.probe_failures.insert(path.as_ref().to_path_buf());
    }

    /// Makes `path` exist but fail to read with `PermissionDenied`.
    pub fn make_unreadable(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.files.entry(path.clone()).or_default();
        self.unreadable.insert(path);
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        if self.probe_failures.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot stat {:?}", path),
            ));
        }
        Ok(self.files.contains_key(path) || self.directories.contains(path))
    }
}
