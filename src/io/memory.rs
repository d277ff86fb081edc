//! In-memory [`FileSystem`] for command tests.

use crate::errors::{ReorderError, Result};
use crate::io::traits::FileSystem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    writes: RwLock<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// Number of successful `write_atomic` calls.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|n| *n).unwrap_or(0)
    }
}

fn poisoned(path: &Path) -> ReorderError {
    ReorderError::io(path, std::io::Error::other("memory file system lock poisoned"))
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.read().map_err(|_| poisoned(path))?;
        files.get(path).cloned().ok_or_else(|| {
            ReorderError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            )
        })
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let mut files = self.files.write().map_err(|_| poisoned(path))?;
        files.insert(path.to_path_buf(), content.to_string());
        *self.writes.write().map_err(|_| poisoned(path))? += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }
}
