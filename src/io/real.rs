//! Production implementation of [`FileSystem`].

use crate::errors::{ReorderError, Result};
use crate::io::traits::FileSystem;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Delegates to `std::fs`; writes go through a temporary file and rename.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ReorderError::io(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        // The temporary file must live on the same filesystem as the target
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| ReorderError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| ReorderError::io(temp.path(), e))?;

        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| ReorderError::io(temp.path(), e))?;
        }

        temp.persist(path)
            .map_err(|e| ReorderError::io(path, e.error))?;
        tracing::debug!("Atomically replaced {}", path.display());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("parametric.rs");
        fs::write(&path, "old").unwrap();

        let fs_impl = RealFileSystem::new();
        fs_impl.write_atomic(&path, "new content").unwrap();

        assert_eq!(fs_impl.read_to_string(&path).unwrap(), "new content");
        // Only the target remains; the temporary file was renamed over it
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fresh.rs");
        RealFileSystem::new().write_atomic(&path, "x").unwrap();
        assert!(RealFileSystem::new().exists(&path));
    }

    #[test]
    fn test_write_into_missing_dir_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope").join("file.rs");
        let err = RealFileSystem::new().write_atomic(&path, "x").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = RealFileSystem::new()
            .read_to_string(Path::new("/definitely/not/here.rs"))
            .unwrap_err();
        assert!(matches!(err, ReorderError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mode.rs");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        RealFileSystem::new().write_atomic(&path, "new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
