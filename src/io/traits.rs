//! I/O trait definitions.
//!
//! The rewrite itself is pure; reading and writing the target file goes
//! through [`FileSystem`] so commands can run against an in-memory
//! implementation in tests.

use crate::errors::Result;
use std::path::Path;

/// File system operations trait.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `ReorderError::Io` if the file doesn't exist, permission is
    /// denied, or the content isn't valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace a file's contents so that readers observe either the old or
    /// the new content, never a partial write.
    ///
    /// # Errors
    ///
    /// Returns `ReorderError::Io` if the temporary file can't be created in
    /// the target's directory or the final rename fails.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}
