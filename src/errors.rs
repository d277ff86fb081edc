//! Error types for rule-reorder operations.
//!
//! Library code returns [`ReorderError`]; the binary wraps it in
//! `anyhow::Error` with additional context at the command boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rewrite operations
#[derive(Debug, Error)]
pub enum ReorderError {
    /// File system errors, always tied to the path being read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or failed validation
    #[error("Configuration error{}: {message}", config_location(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// No rule header matched in the target file (strict mode only)
    #[error("No `#[rule]` headers matched in {}", .path.display())]
    NoMatches { path: PathBuf },

    /// Strict mode found diagnostics that would otherwise be warnings
    #[error("Strict mode: {count} diagnostic(s) reported for {}", .path.display())]
    StrictViolation { path: PathBuf, count: usize },
}

impl ReorderError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error tied to a config file.
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Whether the user can resolve this by editing input or config.
    ///
    /// The binary exits with [`USER_ERROR_EXIT`] for these instead of
    /// reporting a failure with a full error chain.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

fn config_location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ReorderError>;

/// Exit status for errors the user can fix by editing the rule file or config.
pub const USER_ERROR_EXIT: u8 = 2;
