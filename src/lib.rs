//! Reorders the parameter lists of `#[rule] pub fn [< $f _name >](...)`
//! headers in formal-verification rule files: `e: Env` first, then the
//! parametric inputs in their original order, then the ghost-state
//! parameters in canonical order, each group introduced by a comment line.

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod observability;
pub mod rewrite;

// Re-export commonly used types
pub use crate::config::{ClassificationTables, ReorderConfig};
pub use crate::errors::ReorderError;
pub use crate::rewrite::{Diagnostic, Rewrite, RewriteReport, RuleRewriter};
