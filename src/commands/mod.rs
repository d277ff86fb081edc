//! CLI command implementations.
//!
//! - **reorder** (default): rewrite rule headers in one file
//! - **init**: write a default `.rule-reorder.toml`

pub mod init;
pub mod reorder;

pub use init::init_config;
pub use reorder::{run_reorder, ReorderOptions, ReorderOutcome, WriteMode, DEFAULT_TARGET};
