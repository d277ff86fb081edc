//! Configuration for rule-reorder.
//!
//! Settings come from `.rule-reorder.toml` (see [`loader`]) and fall back to
//! the built-in classification tables and layout when a section is absent.

mod loader;
pub mod tables;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use tables::{Bucket, ClassificationTables, ParamKey};

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    /// Replaces the built-in parametric table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parametric: Option<Vec<ParamKey>>,

    /// Replaces the built-in ghost table when present; order is output order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost: Option<Vec<ParamKey>>,
}

impl ReorderConfig {
    /// Effective classification tables after applying overrides.
    pub fn tables(&self) -> ClassificationTables {
        let defaults = ClassificationTables::default();
        ClassificationTables {
            parametric: self.parametric.clone().unwrap_or(defaults.parametric),
            ghost: self.ghost.clone().unwrap_or(defaults.ghost),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.tables().validate()?;
        self.layout.validate()
    }
}

/// Indentation of rewritten headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Columns before `pub fn` and the closing `) {`
    #[serde(default = "default_header_indent")]
    pub header_indent: usize,

    /// Columns before each parameter and comment line
    #[serde(default = "default_param_indent")]
    pub param_indent: usize,
}

pub fn default_header_indent() -> usize {
    12
}

pub fn default_param_indent() -> usize {
    16
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_indent: default_header_indent(),
            param_indent: default_param_indent(),
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), String> {
        const MAX_INDENT: usize = 80;
        if self.header_indent > MAX_INDENT || self.param_indent > MAX_INDENT {
            return Err(format!("indentation must not exceed {} columns", MAX_INDENT));
        }
        Ok(())
    }
}

/// What happens to parameters that match neither table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnclassifiedPolicy {
    /// Leave them out of the rewritten header (reported as warnings)
    #[default]
    Drop,
    /// Emit them after the ghost section, in input order
    Keep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub unclassified: UnclassifiedPolicy,

    /// Fail instead of warning on unmatched files, malformed headers and drops
    #[serde(default)]
    pub strict: bool,
}
