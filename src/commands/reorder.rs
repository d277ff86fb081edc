//! The reorder command: read, rewrite, check policy, write.

use crate::config::ReorderConfig;
use crate::errors::{ReorderError, Result};
use crate::io::FileSystem;
use crate::rewrite::{Diagnostic, RewriteReport, RuleRewriter};
use serde::Serialize;
use std::path::PathBuf;

/// Target file used when no path is given on the command line.
pub const DEFAULT_TARGET: &str = "src/certora_specs/base/parametric.rs";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file when the rewrite changes it
    #[default]
    Write,
    /// Report only
    DryRun,
    /// Report only; the caller turns `would_change` into a failing exit
    Check,
}

#[derive(Debug, Clone)]
pub struct ReorderOptions {
    pub path: PathBuf,
    pub mode: WriteMode,
    /// Also enabled by `policy.strict` in the config file
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderOutcome {
    pub path: PathBuf,
    pub report: RewriteReport,
    pub would_change: bool,
    pub written: bool,
}

pub fn run_reorder<F: FileSystem + ?Sized>(
    fs: &F,
    options: &ReorderOptions,
    config: &ReorderConfig,
) -> Result<ReorderOutcome> {
    let original = fs.read_to_string(&options.path)?;
    tracing::info!("Read {} ({} bytes)", options.path.display(), original.len());

    let rewrite = RuleRewriter::from_config(config).rewrite(&original);
    let would_change = rewrite.changed_from(&original);

    if options.strict || config.policy.strict {
        enforce_strict(&options.path, &rewrite.report)?;
    }

    let written = match options.mode {
        WriteMode::Write if would_change => {
            fs.write_atomic(&options.path, &rewrite.text)?;
            tracing::info!(
                "Rewrote {} header(s) in {}",
                rewrite.report.headers_changed,
                options.path.display()
            );
            true
        }
        WriteMode::Write => {
            tracing::info!("{} already up to date; not writing", options.path.display());
            false
        }
        WriteMode::DryRun | WriteMode::Check => false,
    };

    Ok(ReorderOutcome {
        path: options.path.clone(),
        report: rewrite.report,
        would_change,
        written,
    })
}

fn enforce_strict(path: &std::path::Path, report: &RewriteReport) -> Result<()> {
    match report.diagnostics.as_slice() {
        [] => Ok(()),
        [Diagnostic::NoMatches] => Err(ReorderError::NoMatches {
            path: path.to_path_buf(),
        }),
        diagnostics => {
            for diagnostic in diagnostics {
                tracing::error!("{}", diagnostic);
            }
            Err(ReorderError::StrictViolation {
                path: path.to_path_buf(),
                count: diagnostics.len(),
            })
        }
    }
}
