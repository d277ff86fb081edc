use crate::commands::{ReorderOptions, WriteMode, DEFAULT_TARGET};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rule-reorder")]
#[command(
    about = "Reorder parameters of `#[rule]` headers into parametric and ghost-state groups",
    long_about = None
)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub reorder: ReorderArgs,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .rule-reorder.toml into the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReorderArgs {
    /// Rule file to rewrite in place
    #[arg(default_value = DEFAULT_TARGET)]
    pub path: PathBuf,

    /// Configuration file (defaults to a discovered .rule-reorder.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long = "dry-run", conflicts_with = "check")]
    pub dry_run: bool,

    /// Exit with status 1 if the file would change; never writes
    #[arg(long)]
    pub check: bool,

    /// Fail on unmatched files, malformed headers and dropped parameters
    #[arg(long)]
    pub strict: bool,

    /// Keep parameters that match neither table, after the ghost section
    #[arg(long = "keep-unclassified")]
    pub keep_unclassified: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,
}

impl ReorderArgs {
    pub fn write_mode(&self) -> WriteMode {
        if self.check {
            WriteMode::Check
        } else if self.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        }
    }

    pub fn to_options(&self) -> ReorderOptions {
        ReorderOptions {
            path: self.path.clone(),
            mode: self.write_mode(),
            strict: self.strict,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
