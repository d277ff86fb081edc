use anyhow::{Context, Result};
use rule_reorder::cli::{Cli, Commands, ReorderArgs};
use rule_reorder::commands::{self, WriteMode};
use rule_reorder::config::{self, ReorderConfig, UnclassifiedPolicy};
use rule_reorder::errors::{self, ReorderError, USER_ERROR_EXIT};
use rule_reorder::io::{self, RealFileSystem};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = rule_reorder::cli::parse_args();
    rule_reorder::observability::init_logging(cli.verbosity);

    match cli.command {
        Some(Commands::Init { force }) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            commands::init_config(&RealFileSystem::new(), &cwd, force)?;
            Ok(ExitCode::SUCCESS)
        }
        None => handle_reorder(&cli),
    }
}

fn handle_reorder(cli: &Cli) -> Result<ExitCode> {
    let args = &cli.reorder;
    let options = args.to_options();

    let outcome = match resolve_config(args)
        .and_then(|config| commands::run_reorder(&RealFileSystem::new(), &options, &config))
    {
        Ok(outcome) => outcome,
        Err(err) if err.is_user_fixable() => {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::from(USER_ERROR_EXIT));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to reorder {}", options.path.display())))
        }
    };

    io::write_report(args.format.into(), std::io::stdout().lock(), &outcome)?;

    if options.mode == WriteMode::Check && outcome.would_change {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// Explicit --config wins over discovery; CLI flags win over both
fn resolve_config(args: &ReorderArgs) -> errors::Result<ReorderConfig> {
    let mut config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| ReorderError::io(".", e))?;
            config::load_config(&cwd)
        }
    };

    if args.keep_unclassified {
        config.policy.unclassified = UnclassifiedPolicy::Keep;
    }
    Ok(config)
}
