//! Command implementations for buildplan.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command renders its report to a string so the
//! output can be tested without capturing stdout.

mod check;
mod match_path;
mod resolve;


use crate::cli::{Cli, Command};
use buildplan::config::BuildDefinition;
use buildplan::environment::Environment;
use buildplan::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Command::Resolve(args) => resolve::cmd_resolve(&cli.config, args)?,
        Command::Match(args) => match_path::cmd_match(&cli.config, args)?,
        Command::Check => {
            let report = check::cmd_check(&cli.config)?;
            if let Some(err) = report.failure {
                // The per-environment lines explain which resolutions failed.
                eprint!("{}", report.text);
                return Err(err);
            }
            report.text
        }
    };
    print!("{}", output);
    Ok(())
}

/// Load the definition file named on the command line.
fn load_definition(path: &Path) -> Result<BuildDefinition> {
    BuildDefinition::load(path)
}

/// Pick the environment from `--env`, falling back to `NODE_ENV`.
fn select_environment(arg: Option<&str>) -> Result<Environment> {
    match arg {
        Some(name) => Environment::parse_arg(name),
        None => Ok(Environment::from_process_env()),
    }
}
