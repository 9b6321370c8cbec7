//! `buildplan check`: validate the definition under every environment.

use super::load_definition;
use buildplan::config::BuildDefinition;
use buildplan::error::{BuildplanError, Result};
use buildplan::resolver::ConfigResolver;
use std::fmt::Write;
use std::path::Path;

/// Per-environment results of a check run.
#[derive(Debug)]
pub(super) struct CheckReport {
    /// One line per environment, in [`Environment::ALL`] order.
    ///
    /// [`Environment::ALL`]: buildplan::environment::Environment::ALL
    pub text: String,
    /// The first validation error, if any environment failed.
    pub failure: Option<BuildplanError>,
}

pub(super) fn cmd_check(config_path: &Path) -> Result<CheckReport> {
    let definition = load_definition(config_path)?;
    Ok(check_definition(&definition))
}

/// Resolve for each environment, recording the first validation error.
pub(super) fn check_definition(definition: &BuildDefinition) -> CheckReport {
    let mut text = String::new();
    let mut failure: Option<BuildplanError> = None;

    for (environment, result) in ConfigResolver::new(definition).resolve_all() {
        match result {
            Ok(config) => {
                let _ = writeln!(
                    text,
                    "  ok  {:<12} {} rules, {} plugins, {} minimizers",
                    environment.as_str(),
                    config.rules().len(),
                    config.plugins().len(),
                    config.optimization().minimizers.len()
                );
            }
            Err(err) => {
                let _ = writeln!(text, "  x   {:<12} {}", environment.as_str(), err);
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }
    }

    CheckReport { text, failure }
}
