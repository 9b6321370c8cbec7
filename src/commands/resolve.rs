//! `buildplan resolve`: print the resolved configuration.

use super::{load_definition, select_environment};
use crate::cli::{OutputFormat, ResolveArgs};
use buildplan::error::{BuildplanError, Result};
use buildplan::resolver::{ConfigResolver, ResolvedConfig};
use std::path::Path;

pub(super) fn cmd_resolve(config_path: &Path, args: ResolveArgs) -> Result<String> {
    let definition = load_definition(config_path)?;
    let environment = select_environment(args.env.as_deref())?;
    let resolved = ConfigResolver::new(&definition).resolve(environment)?;
    render(&resolved, args.format)
}

pub(super) fn render(config: &ResolvedConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(config).map_err(|e| {
            BuildplanError::UserError(format!("failed to serialize configuration to YAML: {}", e))
        }),
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| {
                BuildplanError::UserError(format!(
                    "failed to serialize configuration to JSON: {}",
                    e
                ))
            }),
    }
}
