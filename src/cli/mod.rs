//! CLI argument parsing for buildplan.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use buildplan::config::DEFAULT_DEFINITION_FILE;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Buildplan: declarative build-configuration resolver.
///
/// Reads a static build definition (rules, plugins, output, dev server,
/// optimization) and resolves it for one environment:
/// - plugins are filtered by their environment conditions
/// - rules are validated and matched against file paths
/// - the result is printed for external build tools to consume
#[derive(Parser, Debug)]
#[command(name = "buildplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the build definition file.
    #[arg(short, long, global = true, default_value = DEFAULT_DEFINITION_FILE)]
    pub config: PathBuf,

    /// Enable debug diagnostics on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for buildplan.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the definition and print the resulting configuration.
    Resolve(ResolveArgs),

    /// Show which rules apply to a file path, in execution order.
    Match(MatchArgs),

    /// Validate the definition under every environment.
    Check,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Environment to resolve for (defaults to NODE_ENV).
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Arguments for the `match` command.
#[derive(Parser, Debug)]
pub struct MatchArgs {
    /// File path to match (relative, forward or back slashes).
    pub path: String,

    /// Environment to resolve for (defaults to NODE_ENV).
    #[arg(short, long)]
    pub env: Option<String>,
}

/// Serialization format for `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_with_defaults() {
        let cli = Cli::try_parse_from(["buildplan", "resolve"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_DEFINITION_FILE));
        match cli.command {
            Command::Resolve(args) => {
                assert!(args.env.is_none());
                assert_eq!(args.format, OutputFormat::Yaml);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_match_with_global_config() {
        let cli = Cli::try_parse_from([
            "buildplan",
            "match",
            "src/App.tsx",
            "--env",
            "production",
            "--config",
            "web/buildplan.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("web/buildplan.yaml"));
        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.path, "src/App.tsx");
                assert_eq!(args.env.as_deref(), Some("production"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_json_format() {
        let cli = Cli::try_parse_from(["buildplan", "resolve", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Resolve(ResolveArgs {
                format: OutputFormat::Json,
                ..
            })
        ));
    }
}
