//! `buildplan match`: show the rules applying to one path.

use super::{load_definition, select_environment};
use crate::cli::MatchArgs;
use buildplan::error::Result;
use buildplan::resolver::{ConfigResolver, ResolvedConfig};
use std::fmt::Write;
use std::path::Path;

pub(super) fn cmd_match(config_path: &Path, args: MatchArgs) -> Result<String> {
    let definition = load_definition(config_path)?;
    let environment = select_environment(args.env.as_deref())?;
    let resolved = ConfigResolver::new(&definition).resolve(environment)?;
    Ok(render(&resolved, &args.path))
}

pub(super) fn render(config: &ResolvedConfig, path: &str) -> String {
    let matched = config.match_rule(path);
    let mut out = String::new();

    if matched.is_empty() {
        let _ = writeln!(out, "No rules match {} ({}).", path, config.environment());
    } else {
        let _ = writeln!(
            out,
            "Rules matching {} ({}, {}):",
            path,
            config.environment(),
            matched.len()
        );
        for rule in &matched {
            let loaders: Vec<&str> = rule.loaders().iter().map(|l| l.loader.as_str()).collect();
            let _ = write!(
                out,
                "  [{}] {} -> {}",
                rule.enforce().as_str(),
                rule.matcher().pattern(),
                loaders.join(" -> ")
            );
            if let Some(asset_type) = &rule.spec().asset_type {
                let _ = write!(out, "  (type: {})", asset_type);
            }
            out.push('\n');
        }
    }

    if let Some(group) = config.match_cache_group(path) {
        let _ = writeln!(out, "Cache group: {}", group.name);
    }

    out
}
