//! Rule, plugin and cache group validation.
//!
//! Every check here fails with `ConfigValidationError`. Nothing is partially
//! accepted: the first problem aborts resolution.

use super::resolved::{ResolvedCacheGroup, ResolvedRule};
use crate::config::{CacheGroupSpec, EnforceOrder, PluginSpec, RuleSpec};
use crate::environment::Environment;
use crate::error::{BuildplanError, Result};
use crate::pattern::{PathMatcher, PathPattern};

/// Validate and compile rules, keeping declaration order.
pub(crate) fn compile_rules(rules: &[RuleSpec]) -> Result<Vec<ResolvedRule>> {
    let mut compiled = Vec::with_capacity(rules.len());

    for (index, rule) in rules.iter().enumerate() {
        let label = format!("rule #{}", index + 1);

        if rule.match_pattern.trim().is_empty() {
            return Err(BuildplanError::validation(format!(
                "{}: match pattern must be non-empty",
                label
            )));
        }
        if rule.loaders.is_empty() {
            return Err(BuildplanError::validation(format!(
                "{}: loader sequence must be non-empty (match '{}')",
                label, rule.match_pattern
            )));
        }
        for (step, loader) in rule.loaders.iter().enumerate() {
            if loader.loader.trim().is_empty() {
                return Err(BuildplanError::validation(format!(
                    "{}: loader step #{} has an empty loader name",
                    label,
                    step + 1
                )));
            }
        }

        let matcher = compile_pattern(&rule.match_pattern, &format!("{} match", label))?;
        let exclude = rule
            .exclude
            .as_deref()
            .map(|raw| compile_pattern(raw, &format!("{} exclude", label)))
            .transpose()?;

        tracing::debug!(
            rule = index + 1,
            pattern = %matcher.pattern(),
            enforce = rule.enforce.as_str(),
            loaders = rule.loaders.len(),
            "compiled rule"
        );
        compiled.push(ResolvedRule::new(rule.clone(), matcher, exclude));
    }

    check_enforce_conflicts(&compiled)?;
    Ok(compiled)
}

/// Reject a `pre` and a `post` rule whose match patterns share any path.
///
/// Both would claim the same inputs for opposite ends of the chain, so the
/// effective order of their loaders is ambiguous. Glob and regex patterns
/// are compared by the paths they accept, not by spelling.
fn check_enforce_conflicts(rules: &[ResolvedRule]) -> Result<()> {
    let post_rules = tier(rules, EnforceOrder::Post);

    for (pre_index, pre) in tier(rules, EnforceOrder::Pre) {
        for &(post_index, post) in &post_rules {
            if !pre.matcher().overlaps(post.matcher()) {
                continue;
            }
            let (pre_pattern, post_pattern) = (pre.matcher().pattern(), post.matcher().pattern());
            let shared = if pre_pattern == post_pattern {
                format!("both match '{}'", pre_pattern)
            } else {
                format!(
                    "match overlapping paths ('{}' and '{}')",
                    pre_pattern, post_pattern
                )
            };
            return Err(BuildplanError::validation(format!(
                "rule #{} (enforce: pre) and rule #{} (enforce: post) {}; \
                 ordering for these files is ambiguous",
                pre_index + 1,
                post_index + 1,
                shared
            )));
        }
    }

    Ok(())
}

fn tier(rules: &[ResolvedRule], order: EnforceOrder) -> Vec<(usize, &ResolvedRule)> {
    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.enforce() == order)
        .collect()
}

/// Validate a plugin list and keep those enabled for `environment`.
///
/// Names are checked for every plugin, enabled or not, so a definition is
/// valid or invalid regardless of the environment.
pub(crate) fn filter_plugins(
    section: &str,
    plugins: &[PluginSpec],
    environment: Environment,
) -> Result<Vec<PluginSpec>> {
    let mut active = Vec::new();

    for (index, plugin) in plugins.iter().enumerate() {
        if plugin.name.trim().is_empty() {
            return Err(BuildplanError::validation(format!(
                "{} #{}: name must be non-empty",
                section,
                index + 1
            )));
        }

        let enabled = plugin.is_enabled(environment);
        tracing::debug!(
            section,
            plugin = %plugin.name,
            %environment,
            enabled,
            "evaluated plugin condition"
        );
        if enabled {
            active.push(plugin.clone());
        }
    }

    Ok(active)
}

/// Validate and compile split-chunk cache groups.
pub(crate) fn compile_cache_groups(groups: &[CacheGroupSpec]) -> Result<Vec<ResolvedCacheGroup>> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let label = format!("cache group #{}", index + 1);
            if group.name.trim().is_empty() {
                return Err(BuildplanError::validation(format!(
                    "{}: name must be non-empty",
                    label
                )));
            }
            Ok(ResolvedCacheGroup {
                name: group.name.clone(),
                test: compile_pattern(&group.test, &format!("{} test", label))?,
                chunks: group.chunks,
                enforce: group.enforce,
            })
        })
        .collect()
}

fn compile_pattern(raw: &str, context: &str) -> Result<PathMatcher> {
    PathPattern::parse(raw)
        .and_then(|pattern| pattern.compile())
        .map_err(|err| with_context(err, context))
}

fn with_context(err: BuildplanError, context: &str) -> BuildplanError {
    match err {
        BuildplanError::ConfigValidationError(msg) => {
            BuildplanError::validation(format!("{}: {}", context, msg))
        }
        other => other,
    }
}
