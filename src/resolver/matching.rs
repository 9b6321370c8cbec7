//! Path-to-rule matching over a resolved configuration.

use super::resolved::{ResolvedCacheGroup, ResolvedConfig, ResolvedRule};
use crate::pattern::normalize_path;

/// Return every rule applying to `path`.
///
/// A rule applies when its match pattern matches and its exclusion (if any)
/// does not. Results are ordered pre, normal, post; within a tier they keep
/// declaration order.
///
/// # Examples
///
/// ```
/// use buildplan::config::RuleSpec;
/// use buildplan::environment::Environment;
/// use buildplan::resolver::{match_rule, resolve};
///
/// let rules = vec![
///     RuleSpec::new("*.ts", &["ts-loader"]),
///     RuleSpec::new("*.ts", &["other-loader"]),
/// ];
/// let config = resolve(&rules, &[], Environment::Development).unwrap();
/// let matched = match_rule("x.ts", &config);
/// assert_eq!(matched.len(), 2);
/// assert_eq!(matched[0].loaders()[0].loader, "ts-loader");
/// ```
pub fn match_rule<'a>(path: &str, config: &'a ResolvedConfig) -> Vec<&'a ResolvedRule> {
    let path = normalize_path(path);
    let mut matched: Vec<&ResolvedRule> = config
        .rules()
        .iter()
        .filter(|rule| rule.applies_to(&path))
        .collect();

    // Stable sort keeps declaration order inside each tier.
    matched.sort_by_key(|rule| rule.enforce());
    matched
}

/// Return the first cache group whose test pattern matches `path`.
pub fn match_cache_group<'a>(path: &str, config: &'a ResolvedConfig) -> Option<&'a ResolvedCacheGroup> {
    let path = normalize_path(path);
    config
        .optimization()
        .split_chunks
        .iter()
        .find(|group| group.test().is_match(&path))
}
