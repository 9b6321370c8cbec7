//! Configuration resolution.
//!
//! Turns a static build definition plus an [`Environment`] into one
//! immutable [`ResolvedConfig`]:
//! - plugins, minimizers and transform presets/plugins whose condition is
//!   false for the environment are dropped; the rest keep declaration order
//! - rules keep declaration order and are validated and compiled
//! - per-environment values (target, hot reload, mode) are selected
//!
//! Resolution is pure: no I/O, no shared state, same inputs give equal output.

mod matching;
mod resolved;
mod validation;


pub use matching::{match_cache_group, match_rule};
pub use resolved::{
    Mode, OutputTarget, ResolvedCacheGroup, ResolvedConfig, ResolvedDevServer,
    ResolvedOptimization, ResolvedRule, ResolvedTransform,
};

use crate::config::{BuildDefinition, PluginSpec, RuleSpec};
use crate::environment::Environment;
use crate::error::Result;

/// Resolve bare rule and plugin lists.
///
/// Every other section takes its default. Fails with `ConfigValidationError`
/// on an empty match pattern, an empty loader sequence, a pattern that does
/// not compile, or a `pre`/`post` rule pair whose match patterns overlap.
///
/// # Examples
///
/// ```
/// use buildplan::config::{EnabledWhen, PluginSpec};
/// use buildplan::environment::Environment;
/// use buildplan::resolver::resolve;
///
/// let plugins = vec![
///     PluginSpec::new("A").enabled_when(EnabledWhen::Only(vec![Environment::Development])),
///     PluginSpec::new("B"),
/// ];
/// let config = resolve(&[], &plugins, Environment::Production).unwrap();
/// let names: Vec<_> = config.plugins().iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["B"]);
/// ```
pub fn resolve(
    raw_rules: &[RuleSpec],
    raw_plugins: &[PluginSpec],
    environment: Environment,
) -> Result<ResolvedConfig> {
    let definition = BuildDefinition {
        rules: raw_rules.to_vec(),
        plugins: raw_plugins.to_vec(),
        ..Default::default()
    };
    ConfigResolver::new(&definition).resolve(environment)
}

/// Resolves a full [`BuildDefinition`] for any environment.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'a> {
    definition: &'a BuildDefinition,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(definition: &'a BuildDefinition) -> Self {
        Self { definition }
    }

    /// Produce the configuration snapshot for `environment`.
    pub fn resolve(&self, environment: Environment) -> Result<ResolvedConfig> {
        let def = self.definition;

        let rules = validation::compile_rules(&def.rules)?;
        let plugins = validation::filter_plugins("plugin", &def.plugins, environment)?;
        let minimizers =
            validation::filter_plugins("minimizer", &def.optimization.minimizers, environment)?;
        let split_chunks = validation::compile_cache_groups(&def.optimization.split_chunks)?;
        let presets =
            validation::filter_plugins("transform preset", &def.transform.presets, environment)?;
        let transform_plugins =
            validation::filter_plugins("transform plugin", &def.transform.plugins, environment)?;

        let config = ResolvedConfig {
            environment,
            entry: def.entry.clone(),
            output: OutputTarget::new(&def.output, def.devtool.as_ref(), environment),
            resolve_extensions: def.resolve_extensions.clone(),
            rules,
            plugins,
            optimization: ResolvedOptimization {
                minimize: def.optimization.minimize,
                minimizers,
                split_chunks,
            },
            transform: ResolvedTransform {
                presets,
                plugins: transform_plugins,
            },
            dev_server: ResolvedDevServer {
                hot: def.dev_server.hot.evaluate(environment),
                port: def.dev_server.port,
                static_dir: def.dev_server.static_dir.clone(),
                compress: def.dev_server.compress,
            },
        };

        tracing::info!(
            %environment,
            rules = config.rules.len(),
            plugins = config.plugins.len(),
            minimizers = config.optimization.minimizers.len(),
            "resolved build configuration"
        );
        Ok(config)
    }

    /// Resolve for every environment, in [`Environment::ALL`] order.
    pub fn resolve_all(&self) -> Vec<(Environment, Result<ResolvedConfig>)> {
        Environment::ALL
            .iter()
            .map(|&env| (env, self.resolve(env)))
            .collect()
    }
}
