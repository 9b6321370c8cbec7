//! The immutable configuration snapshot produced by the resolver.
//!
//! All fields are private; consumers read through accessors. The snapshot
//! serializes to YAML/JSON for hand-off to external build tools.

use crate::config::{
    ChunkSelection, EnforceOrder, LoaderStep, OutputSpec, PluginSpec, RuleSpec,
};
use crate::environment::Environment;
use crate::pattern::PathMatcher;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bundler mode derived from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Production builds use production mode; everything else is development.
    pub fn for_environment(environment: Environment) -> Self {
        if environment.is_production() {
            Mode::Production
        } else {
            Mode::Development
        }
    }
}

/// Where and how the bundle is emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputTarget {
    pub mode: Mode,
    pub target: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_module_filename: Option<String>,
    pub clean: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
}

impl OutputTarget {
    pub(crate) fn new(
        spec: &OutputSpec,
        devtool: Option<&String>,
        environment: Environment,
    ) -> Self {
        Self {
            mode: Mode::for_environment(environment),
            target: spec.target.select(environment).clone(),
            path: spec.path.clone(),
            asset_module_filename: spec.asset_module_filename.clone(),
            clean: spec.clean,
            devtool: devtool.cloned(),
        }
    }
}

/// A validated rule with its patterns compiled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRule {
    #[serde(flatten)]
    spec: RuleSpec,
    #[serde(skip)]
    matcher: PathMatcher,
    #[serde(skip)]
    exclude: Option<PathMatcher>,
}

impl ResolvedRule {
    pub(crate) fn new(spec: RuleSpec, matcher: PathMatcher, exclude: Option<PathMatcher>) -> Self {
        Self {
            spec,
            matcher,
            exclude,
        }
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    pub fn loaders(&self) -> &[LoaderStep] {
        &self.spec.loaders
    }

    pub fn enforce(&self) -> EnforceOrder {
        self.spec.enforce
    }

    /// True when the match pattern matches and the exclusion does not.
    pub fn applies_to(&self, path: &str) -> bool {
        if !self.matcher.is_match(path) {
            return false;
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(path),
            None => true,
        }
    }
}

/// Dev server settings with conditionals evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDevServer {
    pub hot: bool,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
    pub compress: bool,
}

/// A split-chunk cache group with its test pattern compiled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCacheGroup {
    pub name: String,
    pub(crate) test: PathMatcher,
    pub chunks: ChunkSelection,
    pub enforce: bool,
}

impl ResolvedCacheGroup {
    pub fn test(&self) -> &PathMatcher {
        &self.test
    }
}

/// Optimization settings with inactive minimizers removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptimization {
    pub minimize: bool,
    pub minimizers: Vec<PluginSpec>,
    pub split_chunks: Vec<ResolvedCacheGroup>,
}

/// Transformer presets and plugins active for the environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTransform {
    pub presets: Vec<PluginSpec>,
    pub plugins: Vec<PluginSpec>,
}

/// Immutable configuration for one build invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub(crate) environment: Environment,
    pub(crate) entry: BTreeMap<String, Vec<String>>,
    pub(crate) output: OutputTarget,
    pub(crate) resolve_extensions: Vec<String>,
    pub(crate) rules: Vec<ResolvedRule>,
    pub(crate) plugins: Vec<PluginSpec>,
    pub(crate) optimization: ResolvedOptimization,
    pub(crate) transform: ResolvedTransform,
    pub(crate) dev_server: ResolvedDevServer,
}

impl ResolvedConfig {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn entry(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entry
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn resolve_extensions(&self) -> &[String] {
        &self.resolve_extensions
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[ResolvedRule] {
        &self.rules
    }

    /// Enabled plugins in declaration order.
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    pub fn optimization(&self) -> &ResolvedOptimization {
        &self.optimization
    }

    pub fn transform(&self) -> &ResolvedTransform {
        &self.transform
    }

    pub fn dev_server(&self) -> &ResolvedDevServer {
        &self.dev_server
    }

    /// Rules applying to `path`, in execution-tier order.
    pub fn match_rule(&self, path: &str) -> Vec<&ResolvedRule> {
        super::matching::match_rule(path, self)
    }

    /// First cache group whose test matches `path`.
    pub fn match_cache_group(&self, path: &str) -> Option<&ResolvedCacheGroup> {
        super::matching::match_cache_group(path, self)
    }
}
