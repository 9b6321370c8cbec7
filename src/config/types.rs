//! Definition types and defaults for buildplan.
//!
//! This module defines the raw rule, plugin and section types parsed from
//! the definition file, plus the default value functions used by serde.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form options handed through to an external tool.
pub type ToolOptions = BTreeMap<String, serde_yaml::Value>;

/// Execution tier hint for a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum EnforceOrder {
    /// Runs before all normal rules.
    Pre,
    #[default]
    Normal,
    /// Runs after all normal rules.
    Post,
}

impl EnforceOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Normal => "normal",
            Self::Post => "post",
        }
    }
}

/// One step of a rule's loader chain.
///
/// In YAML a step is either a bare loader name or `{loader, options}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLoaderStep")]
pub struct LoaderStep {
    pub loader: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: ToolOptions,
}

impl LoaderStep {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: ToolOptions::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLoaderStep {
    Name(String),
    Full {
        loader: String,
        #[serde(default)]
        options: ToolOptions,
    },
}

impl From<RawLoaderStep> for LoaderStep {
    fn from(raw: RawLoaderStep) -> Self {
        match raw {
            RawLoaderStep::Name(loader) => LoaderStep::new(loader),
            RawLoaderStep::Full { loader, options } => LoaderStep { loader, options },
        }
    }
}

/// A `use:` value: a single step or a list of steps.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(LoaderStep),
    Many(Vec<LoaderStep>),
}

fn deserialize_loader_steps<'de, D>(deserializer: D) -> Result<Vec<LoaderStep>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(step) => vec![step],
        OneOrMany::Many(steps) => steps,
    })
}

/// A declarative mapping from a file-path pattern to a loader chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Pattern selecting the files this rule applies to.
    #[serde(rename = "match")]
    pub match_pattern: String,

    /// Files matching this pattern are skipped even when `match` matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Ordered loader chain.
    #[serde(rename = "use", deserialize_with = "deserialize_loader_steps")]
    pub loaders: Vec<LoaderStep>,

    /// Execution tier.
    pub enforce: EnforceOrder,

    /// Asset module type forwarded to the bundler (e.g. `asset/resource`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
}

impl RuleSpec {
    /// Build a rule from a pattern and loader names.
    pub fn new(match_pattern: impl Into<String>, loaders: &[&str]) -> Self {
        Self {
            match_pattern: match_pattern.into(),
            loaders: loaders.iter().map(|l| LoaderStep::new(*l)).collect(),
            ..Default::default()
        }
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_enforce(mut self, enforce: EnforceOrder) -> Self {
        self.enforce = enforce;
        self
    }
}

/// Condition under which a plugin is active.
///
/// In YAML: `true`, `false`, `{only: [..]}` or `{except: [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawEnabledWhen", into = "RawEnabledWhen")]
pub enum EnabledWhen {
    #[default]
    Always,
    Never,
    Only(Vec<Environment>),
    Except(Vec<Environment>),
}

impl EnabledWhen {
    /// Evaluate the condition for an environment.
    pub fn evaluate(&self, environment: Environment) -> bool {
        match self {
            EnabledWhen::Always => true,
            EnabledWhen::Never => false,
            EnabledWhen::Only(envs) => envs.contains(&environment),
            EnabledWhen::Except(envs) => !envs.contains(&environment),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEnabledWhen {
    Flag(bool),
    Only { only: Vec<Environment> },
    Except { except: Vec<Environment> },
}

impl From<RawEnabledWhen> for EnabledWhen {
    fn from(raw: RawEnabledWhen) -> Self {
        match raw {
            RawEnabledWhen::Flag(true) => EnabledWhen::Always,
            RawEnabledWhen::Flag(false) => EnabledWhen::Never,
            RawEnabledWhen::Only { only } => EnabledWhen::Only(only),
            RawEnabledWhen::Except { except } => EnabledWhen::Except(except),
        }
    }
}

impl From<EnabledWhen> for RawEnabledWhen {
    fn from(value: EnabledWhen) -> Self {
        match value {
            EnabledWhen::Always => RawEnabledWhen::Flag(true),
            EnabledWhen::Never => RawEnabledWhen::Flag(false),
            EnabledWhen::Only(only) => RawEnabledWhen::Only { only },
            EnabledWhen::Except(except) => RawEnabledWhen::Except { except },
        }
    }
}

/// A named, conditionally-enabled build extension.
///
/// Used for bundler plugins, minimizers, and transform presets/plugins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSpec {
    pub name: String,
    pub enabled: EnabledWhen,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: ToolOptions,
}

impl PluginSpec {
    /// An always-enabled plugin with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn enabled_when(mut self, enabled: EnabledWhen) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: serde_yaml::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn is_enabled(&self, environment: Environment) -> bool {
        self.enabled.evaluate(environment)
    }
}

/// A value that may differ between environments.
///
/// In YAML either a plain value, or `{default, development, production, test}`
/// where every key except `default` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerEnvironment<T> {
    Uniform(T),
    Split {
        default: T,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        development: Option<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        production: Option<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        test: Option<T>,
    },
}

impl<T> PerEnvironment<T> {
    /// Pick the value for an environment.
    pub fn select(&self, environment: Environment) -> &T {
        match self {
            PerEnvironment::Uniform(value) => value,
            PerEnvironment::Split {
                default,
                development,
                production,
                test,
            } => {
                let specific = match environment {
                    Environment::Development => development,
                    Environment::Production => production,
                    Environment::Test => test,
                };
                specific.as_ref().unwrap_or(default)
            }
        }
    }
}

/// Output section of the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Output directory.
    pub path: String,

    /// Filename template for emitted asset modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_module_filename: Option<String>,

    /// Whether the output directory is emptied before emitting.
    pub clean: bool,

    /// Build target, optionally per environment.
    pub target: PerEnvironment<String>,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            asset_module_filename: None,
            clean: false,
            target: PerEnvironment::Uniform(default_target()),
        }
    }
}

/// Development server section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerSpec {
    /// When hot module replacement is on.
    #[serde(default = "default_hot")]
    pub hot: EnabledWhen,

    #[serde(default = "default_dev_server_port")]
    pub port: u16,

    /// Directory served as static content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    pub compress: bool,
}

impl Default for DevServerSpec {
    fn default() -> Self {
        Self {
            hot: default_hot(),
            port: default_dev_server_port(),
            static_dir: None,
            compress: false,
        }
    }
}

/// Which chunks a cache group draws modules from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChunkSelection {
    #[default]
    Async,
    Initial,
    All,
}

/// A split-chunk cache group: modules matching `test` go to chunk `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheGroupSpec {
    pub name: String,
    pub test: String,
    pub chunks: ChunkSelection,
    /// Ignore size/count thresholds and always create the chunk.
    pub enforce: bool,
}

/// Optimization section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationSpec {
    #[serde(default = "default_true")]
    pub minimize: bool,
    pub minimizers: Vec<PluginSpec>,
    pub split_chunks: Vec<CacheGroupSpec>,
}

impl Default for OptimizationSpec {
    fn default() -> Self {
        Self {
            minimize: default_true(),
            minimizers: Vec::new(),
            split_chunks: Vec::new(),
        }
    }
}

/// Code transformer section: presets and plugins, both conditional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSpec {
    pub presets: Vec<PluginSpec>,
    pub plugins: Vec<PluginSpec>,
}

// Default value functions for serde
pub(crate) fn default_output_path() -> String {
    "dist".to_string()
}
pub(crate) fn default_target() -> String {
    "web".to_string()
}
pub(crate) fn default_dev_server_port() -> u16 {
    8080
}
pub(crate) fn default_hot() -> EnabledWhen {
    EnabledWhen::Only(vec![Environment::Development])
}
pub(crate) fn default_true() -> bool {
    true
}

/// Default module resolution extensions.
pub fn default_resolve_extensions() -> Vec<String> {
    vec![
        ".js".to_string(),
        ".jsx".to_string(),
        ".ts".to_string(),
        ".tsx".to_string(),
    ]
}
