//! BuildDefinition struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The static build definition.
///
/// This struct represents the contents of `buildplan.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDefinition {
    // =========================================================================
    // Entry and output
    // =========================================================================
    /// Named entry chunks, each an ordered list of modules.
    pub entry: BTreeMap<String, Vec<String>>,

    pub output: OutputSpec,

    /// Source map style (e.g. `source-map`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    /// Extensions tried when resolving bare module imports.
    #[serde(default = "default_resolve_extensions")]
    pub resolve_extensions: Vec<String>,

    // =========================================================================
    // Processing
    // =========================================================================
    /// Module rules, in declaration order.
    pub rules: Vec<RuleSpec>,

    /// Bundler plugins, in declaration order.
    pub plugins: Vec<PluginSpec>,

    pub optimization: OptimizationSpec,

    pub transform: TransformSpec,

    // =========================================================================
    // Development server
    // =========================================================================
    pub dev_server: DevServerSpec,
}

impl Default for BuildDefinition {
    fn default() -> Self {
        Self {
            entry: BTreeMap::new(),
            output: OutputSpec::default(),
            devtool: None,
            resolve_extensions: default_resolve_extensions(),
            rules: Vec::new(),
            plugins: Vec::new(),
            optimization: OptimizationSpec::default(),
            transform: TransformSpec::default(),
            dev_server: DevServerSpec::default(),
        }
    }
}
