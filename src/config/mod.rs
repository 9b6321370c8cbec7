//! Build definition model for buildplan.
//!
//! This module defines the BuildDefinition struct that represents `buildplan.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional sections, and validation of non-rule fields.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::BuildDefinition;
pub use operations::DEFAULT_DEFINITION_FILE;
pub use types::{
    CacheGroupSpec, ChunkSelection, DevServerSpec, EnabledWhen, EnforceOrder, LoaderStep,
    OptimizationSpec, OutputSpec, PerEnvironment, PluginSpec, RuleSpec, ToolOptions,
    TransformSpec,
};
