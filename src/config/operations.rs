//! Definition loading, validation, and serialization.

use super::model::BuildDefinition;
use crate::error::{BuildplanError, Result};
use std::path::Path;

/// Default definition filename looked up in the working directory.
pub const DEFAULT_DEFINITION_FILE: &str = "buildplan.yaml";

impl BuildDefinition {
    /// Load a definition from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildDefinition)` - Successfully loaded and validated definition
    /// * `Err(BuildplanError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BuildplanError::UserError(format!(
                "failed to read definition file '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "loaded definition file");
        Self::from_yaml(&content)
    }

    /// Parse a definition from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: BuildDefinition = serde_yaml::from_str(yaml).map_err(|e| {
            BuildplanError::UserError(format!("failed to parse definition YAML: {}", e))
        })?;

        definition.validate()?;
        Ok(definition)
    }

    /// Serialize the definition to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BuildplanError::UserError(format!("failed to serialize definition to YAML: {}", e))
        })
    }

    /// Validate non-rule fields.
    ///
    /// Rules and plugins are checked by the resolver, which fails with
    /// `ConfigValidationError`. Here:
    /// - `dev_server.port` must be positive
    /// - `resolve_extensions` entries must be non-empty and start with a dot
    /// - every entry chunk must list at least one module
    pub fn validate(&self) -> Result<()> {
        if self.dev_server.port == 0 {
            return Err(BuildplanError::UserError(
                "definition validation failed: dev_server.port must be greater than 0".to_string(),
            ));
        }

        for ext in &self.resolve_extensions {
            if ext.is_empty() {
                return Err(BuildplanError::UserError(
                    "definition validation failed: resolve_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if !ext.starts_with('.') {
                return Err(BuildplanError::UserError(format!(
                    "definition validation failed: resolve_extensions entries must start with a dot (found '{}'). Use '.{}' instead.",
                    ext, ext
                )));
            }
        }

        for (name, modules) in &self.entry {
            if modules.is_empty() {
                return Err(BuildplanError::UserError(format!(
                    "definition validation failed: entry '{}' must list at least one module",
                    name
                )));
            }
        }

        Ok(())
    }
}
