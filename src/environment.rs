//! Build environment selection.
//!
//! The environment is fixed for one invocation and read from `NODE_ENV`
//! unless the caller supplies it explicitly.

use crate::error::{BuildplanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process environment variable the environment is sourced from.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Deployment mode governing conditional configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Every environment, in a fixed order.
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Production,
        Environment::Test,
    ];

    /// Parse an environment name (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Parse an environment name supplied by the user, failing with a hint.
    pub fn parse_arg(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| {
            BuildplanError::UserError(format!(
                "unknown environment '{}' (expected development, production or test)",
                s
            ))
        })
    }

    /// Map a `NODE_ENV` value to an environment.
    ///
    /// Only `production` and `test` select those modes; any other value,
    /// including an unset variable, falls back to development. That fallback
    /// drives every condition too, so development-only plugins and hot
    /// reload are on when `NODE_ENV` is unset.
    pub fn from_node_env(value: Option<&str>) -> Self {
        value
            .and_then(Self::from_str)
            .unwrap_or(Self::Development)
    }

    /// Read the environment from the `NODE_ENV` process variable.
    pub fn from_process_env() -> Self {
        let value = std::env::var(NODE_ENV_VAR).ok();
        Self::from_node_env(value.as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
