//! Error types for buildplan.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for buildplan operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildplanError {
    /// Bad arguments, or a definition file that cannot be read or parsed.
    #[error("{0}")]
    UserError(String),

    /// A rule, plugin or pattern in the definition is malformed, or rule
    /// ordering is ambiguous. Resolution produces no partial result.
    #[error("config validation failed: {0}")]
    ConfigValidationError(String),
}

impl BuildplanError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildplanError::UserError(_) => exit_codes::USER_ERROR,
            BuildplanError::ConfigValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        BuildplanError::ConfigValidationError(msg.into())
    }
}

/// Result type alias for buildplan operations.
pub type Result<T> = std::result::Result<T, BuildplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = BuildplanError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = BuildplanError::validation("rule #1: match pattern must be non-empty");
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = BuildplanError::UserError("failed to read 'buildplan.yaml'".to_string());
        assert_eq!(err.to_string(), "failed to read 'buildplan.yaml'");

        let err = BuildplanError::validation("rule #2: loader sequence must be non-empty");
        assert_eq!(
            err.to_string(),
            "config validation failed: rule #2: loader sequence must be non-empty"
        );
    }
}
