//! Core error types (deterministic only)

use thiserror::Error;

/// Core algorithm errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The pattern could not be compiled or is empty
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Why the pattern was rejected
        reason: String,
    },

    /// A configuration value was rejected
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CoreError {
    pub(crate) fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = CoreError::invalid_pattern("(", "unclosed group");
        assert_eq!(err.to_string(), "invalid pattern '(': unclosed group");
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = CoreError::InvalidConfiguration("unknown unit mode 'line'".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown unit mode 'line'"
        );
    }
}
