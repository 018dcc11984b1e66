//! Layered error types

use kwic_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error (invalid pattern, invalid unit mode)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration rejected at call entry
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A document failed while strict mode was on
    #[error("document '{document}' failed: {reason}")]
    Document {
        /// Name of the failing document
        document: String,
        /// Why the document failed
        reason: String,
    },

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),
}

impl EngineError {
    /// Whether the error is a pattern compilation failure
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, EngineError::Core(CoreError::InvalidPattern { .. }))
    }

    /// Whether the error is a configuration failure from either layer
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfiguration(_)
                | EngineError::Core(CoreError::InvalidConfiguration(_))
        )
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: EngineError = CoreError::InvalidPattern {
            pattern: "(".into(),
            reason: "unclosed group".into(),
        }
        .into();
        assert!(err.is_invalid_pattern());
        assert!(!err.is_invalid_configuration());
        assert_eq!(err.to_string(), "invalid pattern '(': unclosed group");
    }

    #[test]
    fn test_document_error_display() {
        let err = EngineError::Document {
            document: "a.txt".into(),
            reason: "invalid UTF-8".into(),
        };
        assert_eq!(err.to_string(), "document 'a.txt' failed: invalid UTF-8");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(EngineError::InvalidConfiguration("x".into()).is_invalid_configuration());
        assert!(
            EngineError::Core(CoreError::InvalidConfiguration("x".into()))
                .is_invalid_configuration()
        );
    }
}
