//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::ExecutionMode;
use kwic_core::UnitMode;

/// Default configuration constants
pub mod defaults {
    /// Context size when none is given
    pub const CONTEXT_SIZE: usize = 5;

    /// Corpus size in bytes from which adaptive mode goes parallel (1MB)
    pub const PARALLEL_THRESHOLD: usize = 1024 * 1024;
}

/// Immutable extraction configuration threaded into every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KwicConfig {
    pub(crate) unit_mode: UnitMode,
    pub(crate) context_size: usize,
    pub(crate) case_sensitive: bool,
    pub(crate) strict: bool,
    pub(crate) execution_mode: ExecutionMode,
    pub(crate) threads: Option<usize>,
    pub(crate) parallel_threshold: usize,
}

impl KwicConfig {
    /// Create a configuration builder
    pub fn builder() -> KwicConfigBuilder {
        KwicConfigBuilder::default()
    }

    /// Word windows of `context_size` words, other settings at their defaults
    pub fn words(context_size: usize) -> Self {
        Self::with_mode(UnitMode::Word, context_size)
    }

    /// Character windows of `context_size` characters, other settings at their defaults
    pub fn characters(context_size: usize) -> Self {
        Self::with_mode(UnitMode::Character, context_size)
    }

    fn with_mode(unit_mode: UnitMode, context_size: usize) -> Self {
        Self {
            unit_mode,
            context_size,
            case_sensitive: false,
            strict: false,
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: defaults::PARALLEL_THRESHOLD,
        }
    }

    /// What a unit is
    pub fn unit_mode(&self) -> UnitMode {
        self.unit_mode
    }

    /// Units of context on each side of a match
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Whether literals and phrases distinguish case
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether the first failing document aborts the call
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Execution strategy selector
    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Worker threads for parallel execution (None = rayon default)
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Corpus size in bytes from which adaptive mode goes parallel
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Copy of this configuration with another execution mode
    pub fn with_execution_mode(&self, mode: ExecutionMode) -> Self {
        Self {
            execution_mode: mode,
            ..self.clone()
        }
    }
}

/// Fluent builder for [`KwicConfig`]
///
/// The unit mode has no default and must be set.
#[derive(Debug, Default, Clone)]
pub struct KwicConfigBuilder {
    unit_mode: Option<String>,
    context_size: Option<i64>,
    case_sensitive: bool,
    strict: bool,
    execution_mode: Option<ExecutionMode>,
    threads: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl KwicConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit mode by name (`word` or `character`)
    pub fn unit_mode(mut self, mode: impl Into<String>) -> Self {
        self.unit_mode = Some(mode.into());
        self
    }

    /// Set the unit mode
    pub fn mode(mut self, mode: UnitMode) -> Self {
        self.unit_mode = Some(mode.as_str().to_string());
        self
    }

    /// Set the context size; negative values are rejected by [`build`](Self::build)
    pub fn context_size(mut self, size: i64) -> Self {
        self.context_size = Some(size);
        self
    }

    /// Distinguish case in literals and phrases
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Abort on the first failing document instead of skipping it
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = Some(mode);
        self
    }

    /// Set the number of threads (None = all available)
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.threads = count;
        self
    }

    /// Set the adaptive parallel threshold in bytes
    pub fn parallel_threshold(mut self, bytes: usize) -> Self {
        self.parallel_threshold = Some(bytes);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<KwicConfig> {
        let unit_mode = match self.unit_mode {
            Some(name) => name.parse::<UnitMode>()?,
            None => {
                return Err(EngineError::InvalidConfiguration(
                    "unit mode must be set explicitly ('word' or 'character')".into(),
                ))
            }
        };

        let context_size = match self.context_size {
            Some(size) if size < 0 => {
                return Err(EngineError::InvalidConfiguration(format!(
                    "context size must be non-negative, got {size}"
                )))
            }
            Some(size) => usize::try_from(size).map_err(|_| {
                EngineError::InvalidConfiguration(format!("context size {size} is too large"))
            })?,
            None => defaults::CONTEXT_SIZE,
        };

        if self.threads == Some(0) {
            return Err(EngineError::InvalidConfiguration(
                "threads must be greater than 0".into(),
            ));
        }

        Ok(KwicConfig {
            unit_mode,
            context_size,
            case_sensitive: self.case_sensitive,
            strict: self.strict,
            execution_mode: self.execution_mode.unwrap_or(ExecutionMode::Adaptive),
            threads: self.threads,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults::PARALLEL_THRESHOLD),
        })
    }
}
