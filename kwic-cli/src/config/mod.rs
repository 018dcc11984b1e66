//! Configuration module
//!
//! Settings come from an optional TOML file; command-line flags override
//! whatever the file sets.

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use kwic_engine::{AttributeRecovery, MarkerGrammar, DEFAULT_SPEAKER_CONTEXT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Speaker recovery, off unless present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<SpeakerConfig>,
}

/// Search-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Unit mode (`word` or `character`); has no default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_mode: Option<String>,

    /// Context size in units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<i64>,

    /// Distinguish case in literals and phrases
    pub case_sensitive: bool,

    /// Abort on the first unreadable document
    pub strict: bool,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Number of worker threads (unset = all cores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Corpus size from which processing goes parallel (KB)
    pub parallel_threshold_kb: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            threads: None,
            parallel_threshold_kb: 1024,
        }
    }
}

/// Speaker recovery configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpeakerConfig {
    /// Opening marker delimiter
    pub open: String,

    /// Closing marker delimiter
    pub close: String,

    /// Oversized context searched for the marker, in units
    #[serde(default = "default_speaker_context")]
    pub context: usize,
}

fn default_speaker_context() -> usize {
    DEFAULT_SPEAKER_CONTEXT
}

impl SpeakerConfig {
    /// Build the attribute recovery for this configuration
    pub fn recovery(&self) -> Result<AttributeRecovery> {
        let grammar = MarkerGrammar::new(self.open.as_str(), self.close.as_str())
            .map_err(|e| CliError::ConfigError(format!("speaker markers: {e}")))?;
        Ok(AttributeRecovery::speaker(grammar, self.context))
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
