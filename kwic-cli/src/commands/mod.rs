//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use kwic_engine::PatternSpec;

pub mod generate_config;
pub mod list;
pub mod search;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a keyword-in-context concordance from text files
    Search(search::SearchArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file (and optionally a pattern)
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List unit modes
    Modes,

    /// List available output formats
    Formats,

    /// List grouping keys
    Keys,
}

/// Pattern described by the `--phrase` and `--regex` flags
///
/// Without either flag the pattern is a literal, so a pattern containing
/// whitespace needs `--phrase` in every command that takes one.
pub fn pattern_spec(pattern: &str, phrase: bool, regex: bool, case_sensitive: bool) -> PatternSpec {
    if regex {
        PatternSpec::regex(pattern, case_sensitive)
    } else if phrase {
        PatternSpec::phrase(pattern)
    } else {
        PatternSpec::literal(pattern)
    }
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Search(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}
