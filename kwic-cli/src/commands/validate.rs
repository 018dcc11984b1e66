//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use kwic_engine::{ConcordanceBuilder, KwicConfig, PatternSpec};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Pattern to compile against the configuration
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Treat the pattern as a whitespace-separated phrase
    #[arg(long, requires = "pattern", conflicts_with = "regex")]
    pub phrase: bool,

    /// Treat the pattern as a regular expression
    #[arg(long, requires = "pattern")]
    pub regex: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match self.check() {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Unit mode: {}", config.unit_mode());
                println!("  Context size: {}", config.context_size());
                if let Some(pattern) = &self.pattern {
                    println!("  Pattern: {pattern}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }

    /// Load the file, build the engine configuration and compile the pattern
    fn check(&self) -> Result<KwicConfig> {
        let file = CliConfig::load(&self.config)?;

        let mut builder = KwicConfig::builder()
            .case_sensitive(file.search.case_sensitive)
            .strict(file.search.strict)
            .threads(file.performance.threads);
        if let Some(mode) = &file.search.unit_mode {
            builder = builder.unit_mode(mode.as_str());
        }
        if let Some(context) = file.search.context {
            builder = builder.context_size(context);
        }
        let config = builder.build()?;

        if let Some(speaker) = &file.speaker {
            speaker.recovery()?;
        }

        if let Some(spec) = self.pattern_spec(config.case_sensitive()) {
            ConcordanceBuilder::new(&spec, config.clone())?;
        }

        Ok(config)
    }

    /// Pattern described by the flags, built the same way `search` builds it
    pub fn pattern_spec(&self, case_sensitive: bool) -> Option<PatternSpec> {
        self.pattern
            .as_deref()
            .map(|pattern| super::pattern_spec(pattern, self.phrase, self.regex, case_sensitive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(file: &NamedTempFile, pattern: Option<&str>, regex: bool) -> ValidateArgs {
        ValidateArgs {
            config: file.path().to_path_buf(),
            pattern: pattern.map(String::from),
            phrase: false,
            regex,
        }
    }

    fn phrase_args(file: &NamedTempFile, pattern: &str) -> ValidateArgs {
        ValidateArgs {
            phrase: true,
            ..args(file, Some(pattern), false)
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let file = config_file("[search]\nunit_mode = \"word\"\ncontext = 3\n");
        assert!(args(&file, None, false).execute().is_ok());
        assert!(args(&file, Some("fox"), false).execute().is_ok());
        assert!(phrase_args(&file, "brown fox").execute().is_ok());
        assert!(args(&file, Some("^t"), true).execute().is_ok());
    }

    #[test]
    fn test_multi_word_pattern_needs_phrase_flag() {
        let file = config_file("[search]\nunit_mode = \"word\"\n");
        let err = args(&file, Some("brown fox"), false).execute().unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
        assert!(phrase_args(&file, "brown fox").execute().is_ok());
    }

    #[test]
    fn test_pattern_matches_search_flags() {
        use crate::commands::search::SearchArgs;
        use clap::Parser;

        #[derive(Debug, Parser)]
        struct SearchCli {
            #[command(flatten)]
            args: SearchArgs,
        }

        let file = config_file("[search]\nunit_mode = \"word\"\n");
        let cases = vec![
            (vec![], args(&file, Some("brown fox"), false)),
            (vec!["--phrase"], phrase_args(&file, "brown fox")),
            (vec!["--regex"], args(&file, Some("brown fox"), true)),
        ];
        for (flags, validate) in cases {
            let mut argv = vec!["kwic", "-i", "a.txt", "-p", "brown fox"];
            argv.extend(flags);
            let search = SearchCli::try_parse_from(argv).unwrap().args;
            assert_eq!(validate.pattern_spec(true), Some(search.pattern_spec(true)));
        }
    }

    #[test]
    fn test_validate_missing_unit_mode() {
        let file = config_file("[search]\ncontext = 3\n");
        let err = args(&file, None, false).execute().unwrap_err();
        assert!(err.to_string().contains("unit mode"));
    }

    #[test]
    fn test_validate_negative_context() {
        let file = config_file("[search]\nunit_mode = \"word\"\ncontext = -2\n");
        assert!(args(&file, None, false).execute().is_err());
    }

    #[test]
    fn test_validate_bad_regex() {
        let file = config_file("[search]\nunit_mode = \"character\"\n");
        let err = args(&file, Some("(unclosed"), true).execute().unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn test_validate_bad_speaker() {
        let file = config_file("[search]\nunit_mode = \"word\"\n[speaker]\nopen = \"\"\nclose = \">\"\n");
        assert!(args(&file, None, false).execute().is_err());
    }

    #[test]
    fn test_validate_invalid_toml() {
        let file = config_file("[search\nunit_mode = ");
        assert!(args(&file, None, false).execute().is_err());
    }
}
