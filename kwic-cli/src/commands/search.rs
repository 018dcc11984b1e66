//! Search command implementation

use crate::config::{CliConfig, SpeakerConfig};
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use kwic_engine::{
    ConcordanceBuilder, Corpus, DerivedKey, EngineError, ExecutionMode, KwicConfig, PatternSpec,
    DEFAULT_SPEAKER_CONTEXT,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Word, phrase or regular expression to search for
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: String,

    /// Treat the pattern as a whitespace-separated phrase
    #[arg(long, conflicts_with = "regex")]
    pub phrase: bool,

    /// Treat the pattern as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Unit mode: word or character
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub unit_mode: Option<String>,

    /// Units of context on each side of a match
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub context: Option<i64>,

    /// Distinguish upper and lower case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Fail on the first unreadable document instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Order rows by the frequency of a derived key (following, preceding, keyword)
    #[arg(long, value_name = "KEY", value_parser = parse_key)]
    pub group_by: Option<DerivedKey>,

    /// Opening delimiter of speaker markers
    #[arg(long, value_name = "DELIM", requires = "speaker_close")]
    pub speaker_open: Option<String>,

    /// Closing delimiter of speaker markers
    #[arg(long, value_name = "DELIM", requires = "speaker_open")]
    pub speaker_close: Option<String>,

    /// Units searched backwards for a speaker marker
    #[arg(long, value_name = "N")]
    pub speaker_context: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force parallel processing even for small corpora
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_key(s: &str) -> std::result::Result<DerivedKey, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

impl SearchArgs {
    /// Execute the search command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting concordance search");
        log::debug!("Arguments: {:?}", self);

        let file_config = CliConfig::load_or_default(self.config.as_deref())?;
        let config = self.kwic_config(&file_config)?;
        let pattern = self.pattern_spec(config.case_sensitive());

        let mut builder = ConcordanceBuilder::new(&pattern, config)?;
        if let Some(speaker) = self.speaker_config(&file_config) {
            builder = builder.with_attribute(speaker.recovery()?);
        }

        let corpus = self.load_corpus()?;
        let mut output = builder.build(&corpus)?;

        if let Some(key) = self.group_by {
            let counts = output.table.group_by_frequency(key);
            log::info!("{} distinct '{}' keys", counts.len(), key);
        }

        let format = self.format.unwrap_or(file_config.output.format);
        let pretty_json = file_config.output.pretty_json;
        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                create_formatter(format, BufWriter::new(file), pretty_json)
            }
            None => create_formatter(format, io::stdout(), pretty_json),
        };

        for row in output.table.iter() {
            formatter.format_row(row)?;
        }
        formatter.finish()?;

        Ok(())
    }

    /// Merge flags over the configuration file into an engine configuration
    pub fn kwic_config(&self, file: &CliConfig) -> Result<KwicConfig> {
        let mut builder = KwicConfig::builder()
            .case_sensitive(self.case_sensitive || file.search.case_sensitive)
            .strict(self.strict || file.search.strict)
            .threads(self.threads.or(file.performance.threads))
            .parallel_threshold(file.performance.parallel_threshold_kb.saturating_mul(1024));

        if let Some(mode) = self.unit_mode.as_ref().or(file.search.unit_mode.as_ref()) {
            builder = builder.unit_mode(mode.as_str());
        }
        if let Some(context) = self.context.or(file.search.context) {
            builder = builder.context_size(context);
        }
        if self.parallel {
            builder = builder.execution_mode(ExecutionMode::Parallel);
        }

        Ok(builder.build()?)
    }

    /// Pattern described by the flags
    pub fn pattern_spec(&self, case_sensitive: bool) -> PatternSpec {
        super::pattern_spec(&self.pattern, self.phrase, self.regex, case_sensitive)
    }

    /// Speaker recovery from the flags, falling back to the configuration file
    pub fn speaker_config(&self, file: &CliConfig) -> Option<SpeakerConfig> {
        match (&self.speaker_open, &self.speaker_close) {
            (Some(open), Some(close)) => Some(SpeakerConfig {
                open: open.clone(),
                close: close.clone(),
                context: self.speaker_context.unwrap_or(DEFAULT_SPEAKER_CONTEXT),
            }),
            _ => file.speaker.as_ref().map(|speaker| SpeakerConfig {
                open: speaker.open.clone(),
                close: speaker.close.clone(),
                context: self.speaker_context.unwrap_or(speaker.context),
            }),
        }
    }

    fn load_corpus(&self) -> Result<Corpus> {
        let files = resolve_patterns(&self.input)?;

        let total_bytes = files
            .iter()
            .map(|path| FileReader::file_size(path))
            .sum::<Result<u64>>()?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_corpus(files.len(), total_bytes);

        let mut corpus = Corpus::new();
        for path in &files {
            let document = FileReader::read_document(path)?;
            progress.document_loaded(&path.display().to_string(), document.len() as u64);
            corpus.push(document);
        }
        progress.finish();

        log::info!(
            "Loaded {} files ({} bytes)",
            corpus.len(),
            corpus.total_bytes()
        );
        Ok(corpus)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run more than once in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use kwic_engine::UnitMode;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SearchArgs,
    }

    fn parse(args: &[&str]) -> SearchArgs {
        let mut argv = vec!["kwic", "-i", "a.txt", "-p", "the"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_flags_build_config() {
        let args = parse(&["-m", "word", "-c", "3", "--case-sensitive", "--parallel", "-t", "2"]);
        let config = args.kwic_config(&CliConfig::default()).unwrap();

        assert_eq!(config.unit_mode(), UnitMode::Word);
        assert_eq!(config.context_size(), 3);
        assert!(config.case_sensitive());
        assert_eq!(config.execution_mode(), ExecutionMode::Parallel);
        assert_eq!(config.threads(), Some(2));
    }

    #[test]
    fn test_flags_override_file() {
        let file = CliConfig::parse("[search]\nunit_mode = \"character\"\ncontext = 10\n").unwrap();

        let config = parse(&[]).kwic_config(&file).unwrap();
        assert_eq!(config.unit_mode(), UnitMode::Character);
        assert_eq!(config.context_size(), 10);

        let config = parse(&["-m", "word", "-c", "2"]).kwic_config(&file).unwrap();
        assert_eq!(config.unit_mode(), UnitMode::Word);
        assert_eq!(config.context_size(), 2);
    }

    #[test]
    fn test_missing_unit_mode_is_an_error() {
        let err = parse(&[]).kwic_config(&CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unit mode"));
    }

    #[test]
    fn test_negative_context_is_rejected() {
        let err = parse(&["-m", "word", "-c", "-1"])
            .kwic_config(&CliConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_pattern_kinds() {
        assert_eq!(parse(&[]).pattern_spec(false), PatternSpec::literal("the"));
        assert_eq!(
            parse(&["--phrase"]).pattern_spec(false),
            PatternSpec::phrase("the")
        );
        assert_eq!(
            parse(&["--regex"]).pattern_spec(true),
            PatternSpec::regex("the", true)
        );
        assert!(TestCli::try_parse_from(["kwic", "-i", "a", "-p", "x", "--phrase", "--regex"]).is_err());
    }

    #[test]
    fn test_group_by_parses_keys() {
        assert_eq!(
            parse(&["--group-by", "following"]).group_by,
            Some(DerivedKey::FollowingWord)
        );
        assert!(TestCli::try_parse_from(["kwic", "-i", "a", "-p", "x", "--group-by", "speaker"]).is_err());
    }

    #[test]
    fn test_speaker_flags_require_both_delimiters() {
        assert!(TestCli::try_parse_from(["kwic", "-i", "a", "-p", "x", "--speaker-open", "<"]).is_err());

        let args = parse(&["--speaker-open", "<", "--speaker-close", ">"]);
        let speaker = args.speaker_config(&CliConfig::default()).unwrap();
        assert_eq!(speaker.context, DEFAULT_SPEAKER_CONTEXT);
    }

    #[test]
    fn test_speaker_from_file() {
        let file = CliConfig::parse("[speaker]\nopen = \"[\"\nclose = \"]\"\ncontext = 40\n").unwrap();
        let speaker = parse(&[]).speaker_config(&file).unwrap();
        assert_eq!(speaker.open, "[");
        assert_eq!(speaker.context, 40);

        assert!(parse(&[]).speaker_config(&CliConfig::default()).is_none());
    }
}
