//! Output formatting module

use anyhow::Result;
use kwic_engine::ConcordanceRow;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single concordance row
    fn format_row(&mut self, row: &ConcordanceRow) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod delimited;
pub mod json;
pub mod markdown;
pub mod text;

pub use delimited::DelimitedFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned keyword-in-context lines
    #[default]
    Text,
    /// JSON array of rows
    Json,
    /// Comma-separated values with a header row
    Csv,
    /// Tab-separated values with a header row
    Tsv,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    /// All formats, in listing order
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Csv,
        OutputFormat::Tsv,
        OutputFormat::Markdown,
    ];

    /// Name accepted on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "aligned keyword-in-context lines",
            OutputFormat::Json => "JSON array of rows with all columns",
            OutputFormat::Csv => "comma-separated values with a header row",
            OutputFormat::Tsv => "tab-separated values with a header row",
            OutputFormat::Markdown => "markdown table",
        }
    }
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<W>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Csv => Box::new(DelimitedFormatter::csv(writer)),
        OutputFormat::Tsv => Box::new(DelimitedFormatter::tsv(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use kwic_engine::{concordance, ConcordanceRow, Corpus, Document, KwicConfig, PatternSpec};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Writer whose contents stay readable after the formatter is dropped
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn sample_rows() -> Vec<ConcordanceRow> {
        let corpus = Corpus::new().with(
            Document::new("fox.txt", "the quick brown fox the lazy dog").with_metadata("year", "1900"),
        );
        concordance(&corpus, &PatternSpec::literal("the"), KwicConfig::words(1))
            .unwrap()
            .table
            .into_rows()
    }

    #[test]
    fn test_format_names_round_trip() {
        use super::OutputFormat;
        use clap::ValueEnum;

        for format in OutputFormat::ALL {
            let parsed = OutputFormat::from_str(format.name(), true).unwrap();
            assert_eq!(parsed, format);
        }
    }
}
