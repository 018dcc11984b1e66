//! Delimiter-bounded marker extraction
//!
//! A marker is an identifier wrapped in an opening and a closing delimiter,
//! such as `<HAMLET>` or `[Speaker 2]`. Transcripts and plays record who is
//! speaking this way, so the last marker before a match names its speaker.

use crate::error::{CoreError, Result};
use regex::Regex;

/// Grammar for `open identifier close` markers
#[derive(Debug, Clone)]
pub struct MarkerGrammar {
    open: String,
    close: String,
    regex: Regex,
}

impl MarkerGrammar {
    /// Create a grammar for the given delimiter pair
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "marker delimiters must not be empty".into(),
            ));
        }

        // Identifier: starts with a word character, may contain inner spaces,
        // dots, apostrophes and hyphens.
        let source = format!(
            r"{}\s*([\p{{L}}\p{{N}}_][\p{{L}}\p{{N}}_ .'\-]*?)\s*{}",
            regex::escape(&open),
            regex::escape(&close)
        );
        let regex = Regex::new(&source)
            .map_err(|e| CoreError::InvalidConfiguration(format!("marker grammar: {e}")))?;

        Ok(Self { open, close, regex })
    }

    /// Grammar for `<NAME>` markers
    pub fn angle_brackets() -> Self {
        Self::new("<", ">").expect("angle bracket grammar is valid")
    }

    /// Opening delimiter
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Closing delimiter
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Identifier of the last marker in `text`
    pub fn last_marker<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures_iter(text)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Identifiers of every marker in `text`, in order
    pub fn all_markers<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_marker_wins() {
        let grammar = MarkerGrammar::angle_brackets();
        let text = "<HAMLET> To be, or not to be. <OPHELIA> Good my lord,";
        assert_eq!(grammar.last_marker(text), Some("OPHELIA"));
        assert_eq!(grammar.all_markers(text), vec!["HAMLET", "OPHELIA"]);
    }

    #[test]
    fn test_identifier_with_spaces_and_punctuation() {
        let grammar = MarkerGrammar::new("[", "]").unwrap();
        assert_eq!(
            grammar.last_marker("[ Mr. O'Neil-Smith ] spoke"),
            Some("Mr. O'Neil-Smith")
        );
    }

    #[test]
    fn test_multi_character_delimiters() {
        let grammar = MarkerGrammar::new("<<", ">>").unwrap();
        assert_eq!(grammar.last_marker("<<Q>> yes <<A>> no"), Some("A"));
        assert_eq!(grammar.last_marker("<Q> yes"), None);
    }

    #[test]
    fn test_no_marker() {
        let grammar = MarkerGrammar::angle_brackets();
        assert_eq!(grammar.last_marker("plain text"), None);
        assert_eq!(grammar.last_marker("a < b > c"), Some("b"));
        assert_eq!(grammar.last_marker("<> <  >"), None);
        assert_eq!(grammar.last_marker("<unclosed"), None);
    }

    #[test]
    fn test_empty_delimiters_rejected() {
        assert!(matches!(
            MarkerGrammar::new("", ">"),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }
}
