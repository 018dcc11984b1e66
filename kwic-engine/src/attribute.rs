//! Auxiliary-attribute recovery through an oversized window
//!
//! Some attributes of a match are recorded far before it, such as the speaker
//! marker `<HAMLET>` opening a speech. A recovery re-extracts each match with
//! a much larger preceding window, reads the raw document text that window
//! covers and applies a [`MarkerGrammar`] to it. Raw text is used because the
//! word segmenter drops the delimiters. In word mode the covered text also
//! takes in the gap before the first window unit, where an opening delimiter
//! sits.
//!
//! Values are computed over the same match spans as the normal rows and are
//! joined back onto them by position.

use kwic_core::{MarkerGrammar, MatchSpan, Unit, UnitMode, WindowExtractor};

/// Default oversized context for speaker recovery, in units
pub const DEFAULT_SPEAKER_CONTEXT: usize = 200;

/// Column name used by [`AttributeRecovery::speaker`]
pub const SPEAKER_COLUMN: &str = "speaker";

/// One attribute recovered from an oversized preceding window
#[derive(Debug, Clone)]
pub struct AttributeRecovery {
    column: String,
    context_size: usize,
    grammar: MarkerGrammar,
}

impl AttributeRecovery {
    /// Create a recovery storing its value in `column`
    pub fn new(column: impl Into<String>, context_size: usize, grammar: MarkerGrammar) -> Self {
        Self {
            column: column.into(),
            context_size,
            grammar,
        }
    }

    /// Speaker recovery into the `speaker` column
    pub fn speaker(grammar: MarkerGrammar, context_size: usize) -> Self {
        Self::new(SPEAKER_COLUMN, context_size, grammar)
    }

    /// Column receiving the value
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Oversized context size, in units of the extraction mode
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Marker grammar applied to the window
    pub fn grammar(&self) -> &MarkerGrammar {
        &self.grammar
    }

    /// Recover one value per span, in span order
    pub fn recover(
        &self,
        text: &str,
        units: &[Unit<'_>],
        spans: &[MatchSpan],
        mode: UnitMode,
    ) -> Vec<Option<String>> {
        let extractor = WindowExtractor::new(self.context_size, mode);
        spans
            .iter()
            .map(|span| {
                let window = extractor.extract(text, units, span);
                let start = match mode {
                    UnitMode::Word => {
                        let first = span.start_unit - window.preceding_units;
                        first.checked_sub(1).map_or(0, |prev| units[prev].end)
                    }
                    UnitMode::Character => window.preceding_start,
                };
                let covered = &text[start..span.start_offset];
                self.grammar.last_marker(covered).map(str::to_string)
            })
            .collect()
    }
}
