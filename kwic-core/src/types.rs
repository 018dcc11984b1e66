//! Core types for keyword-in-context extraction

use crate::error::{CoreError, Result};
use core::fmt;
use core::str::FromStr;

/// What a single addressable unit of a document is
///
/// The mode decides both how documents are segmented and what the
/// context size of a window counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitMode {
    /// Word tokens; separators between words are discarded
    Word,
    /// Individual characters
    Character,
}

impl UnitMode {
    /// String joining rendered units of this mode
    pub fn separator(&self) -> &'static str {
        match self {
            UnitMode::Word => " ",
            UnitMode::Character => "",
        }
    }

    /// Canonical name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMode::Word => "word",
            UnitMode::Character => "character",
        }
    }
}

impl FromStr for UnitMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "word" | "words" => Ok(UnitMode::Word),
            "character" | "characters" | "char" | "chars" => Ok(UnitMode::Character),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown unit mode '{other}' (expected 'word' or 'character')"
            ))),
        }
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One addressable unit of a document
///
/// Offsets are byte offsets into the document text and always fall on
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    /// The unit text, borrowed from the document
    pub text: &'a str,
    /// Byte offset of the first byte of the unit
    pub start: usize,
    /// Byte offset one past the last byte of the unit
    pub end: usize,
}

impl<'a> Unit<'a> {
    /// Create a unit covering `text[start..start + text.len()]`
    pub fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            start,
            end: start + text.len(),
        }
    }
}

/// A single pattern occurrence inside one document
///
/// `start_unit..end_unit` is a half-open range over the document's units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSpan {
    /// Index of the first matched unit
    pub start_unit: usize,
    /// Index one past the last matched unit
    pub end_unit: usize,
    /// Byte offset where the match starts
    pub start_offset: usize,
    /// Byte offset where the match ends
    pub end_offset: usize,
    /// Matched units joined with the mode separator
    pub matched_text: String,
}

impl MatchSpan {
    /// Number of units covered by the match
    pub fn unit_len(&self) -> usize {
        self.end_unit - self.start_unit
    }
}

/// Clamped context around a match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextWindow {
    /// Units before the match, in document order
    pub preceding_text: String,
    /// Units after the match, in document order
    pub following_text: String,
    /// Number of units in the preceding window
    pub preceding_units: usize,
    /// Number of units in the following window
    pub following_units: usize,
    /// Byte offset where the preceding window starts
    pub preceding_start: usize,
    /// Byte offset where the following window ends
    pub following_end: usize,
}
