//! Unit model: splitting documents into addressable units
//!
//! Segmentation is deterministic and total. Word units follow the Unicode
//! word boundary rules (UAX #29) and drop the whitespace and punctuation
//! between words; character units map one-to-one onto `char`s.

use crate::types::{Unit, UnitMode};
use unicode_segmentation::UnicodeSegmentation;

/// Splits a document into an ordered sequence of units
pub trait Segmenter: Send + Sync {
    /// Segment `text` into units in document order
    fn segment<'a>(&self, text: &'a str) -> Vec<Unit<'a>>;

    /// The mode this segmenter implements
    fn mode(&self) -> UnitMode;
}

/// Word-level segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSegmenter;

impl Segmenter for WordSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Unit<'a>> {
        text.unicode_word_indices()
            .map(|(start, word)| Unit::new(word, start))
            .collect()
    }

    fn mode(&self) -> UnitMode {
        UnitMode::Word
    }
}

/// Character-level segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Unit<'a>> {
        text.char_indices()
            .map(|(start, ch)| Unit::new(&text[start..start + ch.len_utf8()], start))
            .collect()
    }

    fn mode(&self) -> UnitMode {
        UnitMode::Character
    }
}

static WORDS: WordSegmenter = WordSegmenter;
static CHARS: CharSegmenter = CharSegmenter;

/// Get the segmenter for a unit mode
pub fn segmenter_for(mode: UnitMode) -> &'static dyn Segmenter {
    match mode {
        UnitMode::Word => &WORDS,
        UnitMode::Character => &CHARS,
    }
}

/// Segment `text` with the segmenter for `mode`
pub fn segment(text: &str, mode: UnitMode) -> Vec<Unit<'_>> {
    segmenter_for(mode).segment(text)
}
