//! Context window extraction
//!
//! Windows are clamped at document edges and never padded. Word windows
//! count units of the segmented document; character windows count
//! characters of the raw text around the match offsets. The two policies
//! are computed independently.

use crate::types::{ContextWindow, MatchSpan, Unit, UnitMode};

/// Computes the preceding and following context of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowExtractor {
    size: usize,
    mode: UnitMode,
}

impl WindowExtractor {
    /// Create an extractor taking up to `size` units on each side
    pub fn new(size: usize, mode: UnitMode) -> Self {
        Self { size, mode }
    }

    /// Configured context size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Unit the context size counts
    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    /// Extract the window around `span`
    ///
    /// `units` must be the segmentation of `text` that produced `span`.
    pub fn extract(&self, text: &str, units: &[Unit<'_>], span: &MatchSpan) -> ContextWindow {
        match self.mode {
            UnitMode::Word => self.word_window(units, span),
            UnitMode::Character => self.char_window(text, span),
        }
    }

    fn word_window(&self, units: &[Unit<'_>], span: &MatchSpan) -> ContextWindow {
        let pre_start = span.start_unit.saturating_sub(self.size);
        let post_end = span.end_unit.saturating_add(self.size).min(units.len());

        let preceding = &units[pre_start..span.start_unit];
        let following = &units[span.end_unit..post_end];

        ContextWindow {
            preceding_text: join_units(preceding),
            following_text: join_units(following),
            preceding_units: preceding.len(),
            following_units: following.len(),
            preceding_start: preceding.first().map_or(span.start_offset, |u| u.start),
            following_end: following.last().map_or(span.end_offset, |u| u.end),
        }
    }

    fn char_window(&self, text: &str, span: &MatchSpan) -> ContextWindow {
        let before = &text[..span.start_offset];
        let after = &text[span.end_offset..];

        let (pre_start, preceding_units) = last_chars(before, self.size);
        let (post_len, following_units) = first_chars(after, self.size);

        ContextWindow {
            preceding_text: before[pre_start..].to_string(),
            following_text: after[..post_len].to_string(),
            preceding_units,
            following_units,
            preceding_start: pre_start,
            following_end: span.end_offset + post_len,
        }
    }
}

fn join_units(units: &[Unit<'_>]) -> String {
    units
        .iter()
        .map(|u| u.text)
        .collect::<Vec<_>>()
        .join(UnitMode::Word.separator())
}

/// Byte index where the last `n` chars of `s` begin, and how many were taken
fn last_chars(s: &str, n: usize) -> (usize, usize) {
    let mut start = s.len();
    let mut count = 0;
    for (idx, _) in s.char_indices().rev().take(n) {
        start = idx;
        count += 1;
    }
    (start, count)
}

/// Byte length of the first `n` chars of `s`, and how many were taken
fn first_chars(s: &str, n: usize) -> (usize, usize) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => (idx, n),
        None => (s.len(), s.chars().count()),
    }
}
