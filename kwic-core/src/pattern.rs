//! Pattern specifications and the left-to-right matcher
//!
//! A [`PatternSpec`] is compiled once into a [`PatternMatcher`]. Compilation
//! is where every pattern error surfaces; scanning itself cannot fail.
//!
//! In word mode literals and phrases compare whole units and a regex is
//! tested against each unit on its own, so a regex match is always a
//! single word. Literal and phrase targets are segmented like documents,
//! so `"be, or"` looks for the units `be` `or` and `"e-mail"` for `e` `mail`. Regex spans covering several words are not supported.
//! In character mode literals and phrases compare runs of characters and
//! a regex runs over the document text, each match covering the
//! characters it spans.

use crate::error::{CoreError, Result};
use crate::segment::{Segmenter, WordSegmenter};
use crate::types::{MatchSpan, Unit, UnitMode};
use core::fmt;
use regex::{Regex, RegexBuilder};

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "value", rename_all = "lowercase")
)]
pub enum PatternSpec {
    /// A single word
    Literal(String),
    /// An ordered sequence of words that must appear contiguously
    Phrase(Vec<String>),
    /// A regular expression with its own case sensitivity
    Regex {
        /// Regex source
        pattern: String,
        /// Whether the regex distinguishes case
        case_sensitive: bool,
    },
}

impl PatternSpec {
    /// Create a literal pattern
    pub fn literal(word: impl Into<String>) -> Self {
        PatternSpec::Literal(word.into())
    }

    /// Create a phrase pattern by splitting `text` on whitespace
    pub fn phrase(text: &str) -> Self {
        PatternSpec::Phrase(text.split_whitespace().map(str::to_string).collect())
    }

    /// Create a phrase pattern from explicit words
    pub fn phrase_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PatternSpec::Phrase(words.into_iter().map(Into::into).collect())
    }

    /// Create a regex pattern
    pub fn regex(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        PatternSpec::Regex {
            pattern: pattern.into(),
            case_sensitive,
        }
    }

    /// Short name of the pattern kind
    pub fn kind(&self) -> &'static str {
        match self {
            PatternSpec::Literal(_) => "literal",
            PatternSpec::Phrase(_) => "phrase",
            PatternSpec::Regex { .. } => "regex",
        }
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSpec::Literal(word) => write!(f, "{word}"),
            PatternSpec::Phrase(words) => write!(f, "{}", words.join(" ")),
            PatternSpec::Regex { pattern, .. } => write!(f, "/{pattern}/"),
        }
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    /// Normalized targets, one per unit
    Terms {
        terms: Vec<String>,
        case_sensitive: bool,
    },
    Regex(Regex),
}

/// A compiled pattern bound to a unit mode
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    compiled: Compiled,
    mode: UnitMode,
}

impl PatternMatcher {
    /// Compile `spec` for `mode`
    ///
    /// `case_sensitive` applies to literals and phrases; a regex carries its
    /// own flag.
    pub fn new(spec: &PatternSpec, mode: UnitMode, case_sensitive: bool) -> Result<Self> {
        let compiled = match spec {
            PatternSpec::Literal(word) => {
                let word = word.trim();
                if word.is_empty() {
                    return Err(CoreError::invalid_pattern(word, "literal is empty"));
                }
                if mode == UnitMode::Word && word.contains(char::is_whitespace) {
                    return Err(CoreError::invalid_pattern(
                        word,
                        "a literal must be a single word; use a phrase",
                    ));
                }
                Compiled::Terms {
                    terms: terms_for(&[word], mode, case_sensitive)?,
                    case_sensitive,
                }
            }
            PatternSpec::Phrase(words) => {
                let words: Vec<&str> = words
                    .iter()
                    .map(|w| w.trim())
                    .filter(|w| !w.is_empty())
                    .collect();
                if words.is_empty() {
                    return Err(CoreError::invalid_pattern("", "phrase has no words"));
                }
                Compiled::Terms {
                    terms: terms_for(&words, mode, case_sensitive)?,
                    case_sensitive,
                }
            }
            PatternSpec::Regex {
                pattern,
                case_sensitive,
            } => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(!case_sensitive)
                    .build()
                    .map_err(|e| CoreError::invalid_pattern(pattern.as_str(), e))?;
                Compiled::Regex(regex)
            }
        };

        Ok(Self { compiled, mode })
    }

    /// Unit mode the pattern was compiled for
    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    /// Lazily scan `units` of `text` from left to right
    ///
    /// Every call starts a fresh scan.
    pub fn find_iter<'a>(&'a self, text: &'a str, units: &'a [Unit<'a>]) -> Matches<'a> {
        let state = match (&self.compiled, self.mode) {
            (Compiled::Regex(regex), UnitMode::Character) => {
                ScanState::TextRegex(regex.find_iter(text))
            }
            _ => ScanState::Units { pos: 0 },
        };

        Matches {
            matcher: self,
            units,
            state,
        }
    }

    /// Collect every match of the pattern
    pub fn find_all(&self, text: &str, units: &[Unit<'_>]) -> Vec<MatchSpan> {
        self.find_iter(text, units).collect()
    }

    fn span(&self, units: &[Unit<'_>], start: usize, end: usize) -> MatchSpan {
        let matched_text = units[start..end]
            .iter()
            .map(|u| u.text)
            .collect::<Vec<_>>()
            .join(self.mode.separator());

        MatchSpan {
            start_unit: start,
            end_unit: end,
            start_offset: units[start].start,
            end_offset: units[end - 1].end,
            matched_text,
        }
    }
}

/// Build the per-unit targets for literal and phrase patterns
///
/// Word targets go through the word segmenter; a target left with no word
/// units (only punctuation) is rejected.
fn terms_for(words: &[&str], mode: UnitMode, case_sensitive: bool) -> Result<Vec<String>> {
    let normalize = |s: &str| {
        if case_sensitive {
            s.to_string()
        } else {
            fold_case(s)
        }
    };

    let terms: Vec<String> = match mode {
        UnitMode::Word => words
            .iter()
            .flat_map(|w| WordSegmenter.segment(w))
            .map(|unit| normalize(unit.text))
            .collect(),
        UnitMode::Character => words
            .join(" ")
            .chars()
            .map(|c| normalize(&c.to_string()))
            .collect(),
    };

    if terms.is_empty() {
        return Err(CoreError::invalid_pattern(
            words.join(" "),
            "pattern contains no word units",
        ));
    }
    Ok(terms)
}

/// Per-character lowercase mapping used on both sides of a comparison
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn unit_matches(unit: &str, term: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        unit == term
    } else {
        unit.chars().flat_map(char::to_lowercase).eq(term.chars())
    }
}

enum ScanState<'a> {
    Units { pos: usize },
    TextRegex(regex::Matches<'a, 'a>),
}

/// Iterator over the matches of one scan
pub struct Matches<'a> {
    matcher: &'a PatternMatcher,
    units: &'a [Unit<'a>],
    state: ScanState<'a>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = MatchSpan;

    fn next(&mut self) -> Option<MatchSpan> {
        let units = self.units;

        match (&mut self.state, &self.matcher.compiled) {
            (
                ScanState::Units { pos },
                Compiled::Terms {
                    terms,
                    case_sensitive,
                },
            ) => {
                let n = terms.len();
                while *pos + n <= units.len() {
                    let start = *pos;
                    let hit = units[start..start + n]
                        .iter()
                        .zip(terms)
                        .all(|(unit, term)| unit_matches(unit.text, term, *case_sensitive));

                    if hit {
                        // Non-overlapping: resume after the matched run
                        *pos = start + n;
                        return Some(self.matcher.span(units, start, start + n));
                    }
                    *pos += 1;
                }
                *pos = units.len();
                None
            }
            (ScanState::Units { pos }, Compiled::Regex(regex)) => {
                while *pos < units.len() {
                    let idx = *pos;
                    *pos += 1;
                    if regex.is_match(units[idx].text) {
                        return Some(self.matcher.span(units, idx, idx + 1));
                    }
                }
                None
            }
            (ScanState::TextRegex(found), _) => {
                for m in found.by_ref() {
                    if m.start() == m.end() {
                        continue;
                    }
                    let start = units.partition_point(|u| u.start < m.start());
                    let end = units.partition_point(|u| u.start < m.end());
                    if start < end {
                        return Some(self.matcher.span(units, start, end));
                    }
                }
                None
            }
        }
    }
}
