//! Deterministic building blocks for keyword-in-context extraction
//!
//! This crate contains the algorithmic part of a KWIC concordance: it splits
//! a document into units, finds every occurrence of a pattern and cuts a
//! clamped context window around each occurrence. It performs no I/O and
//! holds no state between calls.
//!
//! # Example
//!
//! ```rust
//! use kwic_core::{segment, PatternMatcher, PatternSpec, UnitMode, WindowExtractor};
//!
//! let text = "the quick brown fox the lazy dog";
//! let units = segment(text, UnitMode::Word);
//!
//! let matcher = PatternMatcher::new(&PatternSpec::literal("the"), UnitMode::Word, false).unwrap();
//! let windows = WindowExtractor::new(1, UnitMode::Word);
//!
//! let rows: Vec<_> = matcher
//!     .find_iter(text, &units)
//!     .map(|span| windows.extract(text, &units, &span))
//!     .collect();
//!
//! assert_eq!(rows[0].following_text, "quick");
//! assert_eq!(rows[1].preceding_text, "fox");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod marker;
pub mod pattern;
pub mod segment;
pub mod types;
pub mod window;

pub use error::{CoreError, Result};
pub use marker::MarkerGrammar;
pub use pattern::{Matches, PatternMatcher, PatternSpec};
pub use segment::{segment, segmenter_for, CharSegmenter, Segmenter, WordSegmenter};
pub use types::{ContextWindow, MatchSpan, Unit, UnitMode};
pub use window::WindowExtractor;
