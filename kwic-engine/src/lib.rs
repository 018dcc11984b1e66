//! Corpus orchestration for keyword-in-context concordances
//!
//! This crate runs the algorithms of `kwic-core` over a whole corpus. It owns
//! configuration, execution strategies, the concordance table, derived-key
//! grouping and attribute recovery.
//!
//! # Example
//!
//! ```rust
//! use kwic_engine::{concordance, Corpus, DerivedKey, KwicConfig, PatternSpec};
//!
//! let corpus: Corpus = vec![
//!     ("a.txt", "the cat sat on the mat"),
//!     ("b.txt", "the cat ran"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut output = concordance(&corpus, &PatternSpec::literal("the"), KwicConfig::words(1)).unwrap();
//! assert_eq!(output.table.len(), 3);
//!
//! let counts = output.table.group_by_frequency(DerivedKey::FollowingWord);
//! assert_eq!(counts.get("cat"), 2);
//! assert_eq!(output.table.rows()[0].following, "cat");
//! ```

#![warn(missing_docs)]

pub mod attribute;
pub mod builder;
pub mod config;
pub mod corpus;
pub mod error;
pub mod executor;
pub mod grouping;
pub mod report;
pub mod table;

// Re-export key types
pub use attribute::{AttributeRecovery, DEFAULT_SPEAKER_CONTEXT, SPEAKER_COLUMN};
pub use builder::{concordance, ConcordanceBuilder, Output};
pub use config::{KwicConfig, KwicConfigBuilder};
pub use corpus::{Corpus, Document, DocumentText};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use grouping::{DerivedKey, KeyCounts, FREQUENCY_COLUMN};
pub use report::{DocumentWarning, ProcessingReport};
pub use table::{
    is_reserved_column, metadata_column, ConcordanceRow, ConcordanceTable, FieldValue,
    FIXED_COLUMNS, METADATA_PREFIX,
};

// Re-export from core for convenience
pub use kwic_core::{CoreError, MarkerGrammar, PatternSpec, UnitMode};
