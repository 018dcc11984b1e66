//! Processing report returned alongside the table

use crate::executor::ExecutionMode;
use std::time::Duration;

/// A document skipped during extraction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentWarning {
    /// Name of the skipped document
    pub document: String,
    /// Why it was skipped
    pub reason: String,
}

/// Summary of one extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingReport {
    /// Documents that produced rows (possibly zero)
    pub documents_processed: usize,
    /// Documents skipped because they could not be processed
    pub documents_skipped: usize,
    /// One entry per skipped document, in document order
    pub warnings: Vec<DocumentWarning>,
    /// Number of rows in the table
    pub total_matches: usize,
    /// Wall-clock time of the call
    pub duration: Duration,
    /// Strategy actually used (never adaptive)
    pub execution_mode: ExecutionMode,
}

impl ProcessingReport {
    /// Whether any document was skipped
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Documents seen, processed or skipped
    pub fn documents_total(&self) -> usize {
        self.documents_processed + self.documents_skipped
    }
}

impl Default for ProcessingReport {
    fn default() -> Self {
        Self {
            documents_processed: 0,
            documents_skipped: 0,
            warnings: Vec::new(),
            total_matches: 0,
            duration: Duration::ZERO,
            execution_mode: ExecutionMode::Sequential,
        }
    }
}
