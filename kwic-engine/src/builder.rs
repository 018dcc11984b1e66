//! Concordance construction over a corpus
//!
//! [`ConcordanceBuilder`] compiles the pattern once, then runs
//! decode → segment → match → window for every document on the selected
//! executor. Per-document rows are concatenated in document order and only
//! then numbered, so ids do not depend on how the work was scheduled.

use crate::{
    attribute::AttributeRecovery,
    config::KwicConfig,
    corpus::{Corpus, Document},
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    report::{DocumentWarning, ProcessingReport},
    grouping::{DerivedKey, FREQUENCY_COLUMN},
    table::{is_reserved_column, metadata_column, ConcordanceRow, ConcordanceTable, FieldValue},
};
use kwic_core::{segment, PatternMatcher, PatternSpec, WindowExtractor};
use std::collections::BTreeMap;
use std::time::Instant;

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Rich output with the processing report
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Output {
    /// Concordance rows in corpus order
    pub table: ConcordanceTable,
    /// What happened while building the table
    pub report: ProcessingReport,
}

/// Builds concordance tables for one pattern and configuration
#[derive(Debug, Clone)]
pub struct ConcordanceBuilder {
    pattern: PatternSpec,
    matcher: PatternMatcher,
    config: KwicConfig,
    attributes: Vec<AttributeRecovery>,
}

impl ConcordanceBuilder {
    /// Compile `pattern` for `config`
    ///
    /// Fails with an invalid-pattern error before any document is scanned.
    pub fn new(pattern: &PatternSpec, config: KwicConfig) -> Result<Self> {
        let matcher = PatternMatcher::new(pattern, config.unit_mode(), config.case_sensitive())?;
        Ok(Self {
            pattern: pattern.clone(),
            matcher,
            config,
            attributes: Vec::new(),
        })
    }

    /// Add an attribute recovered for every row
    pub fn with_attribute(mut self, recovery: AttributeRecovery) -> Self {
        self.attributes.push(recovery);
        self
    }

    /// The pattern being searched
    pub fn pattern(&self) -> &PatternSpec {
        &self.pattern
    }

    /// The configuration in use
    pub fn config(&self) -> &KwicConfig {
        &self.config
    }

    /// Configured attribute recoveries
    pub fn attributes(&self) -> &[AttributeRecovery] {
        &self.attributes
    }

    /// Build the concordance table for `corpus`
    ///
    /// Fails before scanning when an attribute column is reserved, clashes
    /// with a grouping column or is used twice.
    pub fn build(&self, corpus: &Corpus) -> Result<Output> {
        self.check_attribute_columns()?;
        let started = Instant::now();
        let mode = self.resolve_mode(corpus);
        log::debug!(
            "searching {} documents ({} bytes) for {} in {:?} mode",
            corpus.len(),
            corpus.total_bytes(),
            self.pattern,
            mode
        );

        let job = |document: &Document| self.extract(document);
        let outcomes = match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                ParallelExecutor::new(self.config.threads()).run(corpus.documents(), job)?
            }
            _ => SequentialExecutor.run(corpus.documents(), job)?,
        };

        let mut rows = Vec::new();
        let mut report = ProcessingReport {
            execution_mode: mode,
            ..ProcessingReport::default()
        };

        for (document, outcome) in corpus.iter().zip(outcomes) {
            match outcome {
                Ok(document_rows) => {
                    report.documents_processed += 1;
                    rows.extend(document_rows);
                }
                Err(reason) if self.config.strict() => {
                    return Err(EngineError::Document {
                        document: document.name().to_string(),
                        reason,
                    });
                }
                Err(reason) => {
                    log::warn!("skipping document '{}': {}", document.name(), reason);
                    report.documents_skipped += 1;
                    report.warnings.push(DocumentWarning {
                        document: document.name().to_string(),
                        reason,
                    });
                }
            }
        }

        for (index, row) in rows.iter_mut().enumerate() {
            row.id = index + 1;
        }

        report.total_matches = rows.len();
        report.duration = started.elapsed();
        log::info!(
            "found {} matches in {} documents ({} skipped) in {:?}",
            report.total_matches,
            report.documents_processed,
            report.documents_skipped,
            report.duration
        );

        Ok(Output {
            table: ConcordanceTable::new(rows),
            report,
        })
    }

    fn check_attribute_columns(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.attributes.len());
        for column in self.attributes.iter().map(AttributeRecovery::column) {
            let clashes = is_reserved_column(column)
                || column == FREQUENCY_COLUMN
                || DerivedKey::ALL.iter().any(|key| key.column() == column);
            if clashes {
                return Err(EngineError::InvalidConfiguration(format!(
                    "attribute column '{column}' is reserved"
                )));
            }
            if seen.contains(&column) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "attribute column '{column}' is recovered twice"
                )));
            }
            seen.push(column);
        }
        Ok(())
    }

    fn resolve_mode(&self, corpus: &Corpus) -> ExecutionMode {
        let mode = match self.config.execution_mode() {
            ExecutionMode::Adaptive => auto_select(
                corpus.total_bytes(),
                corpus.len(),
                self.config.parallel_threshold(),
            ),
            mode => mode,
        };

        #[cfg(not(feature = "parallel"))]
        let mode = match mode {
            ExecutionMode::Parallel => {
                log::debug!("parallel feature disabled, running sequentially");
                ExecutionMode::Sequential
            }
            mode => mode,
        };

        mode
    }

    /// Rows for one document, ids left at zero
    fn extract(&self, document: &Document) -> std::result::Result<Vec<ConcordanceRow>, String> {
        let text = document
            .text()
            .map_err(|e| format!("invalid UTF-8: {e}"))?;

        let mode = self.config.unit_mode();
        let units = segment(text, mode);
        let spans = self.matcher.find_all(text, &units);
        let extractor = WindowExtractor::new(self.config.context_size(), mode);

        let recovered: Vec<(&str, Vec<Option<String>>)> = self
            .attributes
            .iter()
            .map(|recovery| {
                (
                    recovery.column(),
                    recovery.recover(text, &units, &spans, mode),
                )
            })
            .collect();

        let rows: Vec<ConcordanceRow> = spans
            .iter()
            .enumerate()
            .map(|(position, span)| {
                let window = extractor.extract(text, &units, span);

                let mut fields: BTreeMap<String, FieldValue> = document
                    .metadata()
                    .iter()
                    .map(|(key, value)| (metadata_column(key), FieldValue::from(value.as_str())))
                    .collect();
                for (column, values) in &recovered {
                    if let Some(value) = &values[position] {
                        fields.insert(column.to_string(), FieldValue::from(value.as_str()));
                    }
                }

                ConcordanceRow {
                    id: 0,
                    document: document.name().to_string(),
                    from: span.start_unit,
                    to: span.end_unit,
                    start_offset: span.start_offset,
                    end_offset: span.end_offset,
                    preceding: window.preceding_text,
                    keyword: span.matched_text.clone(),
                    following: window.following_text,
                    fields,
                }
            })
            .collect();

        log::debug!(
            "document '{}': {} units, {} matches",
            document.name(),
            units.len(),
            rows.len()
        );
        Ok(rows)
    }
}

/// Build a concordance in one call
pub fn concordance(corpus: &Corpus, pattern: &PatternSpec, config: KwicConfig) -> Result<Output> {
    ConcordanceBuilder::new(pattern, config)?.build(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwic_core::MarkerGrammar;

    #[test]
    fn test_ids_run_across_documents() {
        let corpus: Corpus = vec![("a", "x y x"), ("b", "no match"), ("c", "x")]
            .into_iter()
            .collect();
        let output =
            concordance(&corpus, &PatternSpec::literal("x"), KwicConfig::words(1)).unwrap();

        let ids: Vec<usize> = output.table.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let docs: Vec<&str> = output.table.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(docs, vec!["a", "a", "c"]);
        assert_eq!(output.report.documents_processed, 3);
        assert_eq!(output.report.total_matches, 3);
    }

    #[test]
    fn test_metadata_copied_into_rows() {
        let corpus = Corpus::new().with(Document::new("play", "to be").with_metadata("act", "III"));
        let output =
            concordance(&corpus, &PatternSpec::literal("be"), KwicConfig::words(2)).unwrap();
        let row = &output.table.rows()[0];
        assert_eq!(row.text_field("meta.act"), Some("III"));
        assert_eq!(row.text_field("act"), None);
    }

    #[test]
    fn test_metadata_cannot_shadow_fixed_columns() {
        let corpus = Corpus::new().with(
            Document::new("play", "to be")
                .with_metadata("id", "X")
                .with_metadata("keyword", "Y"),
        );
        let output =
            concordance(&corpus, &PatternSpec::literal("be"), KwicConfig::words(2)).unwrap();
        let header = output.table.header();
        let mut unique = header.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), header.len());

        let record = &output.table.records()[0];
        assert_eq!(record[0], "1");
        assert_eq!(record[7], "be");
        assert_eq!(&header[9..], &["meta.id", "meta.keyword"]);
        assert_eq!(&record[9..], &["X", "Y"]);
    }

    #[test]
    fn test_reserved_attribute_columns_are_rejected() {
        let corpus = Corpus::new().with(Document::new("play", "to be"));
        for column in ["keyword", "frequency", "post_word", "meta.speaker"] {
            let err = ConcordanceBuilder::new(&PatternSpec::literal("be"), KwicConfig::words(1))
                .unwrap()
                .with_attribute(AttributeRecovery::new(column, 10, MarkerGrammar::angle_brackets()))
                .build(&corpus)
                .unwrap_err();
            assert!(err.is_invalid_configuration(), "{column}");
        }

        let err = ConcordanceBuilder::new(&PatternSpec::literal("be"), KwicConfig::words(1))
            .unwrap()
            .with_attribute(AttributeRecovery::speaker(MarkerGrammar::angle_brackets(), 10))
            .with_attribute(AttributeRecovery::speaker(MarkerGrammar::angle_brackets(), 50))
            .build(&corpus)
            .unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_invalid_pattern_fails_before_scanning() {
        let err = ConcordanceBuilder::new(&PatternSpec::regex("(", true), KwicConfig::words(2))
            .unwrap_err();
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_adaptive_small_corpus_runs_sequentially() {
        let corpus: Corpus = vec![("a", "x"), ("b", "x")].into_iter().collect();
        let output =
            concordance(&corpus, &PatternSpec::literal("x"), KwicConfig::words(1)).unwrap();
        assert_eq!(output.report.execution_mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_empty_corpus() {
        let output = concordance(
            &Corpus::new(),
            &PatternSpec::literal("x"),
            KwicConfig::words(3),
        )
        .unwrap();
        assert!(output.table.is_empty());
        assert_eq!(output.report.documents_total(), 0);
    }
}
