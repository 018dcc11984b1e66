//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use kwic_engine::ConcordanceRow;
use std::io::Write;

/// Aligned keyword-in-context lines
///
/// Rows are buffered so the preceding context can be right-aligned on the
/// widest value, which lines the keywords up in one column.
pub struct TextFormatter<W: Write> {
    writer: W,
    rows: Vec<ConcordanceRow>,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_row(&mut self, row: &ConcordanceRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let width = self
            .rows
            .iter()
            .map(|row| row.preceding.chars().count())
            .max()
            .unwrap_or(0);

        for row in &self.rows {
            write!(
                self.writer,
                "{}:{}\t{:>width$} [{}] {}",
                row.document, row.id, row.preceding, row.keyword, row.following
            )?;
            for (name, value) in &row.fields {
                write!(self.writer, "\t{name}={value}")?;
            }
            writeln!(self.writer)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
