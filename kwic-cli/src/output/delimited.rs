//! CSV and TSV output formatters

use super::OutputFormatter;
use anyhow::Result;
use kwic_engine::{ConcordanceRow, ConcordanceTable};
use std::io::Write;

/// Delimited formatter writing a header row then one record per row
///
/// The header is the union of all columns, so rows are buffered until
/// [`finish`](OutputFormatter::finish).
pub struct DelimitedFormatter<W: Write> {
    writer: W,
    delimiter: u8,
    rows: Vec<ConcordanceRow>,
}

impl<W: Write> DelimitedFormatter<W> {
    /// Create a formatter with a custom delimiter
    pub fn new(writer: W, delimiter: u8) -> Self {
        Self {
            writer,
            delimiter,
            rows: Vec::new(),
        }
    }

    /// Comma-separated values
    pub fn csv(writer: W) -> Self {
        Self::new(writer, b',')
    }

    /// Tab-separated values
    pub fn tsv(writer: W) -> Self {
        Self::new(writer, b'\t')
    }
}

impl<W: Write + Send + Sync> OutputFormatter for DelimitedFormatter<W> {
    fn format_row(&mut self, row: &ConcordanceRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let table = ConcordanceTable::new(std::mem::take(&mut self.rows));

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(&mut self.writer);
        csv_writer.write_record(table.header())?;
        for record in table.records() {
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        drop(csv_writer);

        self.writer.flush()?;
        Ok(())
    }
}
