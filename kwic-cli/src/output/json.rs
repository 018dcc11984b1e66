//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use kwic_engine::ConcordanceRow;
use std::io::Write;

/// JSON formatter - outputs rows as a JSON array
///
/// Derived columns are flattened into each row object.
pub struct JsonFormatter<W: Write> {
    writer: W,
    rows: Vec<ConcordanceRow>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            rows: Vec::new(),
            pretty,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_row(&mut self, row: &ConcordanceRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.rows)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
