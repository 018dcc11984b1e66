//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use kwic_engine::{ConcordanceRow, ConcordanceTable};
use std::io::Write;

/// Markdown formatter - outputs rows as a markdown table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    rows: Vec<ConcordanceRow>,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_row(&mut self, row: &ConcordanceRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let table = ConcordanceTable::new(std::mem::take(&mut self.rows));
        let fields = table.field_names();

        let mut header = vec!["#", "document", "preceding", "keyword", "following"];
        header.extend(fields.iter().map(String::as_str));
        writeln!(self.writer, "| {} |", header.join(" | "))?;
        writeln!(self.writer, "|{}", "---|".repeat(header.len()))?;

        for row in table.iter() {
            let mut cells = vec![
                row.id.to_string(),
                escape_cell(&row.document),
                escape_cell(&row.preceding),
                format!("**{}**", escape_cell(&row.keyword)),
                escape_cell(&row.following),
            ];
            cells.extend(fields.iter().map(|name| {
                row.field(name)
                    .map(|value| escape_cell(&value.to_string()))
                    .unwrap_or_default()
            }));
            writeln!(self.writer, "| {} |", cells.join(" | "))?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "*Total matches: {}*", table.len())?;
        self.writer.flush()?;
        Ok(())
    }
}
