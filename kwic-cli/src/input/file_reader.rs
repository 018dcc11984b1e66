//! File reading utilities

use anyhow::{Context, Result};
use kwic_engine::Document;
use std::fs;
use std::path::Path;

/// Loads corpus documents from disk
///
/// Files are read as raw bytes; UTF-8 decoding happens in the engine so an
/// undecodable file is skipped (or rejected in strict mode) like any other
/// malformed document.
pub struct FileReader;

impl FileReader {
    /// Read a file as raw bytes
    pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read a file into a document named after its path
    pub fn read_document(path: &Path) -> Result<Document> {
        let bytes = Self::read_bytes(path)?;
        Ok(Document::from_bytes(path.display().to_string(), bytes))
    }

    /// Size of a file in bytes, read before loading to size the progress bar
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }
}
