//! Documents and corpora handed to the engine
//!
//! The engine never reads files. Callers load documents and pass them in
//! either as UTF-8 strings or as raw bytes; raw bytes are decoded per
//! document during extraction so one bad file cannot spoil the batch.

use std::collections::BTreeMap;
use std::str::Utf8Error;

/// Raw content of a document
#[derive(Clone, PartialEq, Eq)]
pub enum DocumentText {
    /// Already decoded text
    Text(String),
    /// Bytes expected to hold UTF-8 text
    Bytes(Vec<u8>),
}

impl std::fmt::Debug for DocumentText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentText::Text(text) => f.debug_tuple("Text").field(text).finish(),
            DocumentText::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
        }
    }
}

impl DocumentText {
    /// Borrow the content as text, decoding bytes if needed
    pub fn decode(&self) -> Result<&str, Utf8Error> {
        match self {
            DocumentText::Text(text) => Ok(text),
            DocumentText::Bytes(bytes) => std::str::from_utf8(bytes),
        }
    }

    /// Size of the raw content in bytes
    pub fn len(&self) -> usize {
        match self {
            DocumentText::Text(text) => text.len(),
            DocumentText::Bytes(bytes) => bytes.len(),
        }
    }

    /// Whether the content is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for DocumentText {
    fn from(text: String) -> Self {
        DocumentText::Text(text)
    }
}

impl From<&str> for DocumentText {
    fn from(text: &str) -> Self {
        DocumentText::Text(text.to_string())
    }
}

impl From<Vec<u8>> for DocumentText {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentText::Bytes(bytes)
    }
}

/// A named, immutable document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: DocumentText,
    metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a document from a name and its content
    pub fn new(name: impl Into<String>, text: impl Into<DocumentText>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create a document from raw bytes
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(name, DocumentText::Bytes(bytes))
    }

    /// Attach a metadata entry copied into every row of this document
    ///
    /// Rows carry it in the `meta.<key>` column.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content
    pub fn content(&self) -> &DocumentText {
        &self.text
    }

    /// Decoded text
    pub fn text(&self) -> Result<&str, Utf8Error> {
        self.text.decode()
    }

    /// Per-document metadata
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Size of the raw content in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the document has no content
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Documents in caller-supplied order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Append a document, builder style
    pub fn with(mut self, document: Document) -> Self {
        self.push(document);
        self
    }

    /// Documents in iteration order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterate over documents in order
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Sum of the raw sizes of all documents in bytes
    pub fn total_bytes(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }
}

impl From<Vec<Document>> for Corpus {
    fn from(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl<N, T> FromIterator<(N, T)> for Corpus
where
    N: Into<String>,
    T: Into<DocumentText>,
{
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, text)| Document::new(name, text))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
