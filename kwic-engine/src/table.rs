//! Concordance rows and the ordered table

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Value of a derived column
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Group count
    Count(usize),
    /// Free text
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<usize> for FieldValue {
    fn from(n: usize) -> Self {
        FieldValue::Count(n)
    }
}

/// One keyword occurrence with its context
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcordanceRow {
    /// Global 1-based id, in corpus order
    pub id: usize,
    /// Name of the source document
    pub document: String,
    /// Index of the first matched unit
    pub from: usize,
    /// Index one past the last matched unit
    pub to: usize,
    /// Byte offset of the match in the document
    pub start_offset: usize,
    /// Byte offset of the match end in the document
    pub end_offset: usize,
    /// Context before the match
    pub preceding: String,
    /// Matched text
    pub keyword: String,
    /// Context after the match
    pub following: String,
    /// Derived columns and document metadata
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fields: BTreeMap<String, FieldValue>,
}

impl ConcordanceRow {
    /// Look up a derived column
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a derived column as text
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a derived column as a count
    pub fn count_field(&self, name: &str) -> Option<usize> {
        match self.fields.get(name) {
            Some(FieldValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    /// Set a derived column
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }
}

/// Columns every row has, in export order
pub const FIXED_COLUMNS: [&str; 9] = [
    "id",
    "document",
    "from",
    "to",
    "start_offset",
    "end_offset",
    "preceding",
    "keyword",
    "following",
];

/// Prefix of the columns holding per-document metadata
pub const METADATA_PREFIX: &str = "meta.";

/// Column holding the metadata entry `key`
pub fn metadata_column(key: &str) -> String {
    format!("{METADATA_PREFIX}{key}")
}

/// Whether `name` is unavailable to derived columns
///
/// Fixed columns and the metadata namespace are reserved, so exported
/// records never carry two values under one name.
pub fn is_reserved_column(name: &str) -> bool {
    name.is_empty() || FIXED_COLUMNS.contains(&name) || name.starts_with(METADATA_PREFIX)
}

/// Ordered sequence of concordance rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConcordanceTable {
    rows: Vec<ConcordanceRow>,
}

impl ConcordanceTable {
    /// Create a table from rows in their final order
    pub fn new(rows: Vec<ConcordanceRow>) -> Self {
        Self { rows }
    }

    /// Rows in table order
    pub fn rows(&self) -> &[ConcordanceRow] {
        &self.rows
    }

    /// Mutable access to the rows
    pub fn rows_mut(&mut self) -> &mut [ConcordanceRow] {
        &mut self.rows
    }

    /// Iterate over rows in table order
    pub fn iter(&self) -> std::slice::Iter<'_, ConcordanceRow> {
        self.rows.iter()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the table
    pub fn into_rows(self) -> Vec<ConcordanceRow> {
        self.rows
    }

    /// Keep only the rows satisfying `keep`, preserving order and ids
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&ConcordanceRow) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Names of the derived columns present in any row, sorted
    pub fn field_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|row| row.fields.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Flat header: fixed columns followed by the derived columns
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.field_names())
            .collect()
    }

    /// Flat string records aligned with [`header`](Self::header)
    ///
    /// Missing derived values are rendered as empty strings.
    pub fn records(&self) -> Vec<Vec<String>> {
        let fields = self.field_names();
        self.rows
            .iter()
            .map(|row| {
                let mut record = vec![
                    row.id.to_string(),
                    row.document.clone(),
                    row.from.to_string(),
                    row.to.to_string(),
                    row.start_offset.to_string(),
                    row.end_offset.to_string(),
                    row.preceding.clone(),
                    row.keyword.clone(),
                    row.following.clone(),
                ];
                record.extend(
                    fields
                        .iter()
                        .map(|name| row.field(name).map(ToString::to_string).unwrap_or_default()),
                );
                record
            })
            .collect()
    }
}

impl From<Vec<ConcordanceRow>> for ConcordanceTable {
    fn from(rows: Vec<ConcordanceRow>) -> Self {
        Self::new(rows)
    }
}

impl IntoIterator for ConcordanceTable {
    type Item = ConcordanceRow;
    type IntoIter = std::vec::IntoIter<ConcordanceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConcordanceTable {
    type Item = &'a ConcordanceRow;
    type IntoIter = std::slice::Iter<'a, ConcordanceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
