//! Derived-key grouping and frequency ordering
//!
//! Ordering by group frequency runs in two explicit passes:
//!
//! 1. [`derive_keys`] computes a key for every row, stores it in a named
//!    column and builds a [`KeyCounts`] side table.
//! 2. [`sort_by_count`] writes the looked-up count into the `frequency`
//!    column and stable-sorts the rows by descending count, so rows with
//!    equal counts keep their relative order.

use crate::error::{EngineError, Result};
use crate::table::{is_reserved_column, ConcordanceRow, ConcordanceTable};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

/// Column receiving the group count
pub const FREQUENCY_COLUMN: &str = "frequency";

/// Built-in derived keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedKey {
    /// First word after the match, lowercased, punctuation stripped
    FollowingWord,
    /// Last word before the match, lowercased, punctuation stripped
    PrecedingWord,
    /// Matched text, lowercased, punctuation stripped
    Keyword,
}

impl DerivedKey {
    /// All built-in keys
    pub const ALL: [DerivedKey; 3] = [
        DerivedKey::FollowingWord,
        DerivedKey::PrecedingWord,
        DerivedKey::Keyword,
    ];

    /// Column the key is stored in
    pub fn column(&self) -> &'static str {
        match self {
            DerivedKey::FollowingWord => "post_word",
            DerivedKey::PrecedingWord => "pre_word",
            DerivedKey::Keyword => "keyword_key",
        }
    }

    /// Compute the key for a row
    pub fn compute(&self, row: &ConcordanceRow) -> Option<String> {
        let word = match self {
            DerivedKey::FollowingWord => row.following.unicode_words().next(),
            DerivedKey::PrecedingWord => row.preceding.unicode_words().last(),
            DerivedKey::Keyword => {
                let words: Vec<&str> = row.keyword.unicode_words().collect();
                return (!words.is_empty()).then(|| words.join(" ").to_lowercase());
            }
        };
        word.map(str::to_lowercase)
    }
}

impl FromStr for DerivedKey {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "following" | "post" | "post_word" | "post-word" => Ok(DerivedKey::FollowingWord),
            "preceding" | "pre" | "pre_word" | "pre-word" => Ok(DerivedKey::PrecedingWord),
            "keyword" | "keyword_key" => Ok(DerivedKey::Keyword),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown grouping key '{other}' (expected following, preceding or keyword)"
            ))),
        }
    }
}

impl fmt::Display for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DerivedKey::FollowingWord => "following",
            DerivedKey::PrecedingWord => "preceding",
            DerivedKey::Keyword => "keyword",
        })
    }
}

/// Per-key occurrence counts, remembering first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCounts {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl KeyCounts {
    fn add(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.order.push(key.to_string());
            }
        }
    }

    /// Count for `key` (0 when unseen)
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no key was counted
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Keys by descending count, ties in first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|key| (key.as_str(), self.counts[key]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Reject key columns that would shadow a fixed, metadata or count column
fn check_key_column(column: &str) -> Result<()> {
    if is_reserved_column(column) || column == FREQUENCY_COLUMN {
        return Err(EngineError::InvalidConfiguration(format!(
            "grouping column '{column}' is reserved"
        )));
    }
    Ok(())
}

/// Pass 1: store a derived key per row and count rows per key
///
/// Rows without a key are stored and counted under the empty string. A key
/// column replaces an earlier value under the same name, so grouping twice
/// by one key is idempotent.
pub fn derive_keys<F>(table: &mut ConcordanceTable, column: &str, key_fn: F) -> Result<KeyCounts>
where
    F: Fn(&ConcordanceRow) -> Option<String>,
{
    check_key_column(column)?;
    Ok(count_keys(table, column, key_fn))
}

fn count_keys<F>(table: &mut ConcordanceTable, column: &str, key_fn: F) -> KeyCounts
where
    F: Fn(&ConcordanceRow) -> Option<String>,
{
    let mut counts = KeyCounts::default();
    for row in table.rows_mut() {
        let key = key_fn(row).unwrap_or_default();
        counts.add(&key);
        row.set_field(column, key);
    }
    counts
}

/// Pass 2: record each row's group count and stable-sort by descending count
pub fn sort_by_count(table: &mut ConcordanceTable, column: &str, counts: &KeyCounts) {
    for row in table.rows_mut() {
        let count = row.text_field(column).map_or(0, |key| counts.get(key));
        row.set_field(FREQUENCY_COLUMN, count);
    }

    let frequency = |row: &ConcordanceRow| row.count_field(FREQUENCY_COLUMN).unwrap_or(0);
    table
        .rows_mut()
        .sort_by(|a, b| frequency(b).cmp(&frequency(a)));
}

impl ConcordanceTable {
    /// Group rows by a built-in key and order them by descending group size
    pub fn group_by_frequency(&mut self, key: DerivedKey) -> KeyCounts {
        self.group_into(key.column(), |row| key.compute(row))
    }

    /// Group rows by a custom key stored in `column` and order them by
    /// descending group size
    ///
    /// Fails when `column` is a fixed column, lies in the metadata
    /// namespace or is the `frequency` column.
    pub fn group_by_frequency_with<F>(&mut self, column: &str, key_fn: F) -> Result<KeyCounts>
    where
        F: Fn(&ConcordanceRow) -> Option<String>,
    {
        check_key_column(column)?;
        Ok(self.group_into(column, key_fn))
    }

    fn group_into<F>(&mut self, column: &str, key_fn: F) -> KeyCounts
    where
        F: Fn(&ConcordanceRow) -> Option<String>,
    {
        let counts = count_keys(self, column, key_fn);
        sort_by_count(self, column, &counts);
        log::debug!(
            "grouped {} rows into {} '{}' groups",
            self.len(),
            counts.len(),
            column
        );
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::row;

    #[test]
    fn test_following_word_groups_and_stable_sort() {
        let mut table = ConcordanceTable::new(vec![
            row(1, "", "kw", "a"),
            row(2, "", "kw", "b"),
            row(3, "", "kw", "a"),
        ]);

        let counts = table.group_by_frequency(DerivedKey::FollowingWord);
        assert_eq!(counts.get("a"), 2);
        assert_eq!(counts.get("b"), 1);
        assert_eq!(counts.len(), 2);

        let ids: Vec<usize> = table.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);

        let freqs: Vec<usize> = table
            .iter()
            .map(|r| r.count_field(FREQUENCY_COLUMN).unwrap())
            .collect();
        assert_eq!(freqs, vec![2, 2, 1]);
        assert_eq!(table.rows()[2].text_field("post_word"), Some("b"));
    }

    #[test]
    fn test_key_normalization() {
        let r = row(1, "Said, the Old", "Fox", "!Ran, away");
        assert_eq!(DerivedKey::FollowingWord.compute(&r), Some("ran".into()));
        assert_eq!(DerivedKey::PrecedingWord.compute(&r), Some("old".into()));
        assert_eq!(DerivedKey::Keyword.compute(&r), Some("fox".into()));

        let empty = row(2, "", "x", "...");
        assert_eq!(DerivedKey::FollowingWord.compute(&empty), None);
        assert_eq!(DerivedKey::PrecedingWord.compute(&empty), None);
    }

    #[test]
    fn test_missing_keys_group_under_empty_string() {
        let mut table = ConcordanceTable::new(vec![
            row(1, "", "kw", ""),
            row(2, "", "kw", "x"),
            row(3, "", "kw", ""),
        ]);
        let counts = table.group_by_frequency(DerivedKey::FollowingWord);
        assert_eq!(counts.get(""), 2);
        assert_eq!(table.rows()[0].id, 1);
        assert_eq!(table.rows()[1].id, 3);
    }

    #[test]
    fn test_ranked_ties_keep_first_seen_order() {
        let mut table = ConcordanceTable::new(vec![
            row(1, "", "kw", "b"),
            row(2, "", "kw", "a"),
            row(3, "", "kw", "c"),
            row(4, "", "kw", "c"),
        ]);
        let counts = table.group_by_frequency(DerivedKey::FollowingWord);
        assert_eq!(counts.ranked(), vec![("c", 2), ("b", 1), ("a", 1)]);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_custom_key() {
        let mut table = ConcordanceTable::new(vec![
            row(1, "", "Cat", ""),
            row(2, "", "dog", ""),
            row(3, "", "cow", ""),
        ]);
        let counts = table
            .group_by_frequency_with("initial", |r| {
                r.keyword.chars().next().map(|c| c.to_lowercase().to_string())
            })
            .unwrap();
        assert_eq!(counts.get("c"), 2);
        let ids: Vec<usize> = table.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_custom_key_cannot_shadow_reserved_columns() {
        let mut table = ConcordanceTable::new(vec![row(1, "", "kw", "a"), row(2, "", "kw", "b")]);
        for column in ["id", "keyword", "frequency", "meta.year", ""] {
            let err = table
                .group_by_frequency_with(column, |r| Some(r.following.clone()))
                .unwrap_err();
            assert!(err.is_invalid_configuration(), "{column}");
        }
        assert!(derive_keys(&mut table, "document", |_| None).is_err());

        // Rejected calls leave the table untouched
        assert!(table.iter().all(|r| r.fields.is_empty()));
        assert_eq!(table.rows()[0].id, 1);
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!(
            "post-word".parse::<DerivedKey>().unwrap(),
            DerivedKey::FollowingWord
        );
        assert_eq!(
            "Preceding".parse::<DerivedKey>().unwrap(),
            DerivedKey::PrecedingWord
        );
        assert!("speaker".parse::<DerivedKey>().is_err());
    }
}
