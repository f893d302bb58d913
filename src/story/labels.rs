//! Document-wide label table for indirect cross-references.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Maps label keys to the literal text they stand for.
///
/// Labels are edited once in the document and referenced many times
/// (version numbers, army names, and so on). The table is built by a single
/// linear scan of the document's mark records at load time and is read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: HashMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(label, text)` records.
    pub fn from_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Register a label. Used by the document loader; a duplicate label
    /// keeps the last record seen.
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(label.into(), text.into());
    }

    /// Resolve a label to its literal text.
    ///
    /// A label that is absent from the table is a hard error: heading text
    /// built from it would otherwise be incomplete or wrong.
    pub fn resolve(&self, label: &str) -> Result<&str> {
        self.entries
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| Error::UnresolvedLabel(label.to_string()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
