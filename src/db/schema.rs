//! Schema snapshot structures
//!
//! A schema provider hands back a flat list of (table, column) pairs. The
//! completion engine only ever needs two views of it: table names in the
//! order they were first seen, and the columns of a given table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One (table, column) pair as reported by a schema provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Table (or view) name
    pub table: String,
    /// Column name
    pub column: String,
}

impl SchemaEntry {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Lookup structure built from a schema snapshot, rebuilt per request
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    /// Table names in first-seen order
    tables: Vec<String>,
    /// Columns per table, in input order. Duplicate pairs are kept.
    columns: HashMap<String, Vec<String>>,
}

impl SchemaIndex {
    /// Build the index from raw provider output.
    ///
    /// Entries with an empty table or column name are skipped.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a SchemaEntry>,
    {
        let mut index = Self::default();
        for entry in entries {
            if entry.table.is_empty() || entry.column.is_empty() {
                tracing::debug!(?entry, "skipping malformed schema entry");
                continue;
            }
            index.push(&entry.table, &entry.column);
        }
        index
    }

    fn push(&mut self, table: &str, column: &str) {
        match self.columns.get_mut(table) {
            Some(cols) => cols.push(column.to_string()),
            None => {
                self.tables.push(table.to_string());
                self.columns
                    .insert(table.to_string(), vec![column.to_string()]);
            }
        }
    }

    /// Table names in first-seen order
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Columns of `table`, empty if the table is unknown
    pub fn columns_of(&self, table: &str) -> &[String] {
        self.columns.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate (table, column) pairs in table order, then column order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables.iter().flat_map(move |t| {
            self.columns_of(t)
                .iter()
                .map(move |c| (t.as_str(), c.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<SchemaEntry> {
        pairs.iter().map(|(t, c)| SchemaEntry::new(*t, *c)).collect()
    }

    #[test]
    fn tables_keep_first_seen_order() {
        let raw = entries(&[("zebra", "a"), ("apple", "b"), ("zebra", "c")]);
        let index = SchemaIndex::build(&raw);
        assert_eq!(index.tables(), ["zebra", "apple"]);
        assert_eq!(index.columns_of("zebra"), ["a", "c"]);
    }

    #[test]
    fn duplicate_pairs_are_kept() {
        let raw = entries(&[("t", "id"), ("t", "id")]);
        let index = SchemaIndex::build(&raw);
        assert_eq!(index.columns_of("t"), ["id", "id"]);
    }

    #[test]
    fn empty_names_are_skipped() {
        let raw = entries(&[("", "id"), ("t", ""), ("t", "name")]);
        let index = SchemaIndex::build(&raw);
        assert_eq!(index.tables(), ["t"]);
        assert_eq!(index.columns_of("t"), ["name"]);
    }

    #[test]
    fn unknown_table_has_no_columns() {
        let index = SchemaIndex::build(std::iter::empty());
        assert!(index.is_empty());
        assert!(index.columns_of("missing").is_empty());
    }

    #[test]
    fn entries_walk_tables_then_columns() {
        let raw = entries(&[("a", "1"), ("b", "2"), ("a", "3")]);
        let index = SchemaIndex::build(&raw);
        let pairs: Vec<_> = index.entries().collect();
        assert_eq!(pairs, [("a", "1"), ("a", "3"), ("b", "2")]);
    }
}
