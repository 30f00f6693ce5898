//! Candidate generation
//!
//! Turns the alias-expanded schema into table and column candidates. Every
//! column appears twice, bare and qualified, under one dedupe key.

use crate::completion::references::Resolution;
use crate::db::schema::SchemaIndex;

/// Identity used to collapse display variants of one schema object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupeKey {
    Table(String),
    /// `table` is the table or alias name the column was reached through
    Column { table: String, column: String },
}

/// A single completion candidate, unquoted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Table or alias prefix for qualified columns
    pub qualifier: Option<String>,
    pub name: String,
    pub key: DedupeKey,
}

impl Candidate {
    fn table(name: &str) -> Self {
        Self {
            qualifier: None,
            name: name.to_string(),
            key: DedupeKey::Table(name.to_string()),
        }
    }

    fn column(table: &str, column: &str, qualified: bool) -> Self {
        Self {
            qualifier: qualified.then(|| table.to_string()),
            name: column.to_string(),
            key: DedupeKey::Column {
                table: table.to_string(),
                column: column.to_string(),
            },
        }
    }

    /// Unquoted display text, the string prefix filtering runs against
    pub fn display(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{}.{}", q, self.name),
            None => self.name.clone(),
        }
    }
}

/// The candidate universe for one request
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    /// One per table or alias, first-seen order
    pub tables: Vec<Candidate>,
    /// Columns of every table and alias
    pub all_columns: Vec<Candidate>,
    /// Columns of referenced tables and aliases only
    pub filtered_columns: Vec<Candidate>,
}

impl Candidates {
    /// Columns to offer: the referenced subset once anything is referenced,
    /// the full set otherwise.
    pub fn column_pool(&self, has_references: bool) -> &[Candidate] {
        if has_references {
            &self.filtered_columns
        } else {
            &self.all_columns
        }
    }
}

/// Build candidates from a resolution over the current schema.
pub fn generate(resolution: &Resolution) -> Candidates {
    let index = SchemaIndex::build(&resolution.expanded);
    let mut out = Candidates::default();

    for table in index.tables() {
        out.tables.push(Candidate::table(table));
        let referenced = resolution.is_referenced(table);
        for column in index.columns_of(table) {
            for qualified in [false, true] {
                let candidate = Candidate::column(table, column, qualified);
                if referenced {
                    out.filtered_columns.push(candidate.clone());
                }
                out.all_columns.push(candidate);
            }
        }
    }

    out
}
