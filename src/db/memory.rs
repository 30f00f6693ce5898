//! Fixed in-memory schema provider
//!
//! Serves a schema snapshot without a database, e.g. from a TOML file:
//!
//! ```toml
//! [[columns]]
//! table = "spells"
//! column = "id"
//! ```

use crate::db::provider::SchemaProvider;
use crate::db::schema::SchemaEntry;
use crate::error::{ConfigError, DbResult, Result};
use serde::Deserialize;
use std::path::Path;

/// Schema provider over a fixed list of entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSchema {
    entries: Vec<SchemaEntry>,
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    columns: Vec<SchemaEntry>,
}

impl StaticSchema {
    pub fn new(entries: Vec<SchemaEntry>) -> Self {
        Self { entries }
    }

    /// Build from `(table, column)` pairs
    pub fn from_pairs<T, C>(pairs: impl IntoIterator<Item = (T, C)>) -> Self
    where
        T: Into<String>,
        C: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(t, c)| SchemaEntry::new(t, c))
                .collect(),
        )
    }

    /// Parse a TOML schema document
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(Self::new(file.columns))
    }

    /// Load a TOML schema file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }
}

impl SchemaProvider for StaticSchema {
    async fn list_columns(&self) -> DbResult<Vec<SchemaEntry>> {
        Ok(self.entries.clone())
    }
}
