//! Query result types
//!
//! Results come back over the simple query protocol, so every value is text
//! or NULL. Rendering them is left to the host.

use serde::Serialize;
use std::time::Duration;

/// Query execution results
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResults {
    /// Column names in result order
    pub columns: Vec<String>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Query execution time
    pub execution_time: Duration,
    /// Rows affected for statements that return no rows
    pub rows_affected: Option<u64>,
}

/// A single row of query results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Cell values in column order
    pub values: Vec<CellValue>,
}

/// A cell value (single column value in a row)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// NULL value
    Null,
    /// Text representation of any other value
    Text(String),
}

impl QueryResults {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl CellValue {
    /// Check if this is a NULL value
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))
    }
}
