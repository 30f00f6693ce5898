//! Database provider traits
//!
//! The host injects implementations of these into the kernel; the engine
//! never goes looking for a connection on its own. Splitting schema listing
//! from execution lets completion run against providers that cannot run
//! queries (a static schema file, a test fixture).

use crate::db::schema::SchemaEntry;
use crate::db::types::QueryResults;
use crate::error::DbResult;

/// Source of (table, column) pairs for completion
pub trait SchemaProvider {
    /// List every (table, column) pair currently visible.
    ///
    /// Called once per completion request so DDL changes show up
    /// immediately.
    ///
    /// # Errors
    /// Returns `DbError::SchemaLoadFailed` if introspection fails, or
    /// `DbError::NotConnected` if the connection is gone. Callers degrade
    /// to an empty schema.
    fn list_columns(&self) -> impl Future<Output = DbResult<Vec<SchemaEntry>>> + Send;
}

/// Sink for finished SQL statements
pub trait SqlExecutor {
    /// Execute a SQL query and return results
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if query execution fails
    fn execute_query(&self, sql: &str) -> impl Future<Output = DbResult<QueryResults>> + Send;
}

impl<T: SchemaProvider + Sync> SchemaProvider for &T {
    fn list_columns(&self) -> impl Future<Output = DbResult<Vec<SchemaEntry>>> + Send {
        (**self).list_columns()
    }
}

impl<T: SqlExecutor + Sync> SqlExecutor for &T {
    fn execute_query(&self, sql: &str) -> impl Future<Output = DbResult<QueryResults>> + Send {
        (**self).execute_query(sql)
    }
}
