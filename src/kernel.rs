//! Host-facing facade
//!
//! [`SqlKernel`] is what a notebook or REPL host talks to. It decides whether
//! a request is SQL at all, fetches a fresh schema snapshot per completion,
//! and hands finished SQL cells to the executor. It keeps no state between
//! calls beyond the injected provider.

use crate::completion::{Completer, CompletionReply, CompletionRequest, PatternResolver};
use crate::config::Settings;
use crate::db::provider::{SchemaProvider, SqlExecutor};
use crate::db::schema::SchemaEntry;
use crate::db::types::QueryResults;
use crate::detect::SqlDetector;
use crate::error::DbResult;

pub struct SqlKernel<P> {
    provider: P,
    detector: SqlDetector,
    completer: Completer,
}

impl<P> SqlKernel<P> {
    pub fn new(provider: P, settings: &Settings) -> Self {
        Self {
            provider,
            detector: SqlDetector::new(settings.sql_magic.clone()),
            completer: Completer::with_resolver(PatternResolver::with_reserved(
                &settings.reserved_aliases,
            )),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: SchemaProvider> SqlKernel<P> {
    /// Current schema, or an empty one if the provider fails
    pub async fn schema_snapshot(&self) -> Vec<SchemaEntry> {
        match self.provider.list_columns().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "schema unavailable, completing without it");
                Vec::new()
            }
        }
    }

    /// Complete a request from the host.
    ///
    /// Returns `None` when the cursor is not inside SQL, in which case the
    /// host should fall back to its general-purpose completer.
    pub async fn complete(&self, request: &CompletionRequest) -> Option<CompletionReply> {
        if !self.detector.is_sql_context(&request.text, request.cursor) {
            return None;
        }
        Some(self.complete_sql(request).await)
    }

    /// Complete `request` as SQL without context detection.
    pub async fn complete_sql(&self, request: &CompletionRequest) -> CompletionReply {
        let schema = self.schema_snapshot().await;
        self.completer.complete(request, &schema)
    }
}

impl<P: SqlExecutor> SqlKernel<P> {
    /// Execute a cell if it holds SQL.
    ///
    /// Returns `None` when the cell is not SQL and belongs to the host's
    /// own interpreter.
    pub async fn execute(&self, cell: &str) -> Option<DbResult<QueryResults>> {
        let sql = self.detector.extract_sql(cell)?;
        tracing::debug!(%sql, "executing sql cell");
        Some(self.provider.execute_query(&sql).await)
    }
}
