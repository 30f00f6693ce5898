//! PostgreSQL database provider
//!
//! Concrete implementation using tokio-postgres.

use crate::config::ConnectionConfig;
use crate::config::connections::SslMode;
use crate::db::provider::{SchemaProvider, SqlExecutor};
use crate::db::schema::SchemaEntry;
use crate::db::types::{CellValue, QueryResults, Row};
use crate::error::{DbError, DbResult};
use tokio_postgres::{Client, SimpleQueryMessage};

/// Every (table, column) pair in user schemas, in catalog order
const LIST_COLUMNS_SQL: &str = "\
    SELECT t.table_name::text, c.column_name::text \
    FROM information_schema.tables t \
    JOIN information_schema.columns c \
      ON c.table_schema = t.table_schema AND c.table_name = t.table_name \
    WHERE t.table_schema NOT LIKE 'pg_%' \
      AND t.table_schema != 'information_schema' \
    ORDER BY t.table_schema, t.table_name, c.ordinal_position";

/// PostgreSQL database provider
pub struct PostgresProvider {
    /// The tokio-postgres client
    client: Client,
}

impl PostgresProvider {
    /// Connect to a PostgreSQL database.
    ///
    /// The connection task runs in the background; if it dies, later calls
    /// fail with `DbError::NotConnected` and completion degrades to an
    /// empty schema.
    pub async fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        let conn_string = config.connection_string_with_password();

        let client = match config.ssl_mode {
            SslMode::Disable => {
                let (client, connection) =
                    tokio_postgres::connect(&conn_string, tokio_postgres::NoTls)
                        .await
                        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        tracing::warn!(error = %e, "postgres connection lost");
                    }
                });
                client
            }
            SslMode::Prefer | SslMode::Require => {
                let tls = tokio_postgres_rustls::MakeRustlsConnect::new(make_tls_config());
                let (client, connection) = tokio_postgres::connect(&conn_string, tls)
                    .await
                    .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        tracing::warn!(error = %e, "postgres connection lost");
                    }
                });
                client
            }
        };

        tracing::debug!(host = %config.host, database = %config.database, "connected");
        Ok(Self { client })
    }

    fn check_open(&self) -> DbResult<()> {
        if self.client.is_closed() {
            return Err(DbError::NotConnected);
        }
        Ok(())
    }
}

impl SchemaProvider for PostgresProvider {
    async fn list_columns(&self) -> DbResult<Vec<SchemaEntry>> {
        self.check_open()?;
        let rows = self
            .client
            .query(LIST_COLUMNS_SQL, &[])
            .await
            .map_err(|e| DbError::SchemaLoadFailed(e.to_string()))?;

        let entries: Vec<SchemaEntry> = rows
            .iter()
            .filter_map(|row| {
                let table: Option<String> = row.get(0);
                let column: Option<String> = row.get(1);
                Some(SchemaEntry::new(table?, column?))
            })
            .collect();

        tracing::debug!(entries = entries.len(), "listed columns");
        Ok(entries)
    }
}

impl SqlExecutor for PostgresProvider {
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        self.check_open()?;
        let start = std::time::Instant::now();

        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        let mut results = QueryResults::default();
        for message in messages {
            match message {
                SimpleQueryMessage::Row(row) => {
                    if results.columns.is_empty() {
                        results.columns = row
                            .columns()
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect();
                    }
                    let values = (0..row.len()).map(|i| CellValue::from(row.get(i))).collect();
                    results.rows.push(Row { values });
                }
                SimpleQueryMessage::CommandComplete(n) => results.rows_affected = Some(n),
                _ => {}
            }
        }

        results.execution_time = start.elapsed();
        Ok(results)
    }
}

/// Build a rustls ClientConfig that trusts OS certificates (with Mozilla roots as fallback)
fn make_tls_config() -> rustls::ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();

    let native_certs = rustls_native_certs::load_native_certs();
    let loaded = native_certs
        .certs
        .into_iter()
        .filter(|cert| root_store.add(cert.clone()).is_ok())
        .count();
    if loaded == 0 {
        tracing::debug!("no native certificates loaded, using bundled roots");
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}
