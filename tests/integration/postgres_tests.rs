//! Integration tests for PostgresProvider
//!
//! These tests require a running PostgreSQL database; see tests/integration.rs.

use sqlcell::completion::CompletionRequest;
use sqlcell::config::ConnectionConfig;
use sqlcell::config::connections::SslMode;
use sqlcell::config::Settings;
use sqlcell::db::postgres::PostgresProvider;
use sqlcell::db::types::CellValue;
use sqlcell::db::{SchemaEntry, SchemaProvider, SqlExecutor};
use sqlcell::kernel::SqlKernel;

/// Get test database connection config
fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        name: "integration-test".to_string(),
        host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5433),
        database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "test_db".to_string()),
        username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "test_user".to_string()),
        password: Some(
            std::env::var("TEST_DB_PASSWORD").unwrap_or_else(|_| "test_password".to_string()),
        ),
        ssl_mode: SslMode::Disable,
    }
}

async fn connect() -> Option<PostgresProvider> {
    let config = test_config();
    match PostgresProvider::connect(&config).await {
        Ok(provider) => Some(provider),
        Err(e) => {
            eprintln!(
                "Skipping test: Database not available at {}:{} - {}",
                config.host, config.port, e
            );
            None
        }
    }
}

#[tokio::test]
async fn test_execute_simple_query() {
    let Some(provider) = connect().await else {
        return;
    };

    let results = provider
        .execute_query("SELECT 1 as num, 'hello' as msg, NULL as nothing")
        .await
        .expect("query should succeed");

    assert_eq!(results.columns, ["num", "msg", "nothing"]);
    assert_eq!(results.row_count(), 1);
    let row = &results.rows[0];
    assert_eq!(row.values[0], CellValue::Text("1".into()));
    assert_eq!(row.values[1], CellValue::Text("hello".into()));
    assert!(row.values[2].is_null());
}

#[tokio::test]
async fn test_invalid_query_fails() {
    let Some(provider) = connect().await else {
        return;
    };

    let result = provider.execute_query("SELEC nonsense").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_schema_lists_new_table_and_completes_it() {
    let Some(provider) = connect().await else {
        return;
    };

    provider
        .execute_query(
            "DROP TABLE IF EXISTS sqlcell_it_spells; \
             CREATE TABLE sqlcell_it_spells (id int, \"abra cadabra\" text)",
        )
        .await
        .expect("create table");

    let entries = provider.list_columns().await.expect("list columns");
    assert!(entries.contains(&SchemaEntry::new("sqlcell_it_spells", "id")));
    assert!(entries.contains(&SchemaEntry::new("sqlcell_it_spells", "abra cadabra")));

    let kernel = SqlKernel::new(&provider, &Settings::default());
    let reply = kernel
        .complete(&CompletionRequest::at_end(
            "df = run(\"select * from sqlcell_it_spells where a",
        ))
        .await
        .expect("inside a sql string");
    assert_eq!(reply.matches[0], "\"abra cadabra\"");

    provider
        .execute_query("DROP TABLE sqlcell_it_spells")
        .await
        .expect("drop table");
}

#[tokio::test]
async fn test_kernel_runs_sql_cell() {
    let Some(provider) = connect().await else {
        return;
    };

    let kernel = SqlKernel::new(provider, &Settings::default());
    let results = kernel
        .execute("%%sql\nSELECT 42 AS answer")
        .await
        .expect("cell is sql")
        .expect("query should succeed");
    assert_eq!(results.columns, ["answer"]);
    assert_eq!(results.rows[0].values[0], CellValue::Text("42".into()));
}
