//! sqlcell - schema-aware SQL completion for notebook cells
//!
//! Command-line entry point. The engine lives in the library; this binary
//! wires it to a schema source and prints JSON on stdout.

use anyhow::{Context, Result, bail};
use clap::Parser;
use sqlcell::completion::{CompletionReply, CompletionRequest};
use sqlcell::config::settings::{Settings, load_settings, load_settings_from};
use sqlcell::config::{ConnectionConfig, find_connection};
use sqlcell::db::postgres::PostgresProvider;
use sqlcell::db::{SchemaProvider, StaticSchema};
use sqlcell::detect::SqlDetector;
use sqlcell::kernel::SqlKernel;
use std::io::Read;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command, DbArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings_error = None;
    let settings = match &cli.config {
        Some(path) => load_settings_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => load_settings().unwrap_or_else(|e| {
            settings_error = Some(e);
            Settings::default()
        }),
    };

    init_tracing(&settings.log_filter);
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "ignoring unreadable settings, using defaults");
    }

    match cli.command {
        Command::Complete {
            schema,
            db,
            cursor,
            force,
            text,
        } => {
            let text = read_input(text)?;
            let cursor = cursor.unwrap_or(text.len());
            let request = CompletionRequest::new(text, cursor);

            let reply = match schema {
                Some(path) => {
                    let provider = StaticSchema::load(&path)
                        .with_context(|| format!("Failed to load schema {}", path.display()))?;
                    complete_with(&SqlKernel::new(provider, &settings), &request, force).await
                }
                None => {
                    let provider = connect(&db).await?;
                    complete_with(&SqlKernel::new(provider, &settings), &request, force).await
                }
            };
            println!("{}", serde_json::to_string(&reply)?);
        }

        Command::Detect { cursor, text } => {
            let text = read_input(text)?;
            let cursor = cursor.unwrap_or(text.len());
            let detector = SqlDetector::new(settings.sql_magic.clone());
            println!("{}", detector.is_sql_context(&text, cursor));
        }

        Command::Run { db, cell } => {
            let cell = read_input(cell)?;
            let kernel = SqlKernel::new(connect(&db).await?, &settings);
            let Some(results) = kernel.execute(&cell).await else {
                bail!("Cell is not SQL: expected a SQL string literal or a %sql magic");
            };
            println!("{}", serde_json::to_string_pretty(&results?)?);
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the configured filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn connect(db: &DbArgs) -> Result<PostgresProvider> {
    let config = match (&db.url, &db.connection) {
        (Some(url), _) => ConnectionConfig::from_url(url)?,
        (None, Some(name)) => find_connection(name)?,
        (None, None) => bail!("No database given: pass --url, --connection or --schema"),
    };
    let provider = PostgresProvider::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}", config.name))?;
    Ok(provider)
}

async fn complete_with<P: SchemaProvider>(
    kernel: &SqlKernel<P>,
    request: &CompletionRequest,
    force: bool,
) -> Option<CompletionReply> {
    if force {
        Some(kernel.complete_sql(request).await)
    } else {
        kernel.complete(request).await
    }
}
