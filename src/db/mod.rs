//! Database abstraction layer
//!
//! Trait-based seams for schema listing and SQL execution, with a
//! PostgreSQL backend and a fixed in-memory schema for tests and offline use.

pub mod memory;
pub mod postgres;
pub mod provider;
pub mod schema;
pub mod types;

// Re-export main types
pub use memory::StaticSchema;
pub use provider::{SchemaProvider, SqlExecutor};
pub use schema::{SchemaEntry, SchemaIndex};
pub use types::{CellValue, QueryResults, Row};
