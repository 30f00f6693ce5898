//! sqlcell - schema-aware SQL completion for notebook cells and REPL lines
//!
//! sqlcell completes table and column names inside SQL that is still being
//! typed, usually embedded in a string literal of some host language. The
//! text is never parsed into a syntax tree: mid-edit SQL is rarely valid, so
//! the engine works from the token under the cursor and pattern-matched
//! table references over the whole text.
//!
//! # Architecture
//!
//! - [`completion`]: the engine (tokenizer, reference resolver, candidate
//!   generator, matcher)
//! - [`detect`]: decides whether text is SQL at all
//! - [`kernel`]: the facade a host calls for completion and execution
//! - [`db`]: schema provider and SQL executor traits, PostgreSQL backend
//! - [`config`]: connection profiles and settings
//! - [`error`]: error types and result aliases
//!
//! # Example
//!
//! ```
//! use sqlcell::completion::{CompletionRequest, complete};
//! use sqlcell::db::SchemaEntry;
//!
//! let schema = vec![
//!     SchemaEntry::new("spells", "id"),
//!     SchemaEntry::new("spells", "incantation"),
//! ];
//! // cursor right after `s.in`
//! let reply = complete(&CompletionRequest::new("select s.in from spells s", 11), &schema);
//! assert_eq!(reply.matches, ["s.incantation"]);
//! assert_eq!((reply.cursor_start, reply.cursor_end), (7, 11));
//! ```

pub mod completion;
pub mod config;
pub mod db;
pub mod detect;
pub mod error;
pub mod kernel;

pub use completion::{CompletionReply, CompletionRequest, complete};
pub use detect::looks_like_sql_context;
pub use error::{ConfigError, DbError, Result, SqlcellError};
pub use kernel::SqlKernel;
