//! Schema-aware SQL completion
//!
//! A request runs through four stages, each a plain function over request
//! scoped data:
//!
//! 1. [`token::scan_token`] finds the fragment being typed,
//! 2. a [`ReferenceResolver`] finds referenced tables and aliases in the
//!    whole text,
//! 3. [`candidates::generate`] builds tables and bare/qualified columns,
//! 4. [`matcher::match_candidates`] ranks, filters, dedupes and quotes.
//!
//! Nothing is cached between requests; the schema snapshot is passed in.

pub mod candidates;
pub mod matcher;
pub mod references;
pub mod token;

pub use candidates::{Candidate, DedupeKey};
pub use references::{PatternResolver, ReferenceResolver, ReferencedTable, Resolution};
pub use token::TokenContext;

use crate::db::schema::{SchemaEntry, SchemaIndex};
use serde::{Deserialize, Serialize};

/// A completion request from the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full text of the cell or line
    pub text: String,
    /// Cursor position as a byte offset into `text`
    pub cursor: usize,
}

impl CompletionRequest {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }

    /// Request with the cursor at the end of `text`
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }
}

/// Matches plus the byte range `[cursor_start, cursor_end)` they replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReply {
    pub matches: Vec<String>,
    pub cursor_start: usize,
    pub cursor_end: usize,
}

impl CompletionReply {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Completion engine over a pluggable reference resolver
#[derive(Debug, Clone, Default)]
pub struct Completer<R = PatternResolver> {
    resolver: R,
}

impl Completer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ReferenceResolver> Completer<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Complete `request` against a schema snapshot.
    pub fn complete(&self, request: &CompletionRequest, schema: &[SchemaEntry]) -> CompletionReply {
        let cursor = token::clamp_cursor(&request.text, request.cursor);
        let index = SchemaIndex::build(schema);
        let token = token::scan_token(&request.text, cursor);
        let resolution = self.resolver.resolve(&request.text, &index);
        let candidates = candidates::generate(&resolution);
        let found =
            matcher::match_candidates(&token, &candidates, resolution.has_references(), cursor);

        tracing::debug!(
            token = %token.token_text,
            matches = found.matches.len(),
            "completed sql token"
        );

        CompletionReply {
            matches: found.matches,
            cursor_start: cursor - found.token_length,
            cursor_end: cursor,
        }
    }
}

/// Complete with the default pattern resolver.
pub fn complete(request: &CompletionRequest, schema: &[SchemaEntry]) -> CompletionReply {
    Completer::new().complete(request, schema)
}
