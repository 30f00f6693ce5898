//! Common test utilities and helpers
//!
//! Shared fixtures for the integration and property tests.

#![allow(dead_code)]

use sqlcell::completion::{CompletionReply, CompletionRequest, complete};
use sqlcell::db::SchemaEntry;

/// The reference schema: two tables, one column name needing quotes
pub fn test_schema() -> Vec<SchemaEntry> {
    vec![
        SchemaEntry::new("spells", "abra cadabra"),
        SchemaEntry::new("spells", "foo"),
        SchemaEntry::new("spells", "id"),
        SchemaEntry::new("books", "spell_id"),
        SchemaEntry::new("books", "name"),
    ]
}

/// Build a request from text with a `|` marking the cursor
pub fn request(marked: &str) -> CompletionRequest {
    let cursor = marked.find('|').expect("text must contain a | cursor marker");
    CompletionRequest::new(marked.replacen('|', "", 1), cursor)
}

/// Complete `marked` against the reference schema
pub fn complete_marked(marked: &str) -> CompletionReply {
    complete(&request(marked), &test_schema())
}

/// A match with identifier quotes removed
pub fn unquoted(m: &str) -> String {
    m.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_sets_cursor() {
        let req = request("select f| from spells");
        assert_eq!(req.text, "select f from spells");
        assert_eq!(req.cursor, 8);
    }
}
