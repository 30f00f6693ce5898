//! Ranking, prefix filtering, deduplication and quoting

use crate::completion::candidates::{Candidate, Candidates, DedupeKey};
use crate::completion::token::TokenContext;
use std::collections::HashSet;

/// Characters that force an identifier into double quotes
const QUOTABLE: &[char] = &['.', '(', ')', ']'];

/// Final, ordered completion list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    pub matches: Vec<String>,
    /// Length of the text the matches replace, ending at the cursor
    pub token_length: usize,
}

fn needs_quoting(name: &str) -> bool {
    name.chars().any(|c| c.is_whitespace() || QUOTABLE.contains(&c))
}

/// Wrap `name` in double quotes if it contains a quotable character.
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

fn render(candidate: &Candidate, token: &TokenContext) -> String {
    if token.in_open_quote() {
        return format!("{}\"", candidate.display());
    }
    match &candidate.qualifier {
        Some(q) => format!("{}.{}", quote_identifier(q), quote_identifier(&candidate.name)),
        None => quote_identifier(&candidate.name),
    }
}

/// Columns rank first after `,`, after a typed qualifier, or once a table
/// is referenced; tables rank first otherwise.
fn columns_first(token: &TokenContext, has_references: bool) -> bool {
    token.preceding_char == Some(',') || token.token_text.contains('.') || has_references
}

/// Ranked candidates that survive prefix filtering and deduplication,
/// each with its rendered text.
fn survivors<'a>(
    token: &TokenContext,
    candidates: &'a Candidates,
    has_references: bool,
) -> Vec<(&'a Candidate, String)> {
    let columns = if token.has_boundary() {
        candidates.column_pool(has_references)
    } else {
        &candidates.all_columns
    };

    let ranked: Vec<&Candidate> = if token.has_boundary() && columns_first(token, has_references)
    {
        columns.iter().chain(&candidates.tables).collect()
    } else {
        candidates.tables.iter().chain(columns).collect()
    };

    let mut seen_keys: HashSet<&DedupeKey> = HashSet::new();
    let mut seen_text: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for candidate in ranked {
        if !candidate.display().starts_with(&token.token_text) {
            continue;
        }
        if !seen_keys.insert(&candidate.key) {
            continue;
        }
        let text = render(candidate, token);
        if seen_text.insert(text.clone()) {
            out.push((candidate, text));
        }
    }
    out
}

/// Rank, filter, dedupe and quote candidates for `token`.
///
/// `cursor` must already be clamped. Without a token boundary every table
/// and every column is returned unfiltered and nothing is replaced.
pub fn match_candidates(
    token: &TokenContext,
    candidates: &Candidates,
    has_references: bool,
    cursor: usize,
) -> Matches {
    let matches = survivors(token, candidates, has_references)
        .into_iter()
        .map(|(_, text)| text)
        .collect();

    Matches {
        matches,
        token_length: cursor - token.token_start,
    }
}
