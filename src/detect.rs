//! SQL context detection
//!
//! Host cells are written in a general-purpose language; SQL lives inside
//! string literals or behind a `%sql` magic. These checks decide whether the
//! SQL engine should handle a completion or execution request at all.

use crate::completion::token::clamp_cursor;

/// Default magic prefix marking a SQL line (`%sql ...`) or cell (`%%sql`)
pub const DEFAULT_SQL_MAGIC: &str = "%sql";

const LITERAL_DELIMITERS: &[&str] = &["\"\"\"", "'''", "\"", "'"];

/// The quote delimiter left open in `s`, if any.
///
/// Triple quotes are checked first; once they balance, plain `"` and then
/// `'` parity decides.
pub fn open_quote(s: &str) -> Option<&'static str> {
    if s.matches("\"\"\"").count() % 2 == 1 {
        Some("\"\"\"")
    } else if s.matches('"').count() % 2 == 1 {
        Some("\"")
    } else if s.matches('\'').count() % 2 == 1 {
        Some("'")
    } else {
        None
    }
}

/// Whether `code` starts like a `SELECT` or `WITH` statement.
pub fn looks_like_sql(code: &str) -> bool {
    let lowered = code.trim().to_lowercase();
    lowered.starts_with("select") || lowered.starts_with("with")
}

/// Detects SQL inside host-language cells
#[derive(Debug, Clone)]
pub struct SqlDetector {
    magic: String,
}

impl Default for SqlDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SQL_MAGIC)
    }
}

impl SqlDetector {
    pub fn new(magic: impl Into<String>) -> Self {
        Self {
            magic: magic.into(),
        }
    }

    /// Whether the cursor sits inside SQL text.
    ///
    /// True when a string literal is open before the cursor and its content
    /// so far looks like SQL, or, with no literal open, when the text after
    /// the last magic looks like SQL.
    pub fn is_sql_context(&self, text: &str, cursor: usize) -> bool {
        let prefix = &text[..clamp_cursor(text, cursor)];
        match open_quote(prefix) {
            Some(quote) => prefix.rsplit(quote).next().is_some_and(looks_like_sql),
            None if !self.magic.is_empty() && prefix.contains(&self.magic) => prefix
                .rsplit(self.magic.as_str())
                .next()
                .is_some_and(looks_like_sql),
            None => false,
        }
    }

    /// Extract the SQL to execute from a whole cell.
    ///
    /// A cell is SQL when it is a single string literal holding SQL, or when
    /// it starts with the magic (`%%sql` cell form, `%sql` line form).
    pub fn extract_sql(&self, cell: &str) -> Option<String> {
        let trimmed = cell.trim();

        if !self.magic.is_empty() {
            let cell_magic = format!("%{}", self.magic);
            if let Some(rest) = trimmed.strip_prefix(cell_magic.as_str()) {
                return sql_body(rest);
            }
            if let Some(rest) = trimmed.strip_prefix(self.magic.as_str()) {
                return sql_body(rest);
            }
        }

        LITERAL_DELIMITERS
            .iter()
            .find_map(|delim| literal_body(trimmed, delim))
            .and_then(sql_body)
    }
}

/// Content of `s` if it is exactly one literal delimited by `delim`.
fn literal_body<'a>(s: &'a str, delim: &str) -> Option<&'a str> {
    let inner = s.strip_prefix(delim)?.strip_suffix(delim)?;
    (!inner.contains(delim)).then_some(inner)
}

fn sql_body(s: &str) -> Option<String> {
    let s = s.trim();
    looks_like_sql(s).then(|| s.to_string())
}

/// Whether the cursor sits inside SQL text, using the default magic.
pub fn looks_like_sql_context(text: &str, cursor: usize) -> bool {
    SqlDetector::default().is_sql_context(text, cursor)
}
