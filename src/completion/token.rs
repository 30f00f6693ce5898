//! Token boundary detection
//!
//! Finds the identifier fragment the user is typing. Qualifiers stay inside
//! the token (`spells.f`, `b.`), so the whole qualified name is what gets
//! matched and replaced.

/// The identifier fragment immediately before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenContext {
    /// Byte offset where the raw token starts
    pub token_start: usize,
    /// Token text with identifier quotes removed, used as the match prefix
    pub token_text: String,
    /// Boundary character right before the token, `None` if there is none
    pub preceding_char: Option<char>,
}

impl TokenContext {
    /// Whether a token boundary was found before the cursor
    pub fn has_boundary(&self) -> bool {
        self.preceding_char.is_some()
    }

    /// Whether the token is typed inside an already opened `"` quote
    pub fn in_open_quote(&self) -> bool {
        self.preceding_char == Some('"')
    }
}

/// Clamp `cursor` into `text`, landing on a char boundary.
pub fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '('
}

/// Scan backward from `cursor` for the start of the current token.
///
/// Boundaries are whitespace, `,`, `(` and an opening `"`. A `"` directly
/// followed by `.` closes a quoted qualifier; the scan then skips back to
/// its opening quote without stopping on whitespace inside it.
pub fn scan_token(text: &str, cursor: usize) -> TokenContext {
    let cursor = clamp_cursor(text, cursor);
    let prefix = &text[..cursor];

    let mut in_closed_quote = false;
    let mut next: Option<char> = None;
    let mut boundary: Option<(usize, char)> = None;

    for (idx, c) in prefix.char_indices().rev() {
        if in_closed_quote {
            if c == '"' {
                in_closed_quote = false;
            }
        } else if c == '"' {
            if next == Some('.') {
                in_closed_quote = true;
            } else {
                boundary = Some((idx, c));
                break;
            }
        } else if is_boundary(c) {
            boundary = Some((idx, c));
            break;
        }
        next = Some(c);
    }

    match boundary {
        Some((idx, c)) => {
            let token_start = idx + c.len_utf8();
            TokenContext {
                token_start,
                token_text: prefix[token_start..].replace('"', ""),
                preceding_char: Some(c),
            }
        }
        // No boundary: the "just opened a query" state, nothing is replaced
        None => TokenContext {
            token_start: cursor,
            token_text: String::new(),
            preceding_char: None,
        },
    }
}
