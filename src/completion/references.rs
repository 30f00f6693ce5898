//! Table reference and alias discovery
//!
//! Mid-edit SQL is usually invalid, so references are found with a word
//! boundary pattern per known table over the whole text instead of a parse
//! tree. The [`ReferenceResolver`] trait keeps that approximation swappable.

use crate::db::schema::{SchemaEntry, SchemaIndex};
use regex::Regex;

/// Words the alias capture picks up after a table name in join chains.
/// They are never aliases.
pub const JOIN_KEYWORDS: &[&str] = &["join", "inner", "left", "right", "full", "self", "union"];

/// A table found in the query text, with its alias if one was bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedTable {
    pub name: String,
    pub alias: Option<String>,
}

/// Output of reference discovery for one request
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Referenced tables in schema order
    pub referenced: Vec<ReferencedTable>,
    /// Schema entries plus a copy of each aliased table's columns under
    /// the alias name
    pub expanded: Vec<SchemaEntry>,
}

impl Resolution {
    /// Names in scope: referenced tables and their aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.referenced.iter().flat_map(|r| {
            std::iter::once(r.name.as_str()).chain(r.alias.as_deref())
        })
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn has_references(&self) -> bool {
        !self.referenced.is_empty()
    }
}

/// Discovers which tables a piece of SQL text refers to
pub trait ReferenceResolver {
    fn resolve(&self, text: &str, schema: &SchemaIndex) -> Resolution;
}

/// Pattern-matching resolver
#[derive(Debug, Clone, Default)]
pub struct PatternResolver {
    /// Extra lowercase words rejected as aliases, on top of [`JOIN_KEYWORDS`]
    reserved: Vec<String>,
}

impl PatternResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `words` as aliases in addition to the join keywords
    pub fn with_reserved<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            reserved: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_reserved(&self, alias: &str) -> bool {
        let lowered = alias.to_lowercase();
        JOIN_KEYWORDS.contains(&lowered.as_str()) || self.reserved.contains(&lowered)
    }

    /// Find references to `table`, returning the first usable alias.
    ///
    /// `None` means the table is not referenced. A later occurrence can
    /// supply the alias when an earlier one has none (`select spells.id, s.f
    /// from spells s`).
    fn find(&self, text: &str, table: &str) -> Option<Option<String>> {
        let pattern = table_pattern(table);
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(table, error = %e, "skipping table with unusable name pattern");
                return None;
            }
        };
        let mut referenced = false;
        for caps in re.captures_iter(text) {
            referenced = true;
            if let Some(alias) = caps.name("alias").map(|m| m.as_str())
                && !self.is_reserved(alias)
            {
                return Some(Some(alias.to_string()));
            }
        }
        referenced.then_some(None)
    }
}

/// `(start | non-identifier) ["]TABLE["] [AS] [alias] (non-identifier | end)`
fn table_pattern(table: &str) -> String {
    format!(
        r#"(?:^|[^A-Za-z0-9_])"?{}"?(?:\s+(?i:as))?(?:\s+(?P<alias>\w+))?(?:[^A-Za-z0-9_]|$)"#,
        regex::escape(table)
    )
}

impl ReferenceResolver for PatternResolver {
    fn resolve(&self, text: &str, schema: &SchemaIndex) -> Resolution {
        let mut referenced = Vec::new();
        let mut aliased = Vec::new();

        for table in schema.tables() {
            let Some(alias) = self.find(text, table) else {
                continue;
            };
            if let Some(alias) = &alias {
                aliased.extend(
                    schema
                        .columns_of(table)
                        .iter()
                        .map(|col| SchemaEntry::new(alias.clone(), col.clone())),
                );
            }
            referenced.push(ReferencedTable {
                name: table.clone(),
                alias,
            });
        }

        let mut expanded: Vec<SchemaEntry> = schema
            .entries()
            .map(|(t, c)| SchemaEntry::new(t, c))
            .collect();
        expanded.extend(aliased);

        tracing::debug!(referenced = referenced.len(), "resolved table references");
        Resolution {
            referenced,
            expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SchemaIndex {
        let raw = vec![
            SchemaEntry::new("spells", "id"),
            SchemaEntry::new("spells", "foo"),
            SchemaEntry::new("books", "spell_id"),
            SchemaEntry::new("book", "title"),
        ];
        SchemaIndex::build(&raw)
    }

    fn resolve(text: &str) -> Resolution {
        PatternResolver::new().resolve(text, &schema())
    }

    #[test]
    fn finds_plain_reference() {
        let res = resolve("select * from spells");
        assert_eq!(
            res.referenced,
            [ReferencedTable {
                name: "spells".into(),
                alias: None
            }]
        );
    }

    #[test]
    fn substring_table_does_not_match() {
        let res = resolve("select * from books");
        let names: Vec<_> = res.names().collect();
        assert_eq!(names, ["books"]);
    }

    #[test]
    fn digit_suffix_is_a_different_identifier() {
        let res = resolve("select * from spells2");
        assert!(!res.has_references());
    }

    #[test]
    fn alias_with_and_without_as() {
        let res = resolve("from spells s join books AS b");
        assert_eq!(res.referenced[0].alias.as_deref(), Some("s"));
        assert_eq!(res.referenced[1].alias.as_deref(), Some("b"));
        assert!(res.is_referenced("s"));
        assert!(res.is_referenced("b"));
    }

    #[test]
    fn join_keyword_is_not_an_alias() {
        let res = resolve("from spells join books on spells.id = books.spell_id");
        assert_eq!(res.referenced[0].alias, None);
        assert!(res.is_referenced("spells"));
        assert!(res.is_referenced("books"));
    }

    #[test]
    fn reserved_words_are_configurable() {
        let text = "from spells where id = 1";
        assert!(resolve(text).is_referenced("where"));

        let res = PatternResolver::with_reserved(["WHERE"]).resolve(text, &schema());
        assert!(!res.is_referenced("where"));
        assert!(res.is_referenced("spells"));
    }

    #[test]
    fn alias_duplicates_columns() {
        let res = resolve("from spells s");
        let alias_cols: Vec<_> = res
            .expanded
            .iter()
            .filter(|e| e.table == "s")
            .map(|e| e.column.as_str())
            .collect();
        assert_eq!(alias_cols, ["id", "foo"]);
        // original entries come first, untouched
        assert_eq!(res.expanded[0], SchemaEntry::new("spells", "id"));
    }

    #[test]
    fn table_before_dot_has_no_alias() {
        let res = resolve("select spells.id");
        assert_eq!(res.referenced[0].alias, None);
    }

    #[test]
    fn metacharacters_in_names_are_escaped() {
        let raw = vec![SchemaEntry::new("odd(name)+", "x")];
        let index = SchemaIndex::build(&raw);
        let res = PatternResolver::new().resolve("select * from odd(name)+ o", &index);
        assert_eq!(res.referenced[0].alias.as_deref(), Some("o"));

        let res = PatternResolver::new().resolve("select * from oddname", &index);
        assert!(!res.has_references());
    }

    #[test]
    fn references_after_cursor_count() {
        // the whole text is scanned, not only the part before the cursor
        let res = resolve("select  from spells");
        assert!(res.is_referenced("spells"));
    }

    #[test]
    fn later_occurrence_supplies_alias() {
        let res = resolve("select spells.id, s.foo from spells s");
        assert_eq!(res.referenced[0].alias.as_deref(), Some("s"));
    }

    #[test]
    fn reserved_alias_does_not_hide_a_later_one() {
        let res = resolve("from spells join x on 1 = 1 union select * from spells sp");
        assert_eq!(res.referenced[0].alias.as_deref(), Some("sp"));
    }

    #[test]
    fn quoted_table_takes_alias() {
        let raw = vec![SchemaEntry::new("my table", "x")];
        let index = SchemaIndex::build(&raw);
        let res = PatternResolver::new().resolve("select * from \"my table\" m where m.", &index);
        assert_eq!(res.referenced[0].alias.as_deref(), Some("m"));
        assert!(res.expanded.contains(&SchemaEntry::new("m", "x")));
    }
}
