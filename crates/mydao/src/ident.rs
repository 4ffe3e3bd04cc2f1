//! Identifier quoting, table prefixing and placeholder resolution.
//!
//! [`Quoter`] carries the injected configuration for the quoting layer: the
//! table-prefix string and the delimiter pair (backticks by default). It
//! turns raw identifiers into dialect-safe fragments and resolves the
//! `{{table}}` / `{{%table}}` / `[[column]]` token syntax used in
//! hand-written SQL.
//!
//! Quoting is idempotent: a name that already contains the delimiter is
//! passed through untouched, as are raw expressions (anything with a `(`
//! or an unresolved placeholder token in it).

use crate::value::Value;
use std::sync::OnceLock;

/// Identifier quoting configuration.
///
/// # Example
/// ```ignore
/// use mydao::Quoter;
///
/// let q = Quoter::new("oc_");
/// assert_eq!(q.quote_table("order"), "`oc_order`");
/// assert_eq!(q.quote_column("o.order_id"), "`o`.`order_id`");
/// ```
#[derive(Clone, Debug)]
pub struct Quoter {
    prefix: String,
    left: char,
    right: char,
}

impl Default for Quoter {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            left: '`',
            right: '`',
        }
    }
}

impl Quoter {
    /// Create a quoter with the given table prefix and backtick delimiters.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Override the delimiter pair.
    pub fn with_delimiters(mut self, left: char, right: char) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// The configured table prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // ==================== Tables ====================

    /// Prepend the prefix unless the name already carries it.
    ///
    /// The check is a case-insensitive containment test, matching the
    /// behavior callers of this layer have historically relied on.
    pub fn apply_prefix(&self, table: &str) -> String {
        if self.prefix.is_empty()
            || table
                .to_ascii_lowercase()
                .contains(&self.prefix.to_ascii_lowercase())
        {
            table.to_string()
        } else {
            format!("{}{}", self.prefix, table)
        }
    }

    /// Quote a table name without applying the prefix.
    ///
    /// Raw expressions (containing `(` or an unresolved `{{` token) pass
    /// through unchanged. Dotted names are quoted per segment.
    pub fn quote_table_name(&self, name: &str) -> String {
        if name.contains('(') || name.contains("{{") {
            return name.to_string();
        }
        if name.contains('.') {
            return name
                .split('.')
                .map(|part| self.quote_simple(part))
                .collect::<Vec<_>>()
                .join(".");
        }
        self.quote_simple(name)
    }

    /// Apply the prefix, then quote as a table name.
    pub fn quote_table(&self, name: &str) -> String {
        if name.contains('(') || name.contains("{{") {
            return name.to_string();
        }
        self.quote_table_name(&self.apply_prefix(name))
    }

    // ==================== Columns ====================

    /// Quote a column reference.
    ///
    /// Handles `qualifier.column` (the qualifier is quoted as a table
    /// reference) and `expr AS alias` (the alias is quoted as a simple
    /// name). A bare `*` is never quoted.
    pub fn quote_column(&self, name: &str) -> String {
        if name.contains('(') || name.contains("[[") || name.contains("{{") {
            return name.to_string();
        }
        if let Some(pos) = find_as(name) {
            let expr = name[..pos].trim_end();
            let alias = name[pos + 4..].trim_start();
            return format!("{} AS {}", self.quote_column(expr), self.quote_simple(alias));
        }
        if let Some(pos) = name.rfind('.') {
            let qualifier = self.quote_table_name(&name[..pos]);
            return format!("{}.{}", qualifier, self.quote_simple_column(&name[pos + 1..]));
        }
        self.quote_simple_column(name)
    }

    // ==================== Values ====================

    /// Render a scalar as a literal fragment.
    pub fn quote_value(&self, value: &Value) -> String {
        value.to_literal()
    }

    // ==================== Placeholders ====================

    /// Replace `{{table}}` / `{{%table}}` / `[[column]]` tokens with their
    /// quoted equivalents.
    ///
    /// `%` markers inside a table token are replaced with the configured
    /// prefix before quoting; a token without a marker is quoted but not
    /// prefixed.
    pub fn resolve_placeholders(&self, sql: &str) -> String {
        placeholder_re()
            .replace_all(sql, |caps: &regex::Captures<'_>| {
                if let Some(column) = caps.get(2) {
                    self.quote_column(column.as_str())
                } else if let Some(table) = caps.get(1) {
                    let name = table.as_str().replace('%', &self.prefix);
                    self.quote_table_name(&name)
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    // ==================== Internals ====================

    fn quote_simple(&self, name: &str) -> String {
        if name.contains(self.left) {
            name.to_string()
        } else {
            format!("{}{}{}", self.left, name, self.right)
        }
    }

    fn quote_simple_column(&self, name: &str) -> String {
        if name == "*" || name.contains(self.left) {
            name.to_string()
        } else {
            format!("{}{}{}", self.left, name, self.right)
        }
    }
}

/// Byte offset of the last ` AS ` keyword, case-insensitive.
fn find_as(name: &str) -> Option<usize> {
    name.to_ascii_lowercase().rfind(" as ")
}

fn placeholder_re() -> &'static regex::Regex {
    static PLACEHOLDER_RE: OnceLock<regex::Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        regex::Regex::new(r"\{\{(%?[\w\-. ]+%?)\}\}|\[\[([\w\-. ]+)\]\]")
            .expect("invalid built-in placeholder regex")
    })
}
