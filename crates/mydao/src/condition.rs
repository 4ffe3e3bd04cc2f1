//! Condition tree for WHERE and HAVING predicates.
//!
//! [`Condition`] is a sum type over every predicate shape the builders
//! accept: equality, NULL checks, IN / NOT IN lists, LIKE / NOT LIKE
//! patterns, raw fragments and AND/OR composites. Construction validates
//! the shape (an empty column name is rejected up front), so rendering is
//! infallible.
//!
//! # Example
//! ```ignore
//! use mydao::{Condition, Quoter};
//!
//! let cond = Condition::and([
//!     Condition::eq("status", 1)?,
//!     Condition::in_list("site_id", [1, 2, 3])?,
//! ]);
//! assert_eq!(
//!     cond.build(&Quoter::default()),
//!     "(`status` = 1) AND (`site_id` IN (1, 2, 3))"
//! );
//! ```

use crate::error::{DaoError, DaoResult};
use crate::ident::Quoter;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Boolean operator joining condition-list entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    /// SQL keyword for the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for BoolOp {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BoolOp::And),
            "OR" => Ok(BoolOp::Or),
            other => Err(DaoError::operator(format!(
                "expected AND or OR, got {other:?}"
            ))),
        }
    }
}

/// Internal representation of a [`Condition`].
#[derive(Clone, Debug)]
enum ConditionKind {
    /// No predicate; renders to nothing and the clause is omitted.
    Empty,
    /// Raw SQL fragment (escape hatch).
    ///
    /// # Safety
    /// Never build a raw fragment from unsanitized user input.
    Raw(String),
    /// `column = value`
    Eq { column: String, value: Value },
    /// `column IS NULL`
    IsNull { column: String },
    /// `column IN (…)`; empty list renders the unsatisfiable `0 = 1`
    In { column: String, values: Vec<Value> },
    /// `column NOT IN (…)`; empty list renders the vacuous `1 = 1`
    NotIn { column: String, values: Vec<Value> },
    /// `column LIKE '%p%'` per pattern, joined by the inner operator
    Like {
        column: String,
        patterns: Vec<String>,
        join: BoolOp,
    },
    /// `column NOT LIKE '%p%'` per pattern
    NotLike {
        column: String,
        patterns: Vec<String>,
        join: BoolOp,
    },
    /// Children joined with AND
    And(Vec<Condition>),
    /// Children joined with OR
    Or(Vec<Condition>),
}

/// One node of a WHERE/HAVING predicate tree.
#[derive(Clone, Debug)]
pub struct Condition {
    kind: ConditionKind,
    /// Literal token substitutions applied to the rendered fragment.
    subs: Vec<(String, String)>,
}

impl Condition {
    fn from_kind(kind: ConditionKind) -> Self {
        Self {
            kind,
            subs: Vec::new(),
        }
    }

    /// A condition that renders to nothing.
    pub fn empty() -> Self {
        Self::from_kind(ConditionKind::Empty)
    }

    /// Use a SQL fragment verbatim.
    ///
    /// The fragment may carry `{{table}}` / `[[column]]` placeholder tokens
    /// and `:name` substitution tokens (see [`Condition::with_subs`]).
    ///
    /// # Safety
    /// Never build a raw fragment from unsanitized user input.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::from_kind(ConditionKind::Raw(sql.into()))
    }

    /// `column = value`; a NULL value normalizes to `column IS NULL`.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> DaoResult<Self> {
        let column = column_name(column)?;
        let value = value.into();
        if value.is_null() {
            return Ok(Self::from_kind(ConditionKind::IsNull { column }));
        }
        Ok(Self::from_kind(ConditionKind::Eq { column, value }))
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::IsNull {
            column: column_name(column)?,
        }))
    }

    /// `column IN (values…)`
    ///
    /// Duplicates are removed preserving first occurrence. An empty list
    /// renders `0 = 1`; a single value collapses to `column = value`.
    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::In {
            column: column_name(column)?,
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// `column NOT IN (values…)`
    ///
    /// Duplicates are removed preserving first occurrence. An empty list
    /// renders `1 = 1`; a single value collapses to `column <> value`.
    pub fn not_in<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::NotIn {
            column: column_name(column)?,
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// `column LIKE '%pattern%'` per pattern, joined with AND.
    pub fn like<P: Into<String>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = P>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::Like {
            column: column_name(column)?,
            patterns: patterns.into_iter().map(Into::into).collect(),
            join: BoolOp::And,
        }))
    }

    /// `column LIKE '%pattern%'` per pattern, joined with OR.
    pub fn like_any<P: Into<String>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = P>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::Like {
            column: column_name(column)?,
            patterns: patterns.into_iter().map(Into::into).collect(),
            join: BoolOp::Or,
        }))
    }

    /// `column NOT LIKE '%pattern%'` per pattern, joined with AND.
    pub fn not_like<P: Into<String>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = P>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::NotLike {
            column: column_name(column)?,
            patterns: patterns.into_iter().map(Into::into).collect(),
            join: BoolOp::And,
        }))
    }

    /// `column NOT LIKE '%pattern%'` per pattern, joined with OR.
    pub fn not_like_any<P: Into<String>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = P>,
    ) -> DaoResult<Self> {
        Ok(Self::from_kind(ConditionKind::NotLike {
            column: column_name(column)?,
            patterns: patterns.into_iter().map(Into::into).collect(),
            join: BoolOp::Or,
        }))
    }

    /// Join conditions with AND.
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Self::from_kind(ConditionKind::And(children.into_iter().collect()))
    }

    /// Join conditions with OR.
    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Self::from_kind(ConditionKind::Or(children.into_iter().collect()))
    }

    /// Attach literal token substitutions.
    ///
    /// Applied to this node's rendered fragment: single pass, longest token
    /// first, replacement text is inserted verbatim (not escaped).
    pub fn with_subs<K, V>(mut self, subs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.subs
            .extend(subs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Render the predicate fragment.
    ///
    /// An [`empty`](Condition::empty) condition (or a composite whose
    /// children all render empty) produces an empty string, which makes the
    /// assembler omit the clause entirely.
    pub fn build(&self, quoter: &Quoter) -> String {
        let sql = self.kind.build(quoter);
        if self.subs.is_empty() || sql.is_empty() {
            sql
        } else {
            substitute(&sql, &self.subs)
        }
    }
}

impl ConditionKind {
    fn build(&self, quoter: &Quoter) -> String {
        match self {
            ConditionKind::Empty => String::new(),
            ConditionKind::Raw(sql) => sql.clone(),
            ConditionKind::Eq { column, value } => format!(
                "{} = {}",
                quoter.quote_column(column),
                quoter.quote_value(value)
            ),
            ConditionKind::IsNull { column } => {
                format!("{} IS NULL", quoter.quote_column(column))
            }
            ConditionKind::In { column, values } => {
                build_in(quoter, column, values, false)
            }
            ConditionKind::NotIn { column, values } => {
                build_in(quoter, column, values, true)
            }
            ConditionKind::Like {
                column,
                patterns,
                join,
            } => build_like(quoter, column, patterns, *join, false),
            ConditionKind::NotLike {
                column,
                patterns,
                join,
            } => build_like(quoter, column, patterns, *join, true),
            ConditionKind::And(children) => build_composite(quoter, children, BoolOp::And),
            ConditionKind::Or(children) => build_composite(quoter, children, BoolOp::Or),
        }
    }
}

fn build_in(quoter: &Quoter, column: &str, values: &[Value], negated: bool) -> String {
    let mut unique: Vec<&Value> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    let column = quoter.quote_column(column);
    match unique.as_slice() {
        // explicit empty list must never be silently dropped
        [] if negated => "1 = 1".to_string(),
        [] => "0 = 1".to_string(),
        [single] => {
            let op = if negated { "<>" } else { "=" };
            format!("{} {} {}", column, op, quoter.quote_value(single))
        }
        _ => {
            let list = unique
                .iter()
                .map(|v| quoter.quote_value(v))
                .collect::<Vec<_>>()
                .join(", ");
            let op = if negated { "NOT IN" } else { "IN" };
            format!("{} {} ({})", column, op, list)
        }
    }
}

fn build_like(
    quoter: &Quoter,
    column: &str,
    patterns: &[String],
    join: BoolOp,
    negated: bool,
) -> String {
    if patterns.is_empty() {
        return String::new();
    }
    let column = quoter.quote_column(column);
    let op = if negated { "NOT LIKE" } else { "LIKE" };
    patterns
        .iter()
        .map(|p| {
            let wrapped = Value::Str(format!("%{p}%"));
            format!("{} {} {}", column, op, quoter.quote_value(&wrapped))
        })
        .collect::<Vec<_>>()
        .join(&format!(" {} ", join.as_sql()))
}

fn build_composite(quoter: &Quoter, children: &[Condition], join: BoolOp) -> String {
    let mut fragments: Vec<String> = children
        .iter()
        .map(|c| c.build(quoter))
        .filter(|f| !f.is_empty())
        .collect();
    match fragments.len() {
        0 => String::new(),
        1 => fragments.remove(0),
        _ => fragments
            .iter()
            .map(|f| format!("({f})"))
            .collect::<Vec<_>>()
            .join(&format!(" {} ", join.as_sql())),
    }
}

fn column_name(column: impl Into<String>) -> DaoResult<String> {
    let column = column.into();
    if column.trim().is_empty() {
        return Err(DaoError::condition("column name is empty"));
    }
    Ok(column)
}

/// Single-pass literal token replacement, longest token first.
///
/// Replaced text is never rescanned, so a replacement containing another
/// token is left alone.
pub(crate) fn substitute(input: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return input.to_string();
    }
    let mut order: Vec<usize> = (0..pairs.len()).collect();
    order.sort_by(|&a, &b| pairs[b].0.len().cmp(&pairs[a].0.len()));

    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    'scan: while i < input.len() {
        for &k in &order {
            let (token, replacement) = &pairs[k];
            if !token.is_empty() && input[i..].starts_with(token.as_str()) {
                out.push_str(replacement);
                i += token.len();
                continue 'scan;
            }
        }
        if let Some(ch) = input[i..].chars().next() {
            out.push(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    out
}
