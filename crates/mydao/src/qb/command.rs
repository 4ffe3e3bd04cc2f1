//! Hand-authored statement wrapper.
//!
//! [`CommandDao`] carries a complete SQL string instead of accumulated
//! clauses: terminal calls execute it as written (after token substitution
//! and placeholder resolution) and never inject LIMIT or re-render from
//! builder state.

use crate::client::DbExecutor;
use crate::condition::substitute;
use crate::error::DaoResult;
use crate::ident::Quoter;
use crate::qb::fetch_rows;
use crate::qb::traits::SqlDao;
use crate::row::Row;
use crate::value::Value;

/// Raw SQL statement with literal token substitution.
#[derive(Clone, Debug)]
pub struct CommandDao {
    /// Statement text, possibly carrying tokens and placeholder syntax
    sql: String,
    /// Token to replacement pairs, applied in one pass
    subs: Vec<(String, String)>,
    /// Quoting configuration
    quoter: Quoter,
}

impl CommandDao {
    /// Wrap a hand-authored statement.
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            subs: Vec::new(),
            quoter: Quoter::default(),
        }
    }

    /// Inject the quoting configuration (table prefix, delimiters).
    pub fn quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    /// Bind a token to replacement text, substituted verbatim.
    pub fn bind(mut self, token: &str, replacement: impl Into<String>) -> Self {
        self.subs.push((token.to_string(), replacement.into()));
        self
    }

    /// Bind a token to a value, substituted as an escaped literal.
    pub fn bind_value(self, token: &str, value: impl Into<Value>) -> Self {
        let literal = value.into().to_literal();
        self.bind(token, literal)
    }

    fn render(&self) -> String {
        let sql = if self.subs.is_empty() {
            self.sql.clone()
        } else {
            substitute(&self.sql, &self.subs)
        };
        self.quoter.resolve_placeholders(&sql)
    }

    // ==================== Terminals ====================

    /// Fetch all rows.
    pub async fn all(self, db: &impl DbExecutor) -> Vec<Row> {
        let stmt = self.build();
        fetch_rows(&stmt, db).await
    }

    /// Fetch the first row. The statement runs as written, without a
    /// LIMIT clause being added.
    pub async fn one(self, db: &impl DbExecutor) -> Option<Row> {
        let stmt = self.build();
        fetch_rows(&stmt, db).await.into_iter().next()
    }

    /// Fetch the first column of the first row.
    pub async fn scalar(self, db: &impl DbExecutor) -> Option<Value> {
        self.one(db).await.and_then(|row| row.first().cloned())
    }

    /// Fetch the first column of every row.
    pub async fn column(self, db: &impl DbExecutor) -> Vec<Value> {
        let stmt = self.build();
        fetch_rows(&stmt, db)
            .await
            .into_iter()
            .filter_map(|row| row.first().cloned())
            .collect()
    }

    /// Run the statement, returning the affected-row count.
    pub async fn execute(self, db: &impl DbExecutor) -> DaoResult<u64> {
        let stmt = self.build();
        db.execute(&stmt.sql).await
    }
}

impl SqlDao for CommandDao {
    fn build_sql(&self) -> String {
        self.render()
    }
}
