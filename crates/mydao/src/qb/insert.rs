//! INSERT builder: single-row column map and multi-row batch form.

use crate::client::DbExecutor;
use crate::error::{DaoError, DaoResult};
use crate::ident::Quoter;
use crate::qb::traits::SqlDao;
use crate::value::Value;

/// INSERT statement builder.
///
/// Two modes: the `set` family accumulates one row of column assignments;
/// `columns` plus `row`/`rows` switches to batch mode with a shared column
/// list. Mixing the two is rejected by `validate`.
#[derive(Clone, Debug)]
pub struct InsertDao {
    /// Table name
    table: String,
    /// Column names, insertion ordered
    columns: Vec<String>,
    /// Value expressions for single-row mode
    value_exprs: Vec<ValueExpr>,
    /// Value tuples for batch mode
    batch_rows: Vec<Vec<Value>>,
    /// Whether `columns` switched this builder to batch mode
    batch_mode: bool,
    /// Quoting configuration
    quoter: Quoter,
}

/// Value expression for one column position.
#[derive(Clone, Debug)]
enum ValueExpr {
    /// Escaped literal
    Literal(Value),
    /// Raw SQL expression (e.g. "NOW()")
    Raw(String),
}

impl ValueExpr {
    fn render(&self) -> String {
        match self {
            ValueExpr::Literal(v) => v.to_literal(),
            ValueExpr::Raw(raw) => raw.clone(),
        }
    }
}

impl InsertDao {
    /// Create an INSERT builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            value_exprs: Vec::new(),
            batch_rows: Vec::new(),
            batch_mode: false,
            quoter: Quoter::default(),
        }
    }

    /// Inject the quoting configuration (table prefix, delimiters).
    pub fn quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    // ==================== Single-row mode ====================

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.push(column.to_string());
        self.value_exprs.push(ValueExpr::Literal(value.into()));
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(column, v)
        } else {
            self
        }
    }

    /// Set a raw SQL expression (rendered without escaping).
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.columns.push(column.to_string());
        self.value_exprs.push(ValueExpr::Raw(expr.to_string()));
        self
    }

    /// Set a JSON column from any serializable value.
    pub fn set_json<T: serde::Serialize>(self, column: &str, value: &T) -> serde_json::Result<Self> {
        let json_val = serde_json::to_value(value)?;
        Ok(self.set(column, json_val))
    }

    // ==================== Batch mode ====================

    /// Set the shared column list and switch to batch mode.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self.batch_mode = true;
        self
    }

    /// Append one value tuple.
    pub fn row(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.batch_rows.push(values.into_iter().collect());
        self
    }

    /// Append several value tuples.
    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
        self.batch_rows.extend(rows);
        self
    }

    // ==================== Rendering & execution ====================

    fn render(&self) -> String {
        let q = &self.quoter;
        let names = self
            .columns
            .iter()
            .map(|c| q.quote_column(c))
            .collect::<Vec<_>>()
            .join(", ");
        let tuples = if self.batch_mode {
            self.batch_rows
                .iter()
                .map(|row| {
                    let vals = row
                        .iter()
                        .map(Value::to_literal)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("({vals})")
                })
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            let vals = self
                .value_exprs
                .iter()
                .map(ValueExpr::render)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({vals})")
        };
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            q.quote_table(&self.table),
            names,
            tuples
        );
        q.resolve_placeholders(&sql)
    }

    /// Run the statement, returning the affected-row count.
    pub async fn execute(self, db: &impl DbExecutor) -> DaoResult<u64> {
        self.validate()?;
        let stmt = self.build();
        db.execute(&stmt.sql).await
    }
}

impl SqlDao for InsertDao {
    fn build_sql(&self) -> String {
        self.render()
    }

    fn validate(&self) -> DaoResult<()> {
        if self.columns.is_empty() {
            return Err(DaoError::columns("InsertDao: no columns to insert"));
        }
        if self.batch_mode {
            if !self.value_exprs.is_empty() {
                return Err(DaoError::columns(
                    "InsertDao: cannot mix set methods with columns/row batch mode",
                ));
            }
            if self.batch_rows.is_empty() {
                return Err(DaoError::columns("InsertDao: batch insert has no rows"));
            }
            for (i, row) in self.batch_rows.iter().enumerate() {
                if row.len() != self.columns.len() {
                    return Err(DaoError::columns(format!(
                        "InsertDao: row {} has {} values, expected {}",
                        i,
                        row.len(),
                        self.columns.len()
                    )));
                }
            }
        } else if !self.batch_rows.is_empty() {
            return Err(DaoError::columns(
                "InsertDao: row() requires a columns() call first",
            ));
        }
        Ok(())
    }
}
