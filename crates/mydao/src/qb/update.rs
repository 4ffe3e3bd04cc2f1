//! UPDATE builder: SET assignments plus a single condition tree.

use crate::client::DbExecutor;
use crate::condition::Condition;
use crate::error::{DaoError, DaoResult};
use crate::ident::Quoter;
use crate::qb::traits::SqlDao;
use crate::value::Value;

/// SET field value type.
#[derive(Clone, Debug)]
enum SetField {
    /// Escaped literal
    Value(Value),
    /// Raw SQL expression
    Raw(String),
}

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct UpdateDao {
    /// Table name
    table: String,
    /// SET clauses, insertion ordered
    set_fields: Vec<(String, SetField)>,
    /// WHERE condition; None or empty omits the clause
    where_cond: Option<Condition>,
    /// Quoting configuration
    quoter: Quoter,
}

impl UpdateDao {
    /// Create an UPDATE builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            where_cond: None,
            quoter: Quoter::default(),
        }
    }

    /// Inject the quoting configuration (table prefix, delimiters).
    pub fn quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    // ==================== SET clauses ====================

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Value(value.into())));
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
        self.set_fields
            .push((column.to_string(), SetField::Raw(expr.to_string())));
        self
    }

    /// Set a JSON column from any serializable value.
    pub fn set_json<T: serde::Serialize>(self, column: &str, value: &T) -> serde_json::Result<Self> {
        let json_val = serde_json::to_value(value)?;
        Ok(self.set(column, json_val))
    }

    // ==================== WHERE ====================

    /// Set the WHERE condition.
    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_cond = Some(cond);
        self
    }

    // ==================== Rendering & execution ====================

    fn render(&self) -> String {
        let q = &self.quoter;
        let set_parts = self
            .set_fields
            .iter()
            .map(|(col, field)| match field {
                SetField::Value(v) => format!("{} = {}", q.quote_column(col), v.to_literal()),
                SetField::Raw(expr) => format!("{} = {}", q.quote_column(col), expr),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {} SET {}", q.quote_table(&self.table), set_parts);
        if let Some(cond) = &self.where_cond {
            let fragment = cond.build(q);
            if !fragment.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&fragment);
            }
        }
        q.resolve_placeholders(&sql)
    }

    /// Run the statement, returning the affected-row count.
    pub async fn execute(self, db: &impl DbExecutor) -> DaoResult<u64> {
        self.validate()?;
        let stmt = self.build();
        db.execute(&stmt.sql).await
    }
}

impl SqlDao for UpdateDao {
    fn build_sql(&self) -> String {
        self.render()
    }

    fn validate(&self) -> DaoResult<()> {
        if self.set_fields.is_empty() {
            return Err(DaoError::columns("UpdateDao: SET clause cannot be empty"));
        }
        Ok(())
    }
}
