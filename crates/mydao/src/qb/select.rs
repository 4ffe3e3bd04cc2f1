//! SELECT builder: clause accumulation, rendering and read terminals.

use crate::client::DbExecutor;
use crate::condition::{BoolOp, Condition};
use crate::ident::Quoter;
use crate::qb::fetch_rows;
use crate::qb::traits::{SqlDao, Statement};
use crate::row::Row;
use crate::value::Value;
use indexmap::{IndexMap, IndexSet};

/// Sort direction for ORDER BY entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    /// SQL keyword for the direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Sort::Asc => "ASC",
            Sort::Desc => "DESC",
        }
    }
}

/// SELECT statement builder.
///
/// Chained calls consume and return the builder; a terminal call consumes
/// it for good, so state never leaks between logical queries.
#[derive(Clone, Debug)]
pub struct SelectDao {
    /// Table the FROM clause names
    table: String,
    /// SELECT columns; empty means `*`
    select_cols: IndexSet<String>,
    /// LEFT JOIN (table, ON fragment) pairs in call order
    joins: Vec<(String, String)>,
    /// WHERE condition list: (operator, node) entries
    where_list: Vec<(BoolOp, Condition)>,
    /// GROUP BY column
    group_col: Option<String>,
    /// HAVING condition
    having_cond: Option<Condition>,
    /// ORDER BY column to direction, insertion ordered
    order_cols: IndexMap<String, Sort>,
    /// Row offset, clamped to >= 0
    offset: i64,
    /// Row limit, clamped to >= 0; None means unbounded
    limit: Option<i64>,
    /// Column to key result maps by
    index_col: Option<String>,
    /// Quoting configuration
    quoter: Quoter,
}

impl SelectDao {
    /// Create a SELECT builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select_cols: IndexSet::new(),
            joins: Vec::new(),
            where_list: Vec::new(),
            group_col: None,
            having_cond: None,
            order_cols: IndexMap::new(),
            offset: 0,
            limit: None,
            index_col: None,
            quoter: Quoter::default(),
        }
    }

    /// Inject the quoting configuration (table prefix, delimiters).
    pub fn quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    // ==================== SELECT columns ====================

    /// Replace the SELECT list. Duplicates are dropped, `*` passes through.
    pub fn select(mut self, cols: &[&str]) -> Self {
        self.select_cols = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append one SELECT column, de-duplicated.
    pub fn add_select(mut self, col: &str) -> Self {
        self.select_cols.insert(col.to_string());
        self
    }

    /// Replace the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    // ==================== JOIN ====================

    /// Add a LEFT JOIN. Repeatable; concatenated in call order.
    ///
    /// The ON fragment is used raw and may carry `[[column]]` / `{{table}}`
    /// placeholder tokens.
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push((table.to_string(), on.to_string()));
        self
    }

    // ==================== WHERE ====================

    /// Replace the condition list wholesale.
    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_list = vec![(BoolOp::And, cond)];
        self
    }

    /// Append a condition joined with AND.
    pub fn and_where(mut self, cond: Condition) -> Self {
        self.where_list.push((BoolOp::And, cond));
        self
    }

    /// Append a condition joined with OR.
    pub fn or_where(mut self, cond: Condition) -> Self {
        self.where_list.push((BoolOp::Or, cond));
        self
    }

    // ==================== Grouping & ordering ====================

    /// Set the GROUP BY column.
    pub fn group_by(mut self, col: &str) -> Self {
        self.group_col = Some(col.to_string());
        self
    }

    /// Set the HAVING condition.
    pub fn having(mut self, cond: Condition) -> Self {
        self.having_cond = Some(cond);
        self
    }

    /// Add an ORDER BY entry. Re-adding a column replaces its direction.
    pub fn order_by(mut self, col: &str, direction: Sort) -> Self {
        self.order_cols.insert(col.to_string(), direction);
        self
    }

    /// Add an ascending ORDER BY entry.
    pub fn order_by_asc(self, col: &str) -> Self {
        self.order_by(col, Sort::Asc)
    }

    /// Add a descending ORDER BY entry.
    pub fn order_by_desc(self, col: &str) -> Self {
        self.order_by(col, Sort::Desc)
    }

    // ==================== Pagination ====================

    /// Set the row offset. Negative input clamps to 0.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = n.max(0);
        self
    }

    /// Set the row limit. Negative input clamps to 0.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n.max(0));
        self
    }

    // ==================== Index-by ====================

    /// Key result maps by this column's value.
    ///
    /// The column is implicitly added to a non-`*` select list so the key
    /// is always present in the rows.
    pub fn index_by(mut self, col: &str) -> Self {
        self.index_col = Some(col.to_string());
        self
    }

    // ==================== Rendering ====================

    fn render_select_list(&self) -> String {
        let q = &self.quoter;
        if self.select_cols.is_empty() {
            return "*".to_string();
        }
        let mut cols: Vec<String> = self
            .select_cols
            .iter()
            .map(|c| q.quote_column(c))
            .collect();
        if let Some(index) = &self.index_col {
            if !self.select_cols.contains("*") && !self.select_cols.contains(index.as_str()) {
                cols.push(q.quote_column(index));
            }
        }
        cols.join(", ")
    }

    fn render_where(&self) -> String {
        let q = &self.quoter;
        let mut out = String::new();
        for (op, cond) in &self.where_list {
            let fragment = cond.build(q);
            if fragment.is_empty() {
                continue;
            }
            if out.is_empty() {
                // leading operator is ignored
                out = format!("({fragment})");
            } else {
                out.push_str(&format!(" {} ({})", op.as_sql(), fragment));
            }
        }
        out
    }

    fn push_common_clauses(&self, sql: &mut String) {
        let q = &self.quoter;
        for (table, on) in &self.joins {
            sql.push_str(&format!(" LEFT JOIN {} ON {}", q.quote_table(table), on));
        }
        let where_sql = self.render_where();
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
    }

    fn render(&self) -> String {
        let q = &self.quoter;
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.render_select_list(),
            q.quote_table(&self.table)
        );
        self.push_common_clauses(&mut sql);
        if let Some(group) = &self.group_col {
            sql.push_str(" GROUP BY ");
            sql.push_str(&q.quote_column(group));
        }
        if let Some(having) = &self.having_cond {
            let fragment = having.build(q);
            if !fragment.is_empty() {
                sql.push_str(" HAVING ");
                sql.push_str(&fragment);
            }
        }
        if !self.order_cols.is_empty() {
            let order = self
                .order_cols
                .iter()
                .map(|(col, dir)| format!("{} {}", q.quote_column(col), dir.as_sql()))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {},{}", self.offset, limit));
        }
        q.resolve_placeholders(&sql)
    }

    /// Aggregate form: `SELECT <agg> AS `n`` over FROM + JOIN + WHERE.
    fn render_aggregate(&self, agg: &str) -> String {
        let q = &self.quoter;
        let mut sql = format!(
            "SELECT {} AS {} FROM {}",
            agg,
            q.quote_column("n"),
            q.quote_table(&self.table)
        );
        self.push_common_clauses(&mut sql);
        q.resolve_placeholders(&sql)
    }

    // ==================== Read terminals ====================
    //
    // Execution failures degrade to the not-found sentinel (logged at
    // warn level), matching the layer's read-path contract.

    /// Fetch all rows.
    pub async fn all(self, db: &impl DbExecutor) -> Vec<Row> {
        let stmt = self.build();
        fetch_rows(&stmt, db).await
    }

    /// Fetch all rows keyed by the index-by column's value.
    ///
    /// Key collisions overwrite; rows without the column (or no index-by
    /// at all) fall back to positional keys.
    pub async fn all_indexed(self, db: &impl DbExecutor) -> IndexMap<String, Row> {
        let index_col = self.index_col.clone();
        let stmt = self.build();
        let rows = fetch_rows(&stmt, db).await;
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| (row_key(&row, index_col.as_deref(), i), row))
            .collect()
    }

    /// Fetch the first row, forcing `LIMIT <offset>,1`.
    pub async fn one(self, db: &impl DbExecutor) -> Option<Row> {
        let qb = self.limit(1);
        let stmt = qb.build();
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

    /// Fetch one value per row, keyed by the index-by column.
    ///
    /// The value comes from the first non-index column of each row.
    pub async fn column_indexed(self, db: &impl DbExecutor) -> IndexMap<String, Value> {
        let index_col = self.index_col.clone();
        let stmt = self.build();
        let rows = fetch_rows(&stmt, db).await;
        rows.into_iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let key = row_key(&row, index_col.as_deref(), i);
                let value = match index_col.as_deref() {
                    Some(col) => row
                        .iter()
                        .find(|(name, _)| *name != col)
                        .map(|(_, v)| v.clone())
                        .or_else(|| row.first().cloned()),
                    None => row.first().cloned(),
                };
                value.map(|v| (key, v))
            })
            .collect()
    }

    /// Count matching rows. Returns `0.0` on an empty set or a failed read.
    pub async fn count(self, db: &impl DbExecutor) -> f64 {
        let stmt = Statement::new(self.render_aggregate("COUNT(*)"));
        aggregate_value(&stmt, db).await
    }

    /// Sum a column over matching rows. A NULL SUM maps to `0.0`.
    pub async fn sum(self, column: &str, db: &impl DbExecutor) -> f64 {
        let agg = format!("SUM({})", self.quoter.quote_column(column));
        let stmt = Statement::new(self.render_aggregate(&agg));
        aggregate_value(&stmt, db).await
    }

    /// Whether any row matches.
    pub async fn exist(self, db: &impl DbExecutor) -> bool {
        self.count(db).await != 0.0
    }
}

impl SqlDao for SelectDao {
    fn build_sql(&self) -> String {
        self.render()
    }
}

fn row_key(row: &Row, index_col: Option<&str>, position: usize) -> String {
    index_col
        .and_then(|col| row.get(col))
        .map(Value::key_string)
        .unwrap_or_else(|| position.to_string())
}

async fn aggregate_value(stmt: &Statement, db: &impl DbExecutor) -> f64 {
    fetch_rows(stmt, db)
        .await
        .first()
        .and_then(|row| row.get("n").or_else(|| row.first()))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
