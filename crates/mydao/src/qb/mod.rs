//! Fluent statement builders for mydao.
//!
//! Each builder accumulates clause state through chained consuming calls and
//! renders a complete MySQL statement string; terminal calls render, execute
//! against a [`DbExecutor`] and map the result rows.
//!
//! # Features
//!
//! - **Escaped literals**: every bound value renders through one escaping
//!   point before interpolation
//! - **Backtick identifier quoting** with automatic table prefixing
//! - **Placeholder syntax**: `{{%table}}` / `[[column]]` tokens in raw
//!   fragments resolve at build time
//! - **Consuming builders**: each call takes `self`, so no state survives a
//!   terminal call
//!
//! # Usage
//!
//! ```ignore
//! use mydao::{qb, Condition, Quoter, Sort};
//!
//! // SELECT
//! let order = qb::select("order")
//!     .quoter(Quoter::new("oc_"))
//!     .where_(Condition::eq("order_id", 42)?)
//!     .one(&db)
//!     .await;
//!
//! // INSERT
//! qb::insert("customer")
//!     .set("name", "alice")
//!     .set("status", 1)
//!     .execute(&db)
//!     .await?;
//!
//! // UPDATE
//! qb::update("order")
//!     .set("status", 5)
//!     .where_(Condition::eq("order_id", 42)?)
//!     .execute(&db)
//!     .await?;
//!
//! // DELETE
//! qb::delete("order_history")
//!     .where_(Condition::eq("order_id", 42)?)
//!     .execute(&db)
//!     .await?;
//! ```

mod command;
mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use command::CommandDao;
pub use delete::DeleteDao;
pub use insert::InsertDao;
pub use select::{SelectDao, Sort};
pub use traits::{SqlDao, Statement};
pub use update::UpdateDao;

use crate::client::DbExecutor;
use crate::row::Row;
use crate::value::Value;

/// Create a SELECT builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = mydao::qb::select("order").where_(Condition::eq("order_id", 1)?);
/// ```
pub fn select(table: &str) -> SelectDao {
    SelectDao::new(table)
}

/// Create an INSERT builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = mydao::qb::insert("customer")
///     .set("name", "alice")
///     .set("email", "alice@example.com");
/// ```
pub fn insert(table: &str) -> InsertDao {
    InsertDao::new(table)
}

/// Create a batch INSERT builder with a shared column list.
///
/// # Example
/// ```ignore
/// let qb = mydao::qb::batch_insert(
///     "order_product",
///     &["order_id", "name"],
///     vec![vec![1.into(), "a".into()], vec![2.into(), "b".into()]],
/// );
/// ```
pub fn batch_insert(
    table: &str,
    columns: &[&str],
    rows: impl IntoIterator<Item = Vec<Value>>,
) -> InsertDao {
    InsertDao::new(table).columns(columns).rows(rows)
}

/// Create an UPDATE builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = mydao::qb::update("order")
///     .set("status", 5)
///     .where_(Condition::eq("order_id", 1)?);
/// ```
pub fn update(table: &str) -> UpdateDao {
    UpdateDao::new(table)
}

/// Create a DELETE builder for the given table.
///
/// An empty condition deletes the whole table; there is no implicit guard.
///
/// # Example
/// ```ignore
/// let qb = mydao::qb::delete("order").where_(Condition::eq("order_id", 1)?);
/// ```
pub fn delete(table: &str) -> DeleteDao {
    DeleteDao::new(table)
}

/// Wrap a hand-authored SQL statement.
///
/// # Example
/// ```ignore
/// let rows = mydao::qb::command("SELECT * FROM `oc_order` WHERE order_id = :id")
///     .bind_value(":id", 42)
///     .all(&db)
///     .await;
/// ```
pub fn command(sql: &str) -> CommandDao {
    CommandDao::new(sql)
}

/// Run a read statement, degrading failures to an empty row set.
pub(crate) async fn fetch_rows(stmt: &Statement, db: &impl DbExecutor) -> Vec<Row> {
    match db.query(&stmt.sql).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(sql = %stmt.sql, error = %err, "read failed, returning empty result");
            Vec::new()
        }
    }
}
