//! # mydao
//!
//! A fluent MySQL statement builder and DAO layer for Rust.
//!
//! ## Features
//!
//! - **SQL explicit**: every builder renders one complete statement string
//!   you can inspect with `to_sql()` before it runs
//! - **Single escape point**: bound values carry their type to the render
//!   step and interpolate through one escaping routine
//! - **Backtick quoting** with idempotent identifier handling and automatic
//!   table prefixing
//! - **Typed conditions**: `IN` / `LIKE` / `AND` / `OR` trees built from
//!   named constructors, validated before any SQL is assembled
//! - **Host-supplied execution**: the layer drives any [`DbExecutor`], it
//!   owns no connection or pool
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use mydao::{qb, Condition, Quoter};
//!
//! // SELECT
//! let orders = qb::select("order")
//!     .quoter(Quoter::new("oc_"))
//!     .select(&["order_id", "total"])
//!     .where_(Condition::eq("status", 1)?)
//!     .order_by_desc("date_added")
//!     .limit(10)
//!     .all(&db)
//!     .await;
//!
//! // INSERT
//! qb::insert("customer")
//!     .set("name", "alice")
//!     .set("email", "alice@example.com")
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
//! qb::delete("order")
//!     .where_(Condition::eq("order_id", 42)?)
//!     .execute(&db)
//!     .await?;
//! ```
//!
//! ## DAO facade
//!
//! [`Dao`] binds an executor to a quoting configuration so the table prefix
//! is set once:
//!
//! ```ignore
//! use mydao::{Condition, Dao};
//!
//! let dao = Dao::with_prefix(db, "oc_");
//! let order = dao.select("order").where_(Condition::eq("order_id", 42)?).one(&dao).await;
//! let id = dao.last_insert_id().await?;
//! ```

pub mod client;
pub mod condition;
pub mod dao;
pub mod error;
pub mod ident;
pub mod qb;
pub mod row;
pub mod value;

pub use client::DbExecutor;
pub use condition::{BoolOp, Condition};
pub use dao::Dao;
pub use error::{DaoError, DaoResult};
pub use ident::Quoter;
pub use row::Row;
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    CommandDao, DeleteDao, InsertDao, SelectDao, Sort, SqlDao, Statement, UpdateDao,
    batch_insert, command, delete, insert, select, update,
};
