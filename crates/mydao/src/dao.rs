//! DAO facade: one place holding the executor and the quoting configuration.
//!
//! Builders created through a [`Dao`] inherit its [`Quoter`], so the table
//! prefix is set once instead of per statement. The facade also passes the
//! executor contract through, which lets a `&Dao` be used directly as the
//! `db` argument of any terminal call.

use crate::client::DbExecutor;
use crate::error::DaoResult;
use crate::ident::Quoter;
use crate::qb::{CommandDao, DeleteDao, InsertDao, SelectDao, UpdateDao};
use crate::row::Row;
use crate::value::Value;

/// Entry point binding an executor to a quoting configuration.
///
/// ```ignore
/// use mydao::{Condition, Dao};
///
/// let dao = Dao::with_prefix(db, "oc_");
/// let order = dao
///     .select("order")
///     .where_(Condition::eq("order_id", 42)?)
///     .one(&dao)
///     .await;
/// ```
#[derive(Clone, Debug)]
pub struct Dao<E> {
    /// Host-supplied execution primitive
    db: E,
    /// Quoting configuration shared by all builders
    quoter: Quoter,
}

impl<E: DbExecutor> Dao<E> {
    /// Wrap an executor with no table prefix.
    pub fn new(db: E) -> Self {
        Self {
            db,
            quoter: Quoter::default(),
        }
    }

    /// Wrap an executor with a table prefix.
    pub fn with_prefix(db: E, prefix: &str) -> Self {
        Self {
            db,
            quoter: Quoter::new(prefix),
        }
    }

    /// Replace the quoting configuration.
    pub fn with_quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    /// The quoting configuration builders inherit.
    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    /// The wrapped executor.
    pub fn db(&self) -> &E {
        &self.db
    }

    // ==================== Builder entry points ====================

    /// Start a SELECT statement.
    pub fn select(&self, table: &str) -> SelectDao {
        SelectDao::new(table).quoter(self.quoter.clone())
    }

    /// Start an INSERT statement.
    pub fn insert(&self, table: &str) -> InsertDao {
        InsertDao::new(table).quoter(self.quoter.clone())
    }

    /// Start a batch INSERT statement with a shared column list.
    pub fn batch_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: impl IntoIterator<Item = Vec<Value>>,
    ) -> InsertDao {
        self.insert(table).columns(columns).rows(rows)
    }

    /// Start an UPDATE statement.
    pub fn update(&self, table: &str) -> UpdateDao {
        UpdateDao::new(table).quoter(self.quoter.clone())
    }

    /// Start a DELETE statement.
    pub fn delete(&self, table: &str) -> DeleteDao {
        DeleteDao::new(table).quoter(self.quoter.clone())
    }

    /// Wrap a hand-authored SQL statement.
    pub fn command(&self, sql: &str) -> CommandDao {
        CommandDao::new(sql).quoter(self.quoter.clone())
    }

    // ==================== Executor passthrough ====================

    /// Primary key generated by the most recent insert.
    pub async fn last_insert_id(&self) -> DaoResult<i64> {
        self.db.last_insert_id().await
    }
}

impl<E: DbExecutor> DbExecutor for Dao<E> {
    fn query(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<Vec<Row>>> + Send {
        self.db.query(sql)
    }

    fn execute(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<u64>> + Send {
        self.db.execute(sql)
    }

    fn last_insert_id(&self) -> impl std::future::Future<Output = DaoResult<i64>> + Send {
        self.db.last_insert_id()
    }
}
