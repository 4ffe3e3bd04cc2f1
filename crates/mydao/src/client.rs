//! Execution-primitive trait for host-supplied database access.

use crate::error::DaoResult;
use crate::row::Row;

/// The already-connected, already-pooled execution primitive this layer
/// sits on.
///
/// The contract carries finished SQL strings only — quoting and value
/// escaping happen before a statement reaches this boundary, and no
/// parameter list crosses it. Implementations map their driver's failures
/// to [`DaoError::Execution`](crate::DaoError::Execution).
pub trait DbExecutor: Send + Sync {
    /// Run a read statement and return its rows.
    fn query(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<Vec<Row>>> + Send;

    /// Run a write statement and return the affected-row count.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<u64>> + Send;

    /// Primary key generated by the most recent insert.
    fn last_insert_id(&self) -> impl std::future::Future<Output = DaoResult<i64>> + Send;
}

impl<E: DbExecutor> DbExecutor for &E {
    fn query(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<Vec<Row>>> + Send {
        (**self).query(sql)
    }

    fn execute(&self, sql: &str) -> impl std::future::Future<Output = DaoResult<u64>> + Send {
        (**self).execute(sql)
    }

    fn last_insert_id(&self) -> impl std::future::Future<Output = DaoResult<i64>> + Send {
        (**self).last_insert_id()
    }
}
