//! Base trait and rendered-statement type for the builders.

use crate::error::DaoResult;
use chrono::{DateTime, Utc};

/// A fully rendered statement.
#[derive(Clone, Debug)]
pub struct Statement {
    /// Placeholder-resolved SQL text
    pub sql: String,
    /// When the statement was rendered
    pub rendered_at: DateTime<Utc>,
}

impl Statement {
    pub(crate) fn new(sql: String) -> Self {
        tracing::debug!(sql = %sql, "rendered statement");
        Self {
            sql,
            rendered_at: Utc::now(),
        }
    }
}

/// Base trait for all statement builders.
///
/// Rendering is infallible; `validate()` guards execution on the write
/// path (empty column sets, mixed insert modes) and defaults to Ok.
pub trait SqlDao {
    /// Render the SQL string from the current state.
    fn build_sql(&self) -> String;

    /// Validate builder state before execution.
    fn validate(&self) -> DaoResult<()> {
        Ok(())
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        self.build_sql()
    }

    /// Produce the rendered statement with its timestamp.
    fn build(&self) -> Statement {
        Statement::new(self.build_sql())
    }
}
