//! Error types for mydao

use thiserror::Error;

/// Result type alias for mydao operations
pub type DaoResult<T> = Result<T, DaoError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum DaoError {
    /// Malformed condition input (empty column name, bad structure)
    #[error("Condition error: {0}")]
    Condition(String),

    /// Insert/update called with an empty or inconsistent column set
    #[error("Column specification error: {0}")]
    Columns(String),

    /// Boolean operator was neither AND nor OR
    #[error("Invalid boolean operator: {0}")]
    Operator(String),

    /// The execution primitive rejected or failed a statement
    #[error("Execution error: {0}")]
    Execution(String),
}

impl DaoError {
    /// Create a condition error
    pub fn condition(message: impl Into<String>) -> Self {
        Self::Condition(message.into())
    }

    /// Create a column specification error
    pub fn columns(message: impl Into<String>) -> Self {
        Self::Columns(message.into())
    }

    /// Create an invalid boolean operator error
    pub fn operator(message: impl Into<String>) -> Self {
        Self::Operator(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is a condition error
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Condition(_))
    }

    /// Check if this is a column specification error
    pub fn is_columns(&self) -> bool {
        matches!(self, Self::Columns(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}
