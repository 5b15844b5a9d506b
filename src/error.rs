//! Error types shared by the table and page subsystems.

use thiserror::Error;

/// Errors raised while resolving, normalizing or rendering a table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// No table is registered under this id.
    #[error("table '{0}' is not registered")]
    UnknownTable(String),

    /// A table id that cannot serve as a DOM id and CSS selector.
    #[error("invalid table id '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidTableId(String),

    /// An explicit column projection names a column the source lacks.
    #[error("column '{column}' not found in table source")]
    ColumnNotFound { column: String },

    /// A record carries a key the first record did not declare.
    #[error("record {row} has unexpected column '{column}'")]
    SchemaMismatch { row: usize, column: String },

    /// A row's length differs from the column count.
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The same column name appears twice.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Input could not be read as a list of records.
    #[error("invalid records: {0}")]
    InvalidRecords(String),
}

/// Errors raised while assembling or invoking page routes.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Table(#[from] TableError),

    /// Two routes claim the same path and method.
    #[error("route {method} {path} is already registered")]
    DuplicateRoute { path: String, method: String },

    /// A path the router cannot mount.
    #[error("invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// A method name that cannot be routed.
    #[error("unsupported HTTP method '{0}'")]
    InvalidMethod(String),

    /// Failure reported by application handler code.
    #[error("handler failed: {0}")]
    Handler(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PageError {
    /// Wrap an arbitrary handler error.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PageError::Handler(err.into())
    }
}
