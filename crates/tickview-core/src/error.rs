use thiserror::Error;
use time::Date;

use crate::domain::Symbol;

/// Validation and contract errors for user-supplied input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter, digit or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}

/// Failure of the backing store while serving a series query.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver or query execution error.
    #[error("price query failed: {0}")]
    Query(#[from] ::duckdb::Error),

    /// Warehouse could not hand out a connection.
    #[error(transparent)]
    Warehouse(#[from] tickview_warehouse::WarehouseError),

    /// A row came back in a shape the price schema does not allow.
    #[error("invalid row for {ticker}: {reason}")]
    InvalidRow { ticker: String, reason: String },
}

/// Raised by the table shaper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown column '{0}', expected one of date, open, high, low, close, adj_close, volume")]
    UnknownColumn(String),
}

/// Raised by a ticker-description collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("description lookup failed: {0}")]
pub struct DescriptionError(pub String);

/// The four outcomes a view render can fail with.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The store failed; only the current render is affected.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The query succeeded but returned no rows.
    #[error("no data found for {0}")]
    NoData(Symbol),

    /// `start` is after `end`; nothing was queried.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: Date, end: Date },

    /// The requested column is not part of the price schema.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

impl From<TableError> for ViewError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::UnknownColumn(name) => Self::UnknownColumn(name),
        }
    }
}
