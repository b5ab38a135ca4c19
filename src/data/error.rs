//! Error types for the data layer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for data layer operations.
pub type Result<T, E = DataError> = std::result::Result<T, E>;

/// Structural failures while loading the reference tables.
///
/// Both variants are fatal: the dashboard cannot start without every table.
/// Bad cell values never surface here, they are coerced to `None` instead.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read table {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },
}

impl DataError {
    pub fn csv(table: impl Into<String>, source: csv::Error) -> Self {
        DataError::Csv {
            table: table.into(),
            source,
        }
    }
}
