//! Error types for ms-output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row arrived after the run's output was closed.
    #[error("{table} row for year {year} written after finish")]
    Finished { table: &'static str, year: i32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Reject a write once `finished` is set.
pub(crate) fn ensure_open(finished: bool, table: &'static str, year: i32) -> OutputResult<()> {
    if finished { Err(OutputError::Finished { table, year }) } else { Ok(()) }
}
