use crate::types::schema::ColumnType;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Row with {found} cells does not fit table '{table}' with {expected} columns")]
    SchemaMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' of table '{table}' holds {expected:?} values, got {found}")]
    ColumnTypeMismatch {
        table: String,
        column: String,
        expected: ColumnType,
        found: &'static str,
    },

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Failed to create store directory '{0}'")]
    StoreDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error on table file '{0}'")]
    TableIo(PathBuf, #[source] std::io::Error),

    #[error("Polars operation failed for table {table}: {source}")]
    Polars {
        table: String,
        #[source]
        source: PolarsError,
    },
}
