use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BraidError {
    #[error("no common columns to join on")]
    EmptyKeySet,
    #[error("key column {column:?} is not present in the {table} table")]
    SchemaMismatch { column: String, table: String },
    #[error("expected {expected} columns, but record {record} has {actual}")]
    MalformedRow {
        expected: usize,
        actual: usize,
        record: usize,
    },
    #[error("duplicate column {0:?}")]
    DuplicateColumn(String),
    #[error("no column named {0:?}")]
    UnknownColumn(String),
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
