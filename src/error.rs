//! Errors raised while compiling a sheet header and exporting its rows.

use thiserror::Error;

/// Fatal problems in the header rows. Nothing is exported when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("first column must be named `id` (found `{found}`)")]
    MissingIdColumn { found: String },
    #[error("column {column}: empty type descriptor")]
    EmptyDescriptor { column: usize },
    #[error("column {column}: invalid type descriptor `{descriptor}`: {reason}")]
    InvalidDescriptor {
        column: usize,
        descriptor: String,
        reason: String,
    },
    #[error("header has no type row")]
    NoColumns,
}

/// Problems with an individual data row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row `{id}`: no cell for column {column}")]
    MissingCell { id: String, column: usize },
}

/// Anything that can stop an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Row: {0}")]
    Row(#[from] RowError),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
}
