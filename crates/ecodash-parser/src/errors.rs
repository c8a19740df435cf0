use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("dataset file did not contain a header row")]
    MissingHeader,

    #[error("required column '{column}' missing from header")]
    MissingColumn { column: &'static str },

    #[error("column '{column}' appears more than once in header")]
    DuplicateColumn { column: String },

    #[error("data row {line_index} invalid: column '{column}': {message}")]
    DataRow {
        line_index: usize,
        column: &'static str,
        message: String,
    },

    #[error("failed to build dataset frame: {source}")]
    Frame {
        #[source]
        source: PolarsError,
    },
}

impl From<PolarsError> for ParserError {
    fn from(source: PolarsError) -> Self {
        ParserError::Frame { source }
    }
}
