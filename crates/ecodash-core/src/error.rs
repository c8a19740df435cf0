// crates/ecodash-core/src/error.rs

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("column '{column}' has type {dtype}, which {operation} does not support")]
    UnsupportedColumnType {
        column: String,
        dtype: String,
        operation: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
