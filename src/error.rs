// src/error.rs
use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the input file into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },

    #[error("key column `{column}` not found in {path}")]
    MissingKey { path: PathBuf, column: String },

    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    #[error("column `{column}` has type {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: String,
        found: String,
    },

    #[error("row {0} has no customer id")]
    NullKey(usize),

    #[error("customer id `{0}` appears on more than one distinct row")]
    DuplicateKey(String),
}

/// Failures raised while running the feature pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("column `{column}`: code {code:?} for customer `{customer_id}` has no label")]
    UnmappedCategory {
        column: String,
        customer_id: String,
        code: Option<i64>,
    },

    #[error("divisor `{divisor}` is zero or missing for customer `{customer_id}`")]
    DivisionUndefined {
        divisor: String,
        customer_id: String,
    },

    #[error("column `{column}`: label {value:?} for customer `{customer_id}` is not yes/no")]
    UnknownLabel {
        column: String,
        customer_id: String,
        value: Option<String>,
    },

    #[error("arrow: {0}")]
    Arrow(#[from] ArrowError),
}

/// Failures while persisting a finished table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("arrow: {0}")]
    Arrow(#[from] ArrowError),

    #[error("parquet: {0}")]
    Parquet(#[from] ParquetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
