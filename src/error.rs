//! Error types for the SDMB sampler

use thiserror::Error;

/// Result type alias for sampler operations
pub type Result<T> = std::result::Result<T, SdmbError>;

/// Main error type for the sampler
#[derive(Error, Debug)]
pub enum SdmbError {
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Binary classification required: target column '{column}' has {found} distinct values")]
    LabelCardinalityError { column: String, found: usize },

    #[error("Class {label} has no rows, statistics are undefined")]
    EmptyClassError { label: i64 },

    #[error("Feature column '{column}' has non-numeric dtype {dtype}")]
    NonNumericFeature { column: String, dtype: String },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for SdmbError {
    fn from(err: polars::error::PolarsError) -> Self {
        SdmbError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for SdmbError {
    fn from(err: serde_json::Error) -> Self {
        SdmbError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for SdmbError {
    fn from(err: ndarray::ShapeError) -> Self {
        SdmbError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
