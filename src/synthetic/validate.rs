//! Input validation

use crate::config::TargetColumn;
use crate::error::{Result, SdmbError};
use polars::prelude::*;

/// Target and feature columns of a frame that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFrame {
    /// Name of the binary label column
    pub target: String,
    /// Every other column, in frame order
    pub features: Vec<String>,
}

impl ValidatedFrame {
    pub fn n_features(&self) -> usize {
        self.features.len()
    }
}

/// Check that `target_column` exists and holds exactly two distinct values,
/// and that every remaining column is numeric.
pub fn validate(df: &DataFrame, target_column: &TargetColumn) -> Result<ValidatedFrame> {
    let target = resolve_target(df, target_column)?;

    let found = df.column(&target)?.as_materialized_series().n_unique()?;
    if found != 2 {
        return Err(SdmbError::LabelCardinalityError {
            column: target,
            found,
        });
    }

    let features: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != target)
        .map(|name| name.to_string())
        .collect();

    if features.is_empty() {
        return Err(SdmbError::InvalidInput(format!(
            "no feature columns besides target '{}'",
            target
        )));
    }

    for name in &features {
        let dtype = df.column(name)?.dtype();
        if !is_numeric_dtype(dtype) {
            return Err(SdmbError::NonNumericFeature {
                column: name.clone(),
                dtype: dtype.to_string(),
            });
        }
    }

    Ok(ValidatedFrame { target, features })
}

fn resolve_target(df: &DataFrame, target_column: &TargetColumn) -> Result<String> {
    match target_column {
        TargetColumn::Name(name) => df
            .get_column_index(name)
            .map(|_| name.clone())
            .ok_or_else(|| {
                SdmbError::SchemaError(format!("Target column {} not found", target_column))
            }),
        TargetColumn::Index(index) => df
            .get_column_names()
            .get(*index)
            .map(|name| name.to_string())
            .ok_or_else(|| {
                SdmbError::SchemaError(format!(
                    "Target column {} out of range for {} columns",
                    target_column,
                    df.width()
                ))
            }),
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
