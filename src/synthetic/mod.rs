//! Synthetic minority oversampling
//!
//! The SDMB pipeline runs in four steps:
//! - [`validate`] checks the target column and resolves the feature columns
//! - [`compute_stats`] collects per-feature statistics for one class
//! - [`generate`] clones minority rows and perturbs a random subset of features
//! - [`combine`] stacks majority, minority and synthetic rows and shuffles them
//!
//! [`SDMBSampler`] wires the steps together behind `fit_resample`.

mod combine;
mod generator;
mod sdmb;
mod stats;
mod validate;

pub use combine::{combine, synthetic_frame};
pub use generator::{generate, SyntheticRow};
pub use sdmb::SDMBSampler;
pub use stats::{compute_stats, ClassStats, FeatureStats};
pub use validate::{validate, ValidatedFrame};

use crate::error::Result;
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of the last successful resampling call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampleReport {
    /// Statistics of the minority class
    pub minority_stats: ClassStats,
    /// Statistics of the majority class
    pub majority_stats: ClassStats,
    /// Minority rows in the input
    pub n_minority: usize,
    /// Majority rows in the input
    pub n_majority: usize,
    /// Number of synthetic rows generated
    pub n_synthetic: usize,
    /// Features perturbed on each synthetic row
    pub n_features_changed: usize,
}

impl ResampleReport {
    /// Whether the call produced any synthetic rows
    pub fn resampled(&self) -> bool {
        self.n_synthetic > 0
    }
}

/// Row mask selecting `label` in the target column.
///
/// The target is compared numerically; values that cannot be read as numbers
/// never match.
pub fn label_mask(df: &DataFrame, target: &str, label: i64) -> Result<BooleanChunked> {
    let values = df
        .column(target)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(values.f64()?.equal(label as f64))
}

/// Rows of `df` belonging to `label`
pub fn class_subset(df: &DataFrame, target: &str, label: i64) -> Result<DataFrame> {
    let mask = label_mask(df, target, label)?;
    Ok(df.filter(&mask)?)
}

/// Get class distribution of the target column.
///
/// Only integral, non-null values are counted.
pub fn class_counts(df: &DataFrame, target: &str) -> Result<HashMap<i64, usize>> {
    let values = df
        .column(target)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let mut counts = HashMap::new();
    for value in values.f64()?.into_iter().flatten() {
        if value.fract() == 0.0 {
            *counts.entry(value as i64).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Dense `f64` matrix of the given columns, nulls read as NaN
pub fn feature_matrix(df: &DataFrame, features: &[String]) -> Result<Array2<f64>> {
    let mut x = Array2::from_elem((df.height(), features.len()), f64::NAN);
    for (j, name) in features.iter().enumerate() {
        let series = df
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        for (i, value) in series.f64()?.into_iter().enumerate() {
            if let Some(value) = value {
                x[[i, j]] = value;
            }
        }
    }
    Ok(x)
}

/// Copy of `df` with every feature column cast to `Float64`.
///
/// Applies to majority and original minority rows alike, so the stacked
/// frame has one schema. Integer values are exact up to 2^53 in magnitude;
/// larger ones are rounded to the nearest representable `f64`.
pub fn normalize_features(df: &DataFrame, features: &[String]) -> Result<DataFrame> {
    let mut result = df.clone();
    for name in features {
        let casted = df
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        result.with_column(casted)?;
    }
    Ok(result)
}
