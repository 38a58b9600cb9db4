//! Per-class descriptive statistics

use crate::error::Result;
use crate::synthetic::{class_subset, feature_matrix};
use ndarray::{ArrayView1, ArrayView2, Axis};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive statistics of one feature within one class.
///
/// Undefined statistics are NaN, serialized as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    #[serde(with = "nan_as_null")]
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    #[serde(with = "nan_as_null")]
    pub std: f64,
    #[serde(with = "nan_as_null")]
    pub min: f64,
    #[serde(with = "nan_as_null")]
    pub max: f64,
    /// Mean of the most frequent value(s)
    #[serde(with = "nan_as_null")]
    pub mode_mean: f64,
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl FeatureStats {
    /// Compute statistics over `values`, skipping NaN entries
    pub fn from_values(values: ArrayView1<f64>) -> Self {
        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = present.len();

        if n == 0 {
            return Self {
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                mode_mean: f64::NAN,
            };
        }

        let mean = present.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std,
            min,
            max,
            mode_mean: mode_mean(&present),
        }
    }

    /// Observed `[min, max]`, if both bounds are finite
    pub fn range(&self) -> Option<(f64, f64)> {
        (self.min.is_finite() && self.max.is_finite()).then_some((self.min, self.max))
    }
}

/// Average of all values tied at the highest frequency
fn mode_mean(values: &[f64]) -> f64 {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &value in values {
        // fold -0.0 into 0.0 so both count as one value
        let key = if value == 0.0 { 0.0f64 } else { value };
        *counts.entry(key.to_bits()).or_insert(0) += 1;
    }

    let Some(&top) = counts.values().max() else {
        return f64::NAN;
    };

    let mut modes: Vec<f64> = counts
        .iter()
        .filter(|(_, &count)| count == top)
        .map(|(&bits, _)| f64::from_bits(bits))
        .collect();
    modes.sort_by(f64::total_cmp);
    modes.iter().sum::<f64>() / modes.len() as f64
}

/// Statistics of every feature for one class label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Class label the rows were filtered on
    pub label: i64,
    /// Number of rows in the class
    pub n_samples: usize,
    /// Feature names, positionally aligned with `features`
    pub feature_names: Vec<String>,
    pub features: Vec<FeatureStats>,
}

impl ClassStats {
    /// Column-wise statistics of a class feature matrix
    pub fn from_matrix(label: i64, feature_names: Vec<String>, x: ArrayView2<f64>) -> Self {
        let features = x
            .axis_iter(Axis(1))
            .map(FeatureStats::from_values)
            .collect();

        Self {
            label,
            n_samples: x.nrows(),
            feature_names,
            features,
        }
    }

    /// True when the class had no rows
    pub fn is_empty(&self) -> bool {
        self.n_samples == 0
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Look up a feature's statistics by column name
    pub fn feature(&self, name: &str) -> Option<&FeatureStats> {
        self.feature_names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.features[i])
    }
}

/// Statistics of every non-target column over the rows labelled `label`
pub fn compute_stats(df: &DataFrame, target: &str, label: i64) -> Result<ClassStats> {
    let features: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != target)
        .map(|name| name.to_string())
        .collect();

    let subset = class_subset(df, target, label)?;
    let x = feature_matrix(&subset, &features)?;
    Ok(ClassStats::from_matrix(label, features, x.view()))
}
