//! Synthetic row generation

use crate::config::FeaturesToChange;
use crate::error::{Result, SdmbError};
use crate::synthetic::ClassStats;
use ndarray::{Array1, ArrayView2};
use rand::seq::index;
use rand::Rng;

/// A cloned minority row with some features redrawn
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticRow {
    /// Row of the minority matrix that was cloned
    pub source: usize,
    /// Feature values after perturbation
    pub values: Array1<f64>,
    /// Positions of the redrawn features, ascending
    pub perturbed: Vec<usize>,
}

impl SyntheticRow {
    pub fn is_perturbed(&self, feature: usize) -> bool {
        self.perturbed.binary_search(&feature).is_ok()
    }
}

/// Generate `count` synthetic rows from the minority feature matrix.
///
/// Each row clones a uniformly chosen minority row (with replacement) and
/// replaces a fresh random subset of features with uniform draws from the
/// minority `[min, max]` of that feature.
pub fn generate<R: Rng>(
    minority: ArrayView2<f64>,
    stats: &ClassStats,
    count: usize,
    policy: FeaturesToChange,
    rng: &mut R,
) -> Result<Vec<SyntheticRow>> {
    let (n_rows, n_features) = minority.dim();

    if n_rows == 0 {
        return Err(SdmbError::EmptyClassError { label: stats.label });
    }
    if stats.len() != n_features {
        return Err(SdmbError::ShapeError {
            expected: format!("{} feature statistics", n_features),
            actual: stats.len().to_string(),
        });
    }
    if n_features == 0 {
        return Err(SdmbError::InvalidInput("no features to perturb".to_string()));
    }

    let n_change = policy.resolve(n_features);
    let mut rows = Vec::with_capacity(count);

    for _ in 0..count {
        let source = rng.gen_range(0..n_rows);
        let mut values = minority.row(source).to_owned();

        let mut perturbed = index::sample(rng, n_features, n_change).into_vec();
        perturbed.sort_unstable();

        for &j in &perturbed {
            let (lo, hi) = stats.features[j].range().ok_or_else(|| {
                SdmbError::ComputationError(format!(
                    "feature '{}' has no finite range in class {}",
                    stats.feature_names.get(j).map(String::as_str).unwrap_or("?"),
                    stats.label
                ))
            })?;
            values[j] = uniform_in(rng, lo, hi);
        }

        rows.push(SyntheticRow {
            source,
            values,
            perturbed,
        });
    }

    Ok(rows)
}

/// Uniform draw in `[lo, hi]`, clamped back into the bounds.
///
/// Spans wider than `f64::MAX` are sampled as a convex combination of the
/// bounds.
fn uniform_in<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let value = if (hi - lo).is_finite() {
        rng.gen_range(lo..=hi)
    } else {
        let u: f64 = rng.gen();
        lo * (1.0 - u) + hi * u
    };
    value.clamp(lo, hi)
}
