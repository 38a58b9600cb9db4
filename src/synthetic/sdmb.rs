//! SDMB sampler: Statistical Density Minority Balancing

use crate::config::{FeaturesToChange, SamplerConfig, TargetColumn};
use crate::error::{Result, SdmbError};
use crate::synthetic::{
    class_subset, combine, compute_stats, feature_matrix, generate, normalize_features,
    synthetic_frame, validate, ResampleReport,
};
use polars::prelude::DataFrame;
use rand::prelude::*;
use tracing::{debug, info, warn};

/// Oversamples the minority class of a binary-labelled frame until it
/// matches the majority class.
///
/// Synthetic rows are clones of random minority rows with a random subset of
/// features redrawn uniformly from the minority class's observed range.
#[derive(Debug, Clone)]
pub struct SDMBSampler {
    config: SamplerConfig,
    last_report: Option<ResampleReport>,
}

impl SDMBSampler {
    /// Create a sampler with `Auto` feature policy and no seed
    pub fn new(target_column: impl Into<TargetColumn>) -> Self {
        Self {
            config: SamplerConfig::new(target_column),
            last_report: None,
        }
    }

    /// Create a sampler from a validated configuration
    pub fn from_config(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_report: None,
        })
    }

    /// Set how many features are perturbed per synthetic row
    pub fn with_features_to_change(mut self, policy: FeaturesToChange) -> Self {
        self.config = self.config.with_features_to_change(policy);
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    /// Set minority and majority labels (default 1 and 0)
    pub fn with_labels(mut self, minority: i64, majority: i64) -> Self {
        self.config = self.config.with_labels(minority, majority);
        self
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Statistics and counts of the last successful call
    pub fn last_report(&self) -> Option<&ResampleReport> {
        self.last_report.as_ref()
    }

    fn rng(&self) -> StdRng {
        match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Balance the classes of `df`.
    ///
    /// Returns a new, row-shuffled frame where the minority class has as many
    /// rows as the majority class. When the minority is not smaller than the
    /// majority the input is returned unchanged.
    pub fn fit_resample(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.config.validate()?;
        let validated = validate(df, &self.config.target_column)?;
        let target = validated.target.as_str();
        let features = &validated.features;
        let minority_label = self.config.minority_label;
        let majority_label = self.config.majority_label;

        let frame = normalize_features(df, features)?;
        let minority = class_subset(&frame, target, minority_label)?;
        let majority = class_subset(&frame, target, majority_label)?;

        if minority.height() == 0 {
            return Err(SdmbError::EmptyClassError {
                label: minority_label,
            });
        }
        if majority.height() == 0 {
            return Err(SdmbError::EmptyClassError {
                label: majority_label,
            });
        }

        info!(
            target = %target,
            n_minority = minority.height(),
            n_majority = majority.height(),
            n_features = features.len(),
            "Resampling dataset"
        );

        let minority_stats = compute_stats(&frame, target, minority_label)?;
        let majority_stats = compute_stats(&frame, target, majority_label)?;
        let n_features_changed = self.config.features_to_change.resolve(features.len());
        debug!(
            policy = ?self.config.features_to_change,
            n_features_changed,
            "Resolved feature policy"
        );

        let n_synthetic = majority.height().saturating_sub(minority.height());
        let report = ResampleReport {
            minority_stats,
            majority_stats,
            n_minority: minority.height(),
            n_majority: majority.height(),
            n_synthetic,
            n_features_changed,
        };

        if n_synthetic == 0 {
            warn!(
                n_minority = report.n_minority,
                n_majority = report.n_majority,
                "Minority class is not smaller than majority, returning input unchanged"
            );
            self.last_report = Some(report);
            return Ok(df.clone());
        }

        let mut rng = self.rng();
        let minority_x = feature_matrix(&minority, features)?;
        let rows = generate(
            minority_x.view(),
            &report.minority_stats,
            n_synthetic,
            self.config.features_to_change,
            &mut rng,
        )?;
        let synthetic = synthetic_frame(&minority, features, &rows)?;
        let balanced = combine(&majority, &minority, &synthetic, &mut rng)?;

        info!(
            n_synthetic,
            n_rows = balanced.height(),
            "Generated synthetic minority rows"
        );

        self.last_report = Some(report);
        Ok(balanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::class_counts;
    use polars::prelude::*;

    fn create_imbalanced_data() -> DataFrame {
        // 12 majority rows, 4 minority rows
        let mut f1 = Vec::new();
        let mut f2 = Vec::new();
        let mut labels = Vec::new();
        for i in 0..12 {
            f1.push(i as f64);
            f2.push((i % 3) as i64);
            labels.push(0i64);
        }
        for i in 0..4 {
            f1.push(20.0 + i as f64);
            f2.push(10 + i as i64);
            labels.push(1i64);
        }
        df!(
            "f1" => &f1,
            "f2" => &f2,
            "label" => &labels
        )
        .unwrap()
    }

    #[test]
    fn test_sampler_basic() {
        let df = create_imbalanced_data();
        let mut sampler = SDMBSampler::new("label").with_seed(42);

        let result = sampler.fit_resample(&df).unwrap();
        assert_eq!(result.height(), 24);

        let counts = class_counts(&result, "label").unwrap();
        assert_eq!(counts.get(&0), Some(&12));
        assert_eq!(counts.get(&1), Some(&12));

        let report = sampler.last_report().unwrap();
        assert!(report.resampled());
        assert_eq!(report.n_synthetic, 8);
        assert_eq!(report.n_features_changed, 1);
        assert_eq!(report.minority_stats.label, 1);
        assert_eq!(report.majority_stats.n_samples, 12);
    }

    #[test]
    fn test_input_not_mutated() {
        let df = create_imbalanced_data();
        let before = df.clone();
        let mut sampler = SDMBSampler::new("label").with_seed(1);
        sampler.fit_resample(&df).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_balanced_input_passthrough() {
        let df = df!(
            "x" => &[1i64, 2, 3, 4],
            "label" => &[0i64, 1, 1, 0]
        )
        .unwrap();
        let mut sampler = SDMBSampler::new("label").with_seed(42);

        let result = sampler.fit_resample(&df).unwrap();
        assert!(result.equals_missing(&df));
        assert_eq!(result.column("x").unwrap().dtype(), &DataType::Int64);
        assert!(!sampler.last_report().unwrap().resampled());
    }

    #[test]
    fn test_swapped_labels() {
        let df = create_imbalanced_data();
        // label 0 is now treated as minority, which already outnumbers label 1
        let mut sampler = SDMBSampler::new("label").with_labels(0, 1);
        let result = sampler.fit_resample(&df).unwrap();
        assert!(result.equals_missing(&df));
    }

    #[test]
    fn test_empty_minority_class() {
        let df = df!(
            "x" => &[1.0, 2.0, 3.0],
            "label" => &[0i64, 2, 2]
        )
        .unwrap();
        let mut sampler = SDMBSampler::new("label");
        let err = sampler.fit_resample(&df).unwrap_err();
        assert!(matches!(err, SdmbError::EmptyClassError { label: 1 }));
        assert!(sampler.last_report().is_none());
    }

    #[test]
    fn test_empty_majority_class() {
        let df = df!(
            "x" => &[1.0, 2.0, 3.0],
            "label" => &[1i64, 2, 2]
        )
        .unwrap();
        let mut sampler = SDMBSampler::new("label");
        let err = sampler.fit_resample(&df).unwrap_err();
        assert!(matches!(err, SdmbError::EmptyClassError { label: 0 }));
        assert!(sampler.last_report().is_none());
    }

    #[test]
    fn test_report_roundtrip_with_undefined_stats() {
        let df = df!(
            "x" => &[1.0, 2.0, 3.0, 0.5],
            "label" => &[0i64, 0, 0, 1]
        )
        .unwrap();
        let mut sampler = SDMBSampler::new("label").with_seed(1);
        sampler.fit_resample(&df).unwrap();

        let report = sampler.last_report().unwrap();
        assert!(report.minority_stats.features[0].std.is_nan());

        let json = serde_json::to_string(report).unwrap();
        let back: ResampleReport = serde_json::from_str(&json).unwrap();
        assert!(back.minority_stats.features[0].std.is_nan());
        assert_eq!(back.minority_stats.features[0].min, 0.5);
        assert_eq!(back.n_synthetic, 2);
        assert_eq!(back.majority_stats.n_samples, 3);
    }

    #[test]
    fn test_builders_match_config() {
        let sampler = SDMBSampler::new("label")
            .with_features_to_change(FeaturesToChange::FixedCount(3))
            .with_seed(9)
            .with_labels(2, 5);
        let expected = SamplerConfig::new("label")
            .with_features_to_change(FeaturesToChange::FixedCount(3))
            .with_seed(9)
            .with_labels(2, 5);
        assert_eq!(sampler.config(), &expected);
    }

    #[test]
    fn test_invalid_policy_rejected_at_call() {
        let df = create_imbalanced_data();
        let mut sampler = SDMBSampler::new("label")
            .with_features_to_change(FeaturesToChange::Fraction(1.5));
        let err = sampler.fit_resample(&df).unwrap_err();
        assert!(matches!(err, SdmbError::InvalidParameter { .. }));
    }

    #[test]
    fn test_from_config() {
        let config = SamplerConfig::new(2usize)
            .with_features_to_change(FeaturesToChange::FixedCount(2))
            .with_seed(5);
        let mut sampler = SDMBSampler::from_config(config).unwrap();
        let result = sampler.fit_resample(&create_imbalanced_data()).unwrap();
        assert_eq!(result.height(), 24);
        assert_eq!(sampler.last_report().unwrap().n_features_changed, 2);

        let bad = SamplerConfig::new("label").with_labels(3, 3);
        assert!(SDMBSampler::from_config(bad).is_err());
    }
}
