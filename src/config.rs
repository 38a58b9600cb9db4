//! Sampler configuration

use crate::error::{Result, SdmbError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Column holding the binary label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetColumn {
    /// Column addressed by name
    Name(String),
    /// Column addressed by position
    Index(usize),
}

impl From<&str> for TargetColumn {
    fn from(name: &str) -> Self {
        TargetColumn::Name(name.to_string())
    }
}

impl From<String> for TargetColumn {
    fn from(name: String) -> Self {
        TargetColumn::Name(name)
    }
}

impl From<usize> for TargetColumn {
    fn from(index: usize) -> Self {
        TargetColumn::Index(index)
    }
}

impl fmt::Display for TargetColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetColumn::Name(name) => write!(f, "'{}'", name),
            TargetColumn::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// How many features are perturbed on each synthetic row
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturesToChange {
    /// One fifth of the features, at least one
    #[default]
    Auto,
    /// Fraction of the features in (0, 1]
    Fraction(f64),
    /// Fixed number of features, capped at the feature count
    FixedCount(usize),
}

impl FeaturesToChange {
    /// Resolve the policy to a concrete count in `[1, n_features]`
    pub fn resolve(&self, n_features: usize) -> usize {
        let count = match *self {
            FeaturesToChange::Auto => (n_features / 5).max(1),
            FeaturesToChange::Fraction(fraction) => {
                ((n_features as f64 * fraction).round() as usize).max(1)
            }
            FeaturesToChange::FixedCount(count) => count.min(n_features),
        };
        count.clamp(1, n_features.max(1))
    }

    fn validate(&self) -> Result<()> {
        if let FeaturesToChange::Fraction(fraction) = *self {
            if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
                return Err(SdmbError::InvalidParameter {
                    name: "features_to_change".to_string(),
                    value: fraction.to_string(),
                    reason: "fraction must lie in (0, 1]".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Configuration for the SDMB sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Binary label column
    pub target_column: TargetColumn,

    /// Perturbation width policy
    pub features_to_change: FeaturesToChange,

    /// Random seed
    pub random_state: Option<u64>,

    /// Label of the class that gets oversampled
    pub minority_label: i64,

    /// Label of the reference class
    pub majority_label: i64,
}

impl SamplerConfig {
    /// Create a configuration for the given target column
    pub fn new(target_column: impl Into<TargetColumn>) -> Self {
        Self {
            target_column: target_column.into(),
            features_to_change: FeaturesToChange::Auto,
            random_state: None,
            minority_label: 1,
            majority_label: 0,
        }
    }

    /// Builder method to set the perturbation policy
    pub fn with_features_to_change(mut self, policy: FeaturesToChange) -> Self {
        self.features_to_change = policy;
        self
    }

    /// Builder method to set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Builder method to set the class labels
    pub fn with_labels(mut self, minority: i64, majority: i64) -> Self {
        self.minority_label = minority;
        self.majority_label = majority;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        self.features_to_change.validate()?;
        if self.minority_label == self.majority_label {
            return Err(SdmbError::InvalidParameter {
                name: "minority_label".to_string(),
                value: self.minority_label.to_string(),
                reason: "must differ from majority_label".to_string(),
            });
        }
        Ok(())
    }

    /// Save the configuration as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
