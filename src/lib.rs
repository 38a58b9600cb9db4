//! SDMB Sampler - Statistical Density Minority Balancing
//!
//! Synthetic minority oversampling for binary-labelled tabular data held in a
//! polars [`DataFrame`](polars::prelude::DataFrame):
//! - [`config`] - Sampler configuration and the feature perturbation policy
//! - [`synthetic`] - Validation, class statistics, synthetic row generation
//!   and the [`SDMBSampler`](synthetic::SDMBSampler) entry point
//!
//! ```no_run
//! use polars::prelude::*;
//! use sdmb_sampler::prelude::*;
//!
//! # fn main() -> sdmb_sampler::Result<()> {
//! let df = df!(
//!     "x" => &[0.5, 1.5, 7.0, 8.0, 9.0],
//!     "target" => &[1i64, 1, 0, 0, 0]
//! )?;
//! let mut sampler = SDMBSampler::new("target").with_seed(42);
//! let balanced = sampler.fit_resample(&df)?;
//! assert_eq!(balanced.height(), 6);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod synthetic;

pub use error::{Result, SdmbError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{FeaturesToChange, SamplerConfig, TargetColumn};
    pub use crate::error::{Result, SdmbError};
    pub use crate::synthetic::{ClassStats, FeatureStats, ResampleReport, SDMBSampler};
}
