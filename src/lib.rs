//! Monte Carlo estimation toolkit
//!
//! Re-exports the workspace crates behind a single import path:
//!
//! - [`mcstat_core`]: error type, numeric helpers and sampling abstractions
//! - [`mcstat_mean`]: adaptive CLT mean estimation
//! - [`mcstat_confidence`]: binomial proportion and quantile intervals
//!
//! # Example
//!
//! ```rust
//! use mcstat::prelude::*;
//! use rand::Rng;
//!
//! let mut sampler = RngSampler::seeded(11, |rng| rng.gen::<f64>());
//! let estimate = estimate_mean(&mut sampler, 0.05, 0.0, 0.05).unwrap();
//! assert!((estimate.mu_hat - 0.5).abs() < 0.1);
//!
//! let poll = binomial_interval(1_000, 520, 0.05).unwrap();
//! assert!(poll.exact.contains(0.52));
//! ```

pub use mcstat_confidence;
pub use mcstat_core;
pub use mcstat_mean;

pub use mcstat_core::{Error, Result};

/// Commonly used types and functions
pub mod prelude {
    pub use mcstat_confidence::{
        binomial_coverage, binomial_interval, quantile_interval, BinomialCI, BinomialInterval,
        ConfidenceInterval, QuantileCI, QuantileInterval,
    };
    pub use mcstat_core::{Error, Result, RngSampler, SamplingFunction};
    pub use mcstat_mean::{
        estimate_mean, failure_rate, CltMeanConfig, CltMeanEstimator, MeanEstimate, Tolerance,
    };

    #[cfg(feature = "parallel")]
    pub use mcstat_core::ParallelSampler;
}
