//! Confidence intervals for Monte Carlo output
//!
//! This crate provides two interval constructions used alongside Monte
//! Carlo sampling:
//!
//! - **Binomial proportion intervals**: exact (Clopper-Pearson, via
//!   bisection on the binomial CDF) and CLT (Wald) intervals for a success
//!   probability
//! - **Quantile intervals**: distribution-free intervals for a quantile
//!   from padded order statistics
//!
//! plus [`binomial_coverage`] to check interval coverage by simulation.
//!
//! # Examples
//!
//! ## Binomial proportion
//!
//! ```rust
//! use mcstat_confidence::binomial_interval;
//!
//! let result = binomial_interval(10, 0, 0.05).unwrap();
//! assert_eq!(result.exact.lower, 0.0);
//! println!("exact: {}, clt: {}", result.exact, result.clt);
//! ```
//!
//! ## Quantile
//!
//! ```rust
//! use mcstat_confidence::quantile_interval;
//!
//! let sample: Vec<f64> = (0..1000).map(|i| i as f64 / 1000.0).collect();
//! let ci = quantile_interval(0.9, &sample, (0.0, 1.0), 0.05).unwrap();
//! assert!(ci.contains(0.9));
//! ```

mod binomial;
mod coverage;
mod order_statistic;
mod types;

// Re-exports
pub use binomial::{binomial_interval, BinomialCI, BinomialInterval};
pub use coverage::{binomial_coverage, BinomialCoverage};
pub use order_statistic::{quantile_interval, QuantileCI, QuantileInterval};
pub use types::{ConfidenceInterval, ConfidenceLevel};
