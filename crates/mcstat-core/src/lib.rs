//! Core types for Monte Carlo estimation
//!
//! This crate provides the pieces shared by the estimator crates:
//!
//! - [`Error`] and [`Result`]: the unified error type
//! - [`math`]: sample moments, normal critical values, binomial CDF and
//!   quantile, and a [`Bisection`] root finder
//! - [`SamplingFunction`]: the callback through which estimators request
//!   observations, with seeded adapters
//!
//! # Example
//!
//! ```rust
//! use mcstat_core::{math, RngSampler, SamplingFunction};
//! use rand::Rng;
//!
//! let mut sampler = RngSampler::seeded(1, |rng| rng.gen::<f64>());
//! let draws = sampler.draw_checked(1_000).unwrap();
//! let mean = math::mean(&draws).unwrap();
//! assert!((mean - 0.5).abs() < 0.1);
//! ```

pub mod error;
pub mod math;
pub mod sampling;

// Re-export core types
pub use error::{check_alpha, check_quantile, Error, Result};
pub use math::Bisection;
pub use sampling::{RngSampler, SamplingFunction};

#[cfg(feature = "parallel")]
pub use sampling::ParallelSampler;
