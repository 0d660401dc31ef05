//! Adaptive Monte Carlo mean estimation
//!
//! This crate estimates the mean of a distribution that can only be
//! sampled, to a requested absolute/relative tolerance at confidence
//! level `1 - alpha`:
//!
//! - [`CltMeanEstimator`]: two-stage estimator sizing its main draw from a
//!   pilot standard deviation and the CLT sample-size formula
//! - [`failure_rate`]: repeated-run simulation measuring how often the
//!   heuristic bound is violated
//!
//! # Example
//!
//! ```rust
//! use mcstat_mean::estimate_mean;
//! use mcstat_core::RngSampler;
//! use rand::Rng;
//!
//! // Travel time: 16 + 3U1 + 5U2 + 12U3 + 6U4, true mean 29
//! let mut travel_time = RngSampler::seeded(2024, |rng| {
//!     16.0 + 3.0 * rng.gen::<f64>() + 5.0 * rng.gen::<f64>()
//!         + 12.0 * rng.gen::<f64>() + 6.0 * rng.gen::<f64>()
//! });
//!
//! let estimate = estimate_mean(&mut travel_time, 0.1, 0.0, 0.01).unwrap();
//! assert!((estimate.mu_hat - 29.0).abs() < 0.3);
//! ```

mod clt;
mod config;
mod failure_rate;

pub use clt::{estimate_mean, CltMeanEstimator, MeanEstimate};
pub use config::{CltMeanConfig, Tolerance};
pub use failure_rate::{failure_rate, FailureRate};
