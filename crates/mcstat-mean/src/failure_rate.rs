//! Repeated-run simulation of the estimator's realised failure rate
//!
//! Running the estimator many times against a sampler with a known mean
//! shows how often the error exceeds the tolerance. For light-tailed
//! integrands the rate stays near or below `alpha`; for heavy-tailed ones
//! it does not.

use crate::clt::CltMeanEstimator;
use mcstat_core::{Error, Result, SamplingFunction};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Summary of repeated estimator runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureRate {
    /// Number of estimator runs
    pub reps: usize,
    /// Runs whose error exceeded the working tolerance
    pub failures: usize,
    /// Largest absolute error seen
    pub max_abs_error: f64,
    /// Average total samples per run
    pub mean_samples: f64,
}

impl FailureRate {
    /// Fraction of failed runs
    pub fn rate(&self) -> f64 {
        self.failures as f64 / self.reps as f64
    }
}

/// Run `estimator` `reps` times and count runs with `|mu_hat - true_mean| > tol`
///
/// `make_sampler` receives the repetition index, which lets callers seed
/// each run independently.
#[instrument(skip(estimator, make_sampler))]
pub fn failure_rate<S, G>(
    estimator: &CltMeanEstimator,
    true_mean: f64,
    reps: usize,
    mut make_sampler: G,
) -> Result<FailureRate>
where
    S: SamplingFunction,
    G: FnMut(usize) -> S,
{
    if reps == 0 {
        return Err(Error::InvalidParameter(
            "Number of repetitions must be positive".to_string(),
        ));
    }

    let tol = estimator.tolerance().working();
    let mut failures = 0;
    let mut max_abs_error = 0.0f64;
    let mut total_samples = 0usize;

    for rep in 0..reps {
        let mut sampler = make_sampler(rep);
        let estimate = estimator.estimate(&mut sampler)?;
        let error = (estimate.mu_hat - true_mean).abs();
        if error > tol {
            failures += 1;
        }
        max_abs_error = max_abs_error.max(error);
        total_samples += estimate.total_samples();
    }

    let summary = FailureRate {
        reps,
        failures,
        max_abs_error,
        mean_samples: total_samples as f64 / reps as f64,
    };
    debug!(failures, rate = summary.rate(), "failure rate simulation complete");
    Ok(summary)
}
