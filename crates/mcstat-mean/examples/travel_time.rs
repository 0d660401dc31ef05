//! Estimate the expected travel time of a four-leg trip
//!
//! Each leg takes a uniform time on top of a fixed 16 minutes:
//! `T = 16 + 3U1 + 5U2 + 12U3 + 6U4`, so `E[T] = 29`.
//!
//! Run with `RUST_LOG=debug` to see the pilot and sizing decisions.

use anyhow::Result;
use mcstat_core::RngSampler;
use mcstat_mean::{failure_rate, CltMeanEstimator};
use rand::Rng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let trip = |rng: &mut rand_chacha::ChaCha8Rng| {
        16.0 + 3.0 * rng.gen::<f64>()
            + 5.0 * rng.gen::<f64>()
            + 12.0 * rng.gen::<f64>()
            + 6.0 * rng.gen::<f64>()
    };

    println!("=== Expected travel time ===");
    for abs_tol in [0.1, 0.05, 0.01] {
        let estimator = CltMeanEstimator::new(abs_tol, 0.0, 0.01)?;
        let estimate = estimator.estimate(&mut RngSampler::seeded(29, trip))?;
        println!(
            "tol {:>5}: {:.4} min (sigma ~ {:.3}, {} samples)",
            abs_tol,
            estimate.mu_hat,
            estimate.sigma_hat,
            estimate.total_samples()
        );
    }

    println!("\n=== Realised failure rate over 200 runs ===");
    let estimator = CltMeanEstimator::new(0.2, 0.0, 0.01)?;
    let summary = failure_rate(&estimator, 29.0, 200, |rep| {
        RngSampler::seeded(1_000 + rep as u64, trip)
    })?;
    println!(
        "{} failures ({:.1}%), worst error {:.4}, {:.0} samples per run",
        summary.failures,
        summary.rate() * 100.0,
        summary.max_abs_error,
        summary.mean_samples
    );

    Ok(())
}
