//! Empirical coverage of binomial intervals by simulation

use crate::binomial::{BinomialCI, BinomialInterval};
use mcstat_core::{Error, Result};
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Fraction of simulated experiments whose interval contained the true `p`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinomialCoverage {
    pub reps: usize,
    pub exact_hits: usize,
    pub clt_hits: usize,
}

impl BinomialCoverage {
    pub fn exact_rate(&self) -> f64 {
        self.exact_hits as f64 / self.reps as f64
    }

    pub fn clt_rate(&self) -> f64 {
        self.clt_hits as f64 / self.reps as f64
    }
}

/// Simulate `reps` experiments of `n_total` trials with success probability `p`
///
/// Intervals are computed once per distinct success count.
#[instrument(skip(ci, rng))]
pub fn binomial_coverage<R>(
    ci: &BinomialCI,
    p: f64,
    n_total: u64,
    reps: usize,
    rng: &mut R,
) -> Result<BinomialCoverage>
where
    R: Rng + ?Sized,
{
    if reps == 0 {
        return Err(Error::InvalidParameter(
            "Number of repetitions must be positive".to_string(),
        ));
    }
    let binomial = Binomial::new(n_total, p).map_err(|e| {
        Error::InvalidParameter(format!("Invalid binomial experiment: {e}"))
    })?;

    // Keyed by observed count, so memory is bounded by `reps` not `n_total`
    let mut intervals: HashMap<u64, BinomialInterval> = HashMap::new();
    let mut coverage = BinomialCoverage {
        reps,
        exact_hits: 0,
        clt_hits: 0,
    };

    for _ in 0..reps {
        let successes = binomial.sample(rng);
        let interval = match intervals.get(&successes) {
            Some(interval) => *interval,
            None => {
                let interval = ci.interval(n_total, successes)?;
                intervals.insert(successes, interval);
                interval
            }
        };
        if interval.exact.contains(p) {
            coverage.exact_hits += 1;
        }
        if interval.clt.contains(p) {
            coverage.clt_hits += 1;
        }
    }

    debug!(
        exact = coverage.exact_rate(),
        clt = coverage.clt_rate(),
        "binomial coverage simulation complete"
    );
    Ok(coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_interval_reaches_nominal_coverage() {
        let ci = BinomialCI::new(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let coverage = binomial_coverage(&ci, 0.3, 50, 2000, &mut rng).unwrap();

        assert_eq!(coverage.reps, 2000);
        // Clopper-Pearson is conservative; allow for simulation noise
        assert!(coverage.exact_rate() >= 0.935, "exact coverage {}", coverage.exact_rate());
    }

    #[test]
    fn test_clt_interval_undercovers_at_extreme_p() {
        let ci = BinomialCI::new(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let coverage = binomial_coverage(&ci, 0.02, 30, 2000, &mut rng).unwrap();

        // With n p = 0.6 the Wald interval collapses to a point whenever no
        // success is observed, which happens about 55% of the time
        assert!(coverage.clt_rate() < 0.9, "clt coverage {}", coverage.clt_rate());
        assert!(coverage.exact_rate() > coverage.clt_rate());
    }

    #[test]
    fn test_huge_trial_count_caches_only_observed_counts() {
        let ci = BinomialCI::new(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        // Around 100 successes per experiment out of 1e10 trials
        let coverage = binomial_coverage(&ci, 1e-8, 10_000_000_000, 50, &mut rng).unwrap();

        assert_eq!(coverage.reps, 50);
        assert!(coverage.exact_rate() >= 0.8, "exact coverage {}", coverage.exact_rate());
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let ci = BinomialCI::new(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(binomial_coverage(&ci, 0.5, 10, 0, &mut rng).is_err());
        assert!(binomial_coverage(&ci, 1.5, 10, 10, &mut rng).is_err());
    }
}
