//! Confidence intervals for a binomial success probability
//!
//! Two intervals are produced from the same counts:
//!
//! - **Exact** (Clopper-Pearson): the bounds solve
//!   `P(X >= k; n, p) = alpha/2` and `P(X <= k; n, p) = alpha/2`.
//!   Both tails are monotone in `p`, so each equation has a single
//!   root, found by bisection on a bracket with the observed proportion as
//!   one end.
//! - **CLT** (Wald): `p̂ ± z * sqrt(p̂(1 - p̂)/n)`. Fast, but unreliable
//!   when `n p̂ (1 - p̂)` is small.

use crate::types::{ConfidenceInterval, ConfidenceLevel};
use mcstat_core::{math, Bisection, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Exact and approximate intervals for one set of counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinomialInterval {
    /// Clopper-Pearson interval
    pub exact: ConfidenceInterval,
    /// Wald (normal approximation) interval
    pub clt: ConfidenceInterval,
    pub n_total: u64,
    pub n_success: u64,
}

impl BinomialInterval {
    /// Observed success proportion
    pub fn observed(&self) -> f64 {
        self.exact.estimate
    }
}

/// Binomial proportion interval estimator
///
/// # Example
///
/// ```rust
/// use mcstat_confidence::BinomialCI;
///
/// let ci = BinomialCI::new(0.01).unwrap();
/// let result = ci.interval(10_000, 5_000).unwrap();
/// assert!(result.exact.contains(0.5));
/// assert!(result.exact.width() < 0.03);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialCI {
    level: ConfidenceLevel,
    clip_clt: bool,
    solver: Bisection,
}

impl BinomialCI {
    /// Create an estimator for total error probability `alpha`
    ///
    /// The CLT interval is clipped to `[0, 1]` unless [`unclipped`](Self::unclipped)
    /// is requested.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            level: ConfidenceLevel::from_alpha(alpha)?,
            clip_clt: true,
            solver: Bisection::default(),
        })
    }

    /// Report raw Wald endpoints, which may fall outside `[0, 1]`
    pub fn unclipped(mut self) -> Self {
        self.clip_clt = false;
        self
    }

    /// Use a custom root finder for the exact bounds
    pub fn with_solver(mut self, solver: Bisection) -> Self {
        self.solver = solver;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.level.alpha()
    }

    pub fn confidence_level(&self) -> f64 {
        self.level.value()
    }

    fn check_counts(n_total: u64, n_success: u64) -> Result<()> {
        if n_total == 0 {
            return Err(Error::InvalidParameter(
                "Number of trials must be positive".to_string(),
            ));
        }
        if n_success > n_total {
            return Err(Error::InvalidParameter(format!(
                "Number of successes {n_success} exceeds number of trials {n_total}"
            )));
        }
        Ok(())
    }

    /// Both intervals for `n_success` successes out of `n_total` trials
    #[instrument(skip(self), fields(alpha = self.alpha()))]
    pub fn interval(&self, n_total: u64, n_success: u64) -> Result<BinomialInterval> {
        Ok(BinomialInterval {
            exact: self.exact(n_total, n_success)?,
            clt: self.clt(n_total, n_success)?,
            n_total,
            n_success,
        })
    }

    /// Clopper-Pearson interval
    pub fn exact(&self, n_total: u64, n_success: u64) -> Result<ConfidenceInterval> {
        Self::check_counts(n_total, n_success)?;
        let tail = self.level.tail_probability();
        let observed = n_success as f64 / n_total as f64;

        let lower = if n_success == 0 {
            0.0
        } else {
            // P(X >= k) rises from 0 at p = 0 to at least 1/2 at p = k/n
            self.solver
                .solve(
                    |p| Ok(math::binomial_sf(n_success, n_total, p)? - tail),
                    0.0,
                    observed,
                )
                .map_err(|e| {
                    Error::Computation(format!("Exact lower bound for {n_success}/{n_total}: {e}"))
                })?
        };

        let upper = if n_success == n_total {
            1.0
        } else {
            // P(X <= k) falls from at least 1/2 at p = k/n to 0 at p = 1
            self.solver
                .solve(
                    |p| Ok(math::binomial_cdf(n_success, n_total, p)? - tail),
                    observed,
                    1.0,
                )
                .map_err(|e| {
                    Error::Computation(format!("Exact upper bound for {n_success}/{n_total}: {e}"))
                })?
        };

        debug!(n_total, n_success, lower, upper, "exact binomial interval");
        Ok(ConfidenceInterval::new(
            lower,
            upper,
            observed,
            self.level.value(),
        ))
    }

    /// Wald interval from the normal approximation
    pub fn clt(&self, n_total: u64, n_success: u64) -> Result<ConfidenceInterval> {
        Self::check_counts(n_total, n_success)?;
        let observed = n_success as f64 / n_total as f64;
        let z = math::normal_critical_value(self.level.alpha())?;
        let margin = z * (observed * (1.0 - observed) / n_total as f64).sqrt();

        let (mut lower, mut upper) = (observed - margin, observed + margin);
        if self.clip_clt && (lower < 0.0 || upper > 1.0) {
            warn!(n_total, n_success, lower, upper, "clipping CLT interval to [0, 1]");
            lower = lower.max(0.0);
            upper = upper.min(1.0);
        }

        Ok(ConfidenceInterval::new(
            lower,
            upper,
            observed,
            self.level.value(),
        ))
    }
}

/// Exact and CLT intervals with a clipped CLT interval
pub fn binomial_interval(n_total: u64, n_success: u64, alpha: f64) -> Result<BinomialInterval> {
    BinomialCI::new(alpha)?.interval(n_total, n_success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_successes_large_n() {
        let result = binomial_interval(10_000, 5_000, 0.01).unwrap();
        assert!(result.exact.contains(0.5));
        assert_relative_eq!(result.exact.lower, 0.49, epsilon = 0.005);
        assert_relative_eq!(result.exact.upper, 0.51, epsilon = 0.005);
        // Symmetric around 1/2
        assert_relative_eq!(result.exact.lower + result.exact.upper, 1.0, epsilon = 1e-9);
        // Large n: exact and Wald agree closely
        assert_relative_eq!(result.exact.lower, result.clt.lower, epsilon = 1e-3);
        assert_relative_eq!(result.exact.upper, result.clt.upper, epsilon = 1e-3);
    }

    #[test]
    fn test_known_clopper_pearson_values() {
        // 3 successes out of 10 at 95%: [0.06674, 0.65245]
        let ci = BinomialCI::new(0.05).unwrap().exact(10, 3).unwrap();
        assert_relative_eq!(ci.lower, 0.066739, epsilon = 1e-5);
        assert_relative_eq!(ci.upper, 0.652453, epsilon = 1e-5);

        // 1 success out of 1: lower bound alpha/2
        let ci = BinomialCI::new(0.05).unwrap().exact(1, 1).unwrap();
        assert_relative_eq!(ci.lower, 0.025, epsilon = 1e-9);
        assert_eq!(ci.upper, 1.0);
    }

    #[test]
    fn test_zero_successes() {
        let result = binomial_interval(10, 0, 0.05).unwrap();
        assert_eq!(result.exact.lower, 0.0);
        // Upper bound solves (1 - p)^10 = 0.025
        assert_relative_eq!(result.exact.upper, 1.0 - 0.025f64.powf(0.1), epsilon = 1e-9);
        assert_eq!(result.observed(), 0.0);
    }

    #[test]
    fn test_all_successes() {
        let result = binomial_interval(10, 10, 0.05).unwrap();
        assert_eq!(result.exact.upper, 1.0);
        // Lower bound solves p^10 = 0.025
        assert_relative_eq!(result.exact.lower, 0.025f64.powf(0.1), epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_strictly_inside_for_interior_counts() {
        let ci = BinomialCI::new(0.05).unwrap();
        for k in 1..20 {
            let exact = ci.exact(20, k).unwrap();
            assert!(exact.lower > 0.0);
            assert!(exact.upper < 1.0);
            assert!(exact.lower <= exact.estimate && exact.estimate <= exact.upper);
        }
    }

    #[test]
    fn test_clt_clipping() {
        let clipped = BinomialCI::new(0.05).unwrap().clt(10, 1).unwrap();
        assert_eq!(clipped.lower, 0.0);

        let raw = BinomialCI::new(0.05).unwrap().unclipped().clt(10, 1).unwrap();
        assert!(raw.lower < 0.0);
        assert_relative_eq!(raw.upper, clipped.upper);
        // 0.1 ± 1.96 * sqrt(0.09 / 10)
        assert_relative_eq!(raw.upper, 0.1 + 1.959964 * 0.009f64.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_clt_degenerate_at_extremes() {
        let ci = BinomialCI::new(0.05).unwrap().clt(10, 0).unwrap();
        assert_eq!(ci.lower, 0.0);
        assert_eq!(ci.upper, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(binomial_interval(0, 0, 0.05), Err(Error::InvalidParameter(_))));
        assert!(matches!(binomial_interval(10, 11, 0.05), Err(Error::InvalidParameter(_))));
        assert!(binomial_interval(10, 5, 0.0).is_err());
        assert!(binomial_interval(10, 5, 1.0).is_err());
    }

    #[test]
    fn test_solver_failure_surfaces() {
        let ci = BinomialCI::new(0.05)
            .unwrap()
            .with_solver(Bisection::new(1e-12, 2));
        assert!(matches!(ci.exact(10, 3), Err(Error::Computation(_))));
        // Wald interval does not use the solver
        assert!(ci.clt(10, 3).is_ok());
    }

    #[test]
    fn test_tiny_alpha_keeps_interior_bounds() {
        let ci = BinomialCI::new(1e-17).unwrap();
        assert_eq!(ci.alpha(), 1e-17);

        let exact = ci.exact(10, 5).unwrap();
        assert!(exact.lower > 0.0, "lower {}", exact.lower);
        assert!(exact.upper < 1.0, "upper {}", exact.upper);
        // Symmetric counts give symmetric bounds
        assert_relative_eq!(exact.lower + exact.upper, 1.0, epsilon = 1e-9);

        let clt = ci.clt(10, 5).unwrap();
        assert!(clt.lower >= 0.0 && clt.upper <= 1.0);
        assert!(clt.contains(0.5));
    }

    #[test]
    fn test_single_success_in_huge_trial_count() {
        // The lower bound solves 1 - (1 - p)^n = alpha/2
        let alpha = 0.05f64;
        let n = 1_000_000_000u64;
        let expected = -((-alpha / 2.0).ln_1p() / n as f64).exp_m1();

        let exact = BinomialCI::new(alpha).unwrap().exact(n, 1).unwrap();
        assert_relative_eq!(exact.lower, expected, max_relative = 1e-3);
        assert!(exact.upper > exact.estimate);
    }

    #[test]
    fn test_wider_at_higher_confidence() {
        let narrow = binomial_interval(100, 30, 0.10).unwrap();
        let wide = binomial_interval(100, 30, 0.01).unwrap();
        assert!(wide.exact.width() > narrow.exact.width());
        assert!(wide.clt.width() > narrow.clt.width());
    }
}
