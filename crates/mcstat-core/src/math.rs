//! Mathematical utilities for Monte Carlo estimation
//!
//! This module provides the numeric building blocks shared by the
//! estimators: sample moments, normal critical values, binomial
//! distribution helpers and a bracketing root finder.

use crate::{Error, Result};
use statrs::distribution::{Binomial, ContinuousCDF, DiscreteCDF, Normal};
use statrs::function::beta::checked_beta_reg;
use tracing::trace;

/// Arithmetic mean of a sample
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::empty_input());
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation with the unbiased (n - 1) denominator
pub fn std_dev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: data.len(),
        });
    }

    let mu = mean(data)?;
    let variance = data.iter().map(|&x| (x - mu).powi(2)).sum::<f64>() / (data.len() - 1) as f64;

    Ok(variance.sqrt())
}

/// Two-sided standard normal critical value `z = Φ⁻¹(1 - alpha/2)`
///
/// Evaluated as `-Φ⁻¹(alpha/2)` so that tiny `alpha` stays finite.
pub fn normal_critical_value(alpha: f64) -> Result<f64> {
    crate::error::check_alpha(alpha)?;
    let normal = Normal::new(0.0, 1.0).map_err(|e| {
        Error::Computation(format!("Failed to create normal distribution: {}", e))
    })?;
    Ok(-normal.inverse_cdf(alpha / 2.0))
}

/// Binomial CDF `P(X <= k)` for `X ~ Binomial(n, p)`
///
/// The degenerate endpoints `p = 0` and `p = 1` are evaluated exactly.
pub fn binomial_cdf(k: u64, n: u64, p: f64) -> Result<f64> {
    if k >= n {
        return Ok(1.0);
    }
    if p <= 0.0 {
        return Ok(1.0);
    }
    if p >= 1.0 {
        return Ok(0.0);
    }
    let binomial = Binomial::new(p, n).map_err(|e| {
        Error::Computation(format!("Failed to create binomial distribution: {}", e))
    })?;
    Ok(binomial.cdf(k))
}

/// Binomial upper tail `P(X >= k)` for `X ~ Binomial(n, p)`
///
/// Computed directly as the regularized incomplete beta `I_p(k, n - k + 1)`
/// rather than as `1 - P(X <= k - 1)`, so tails far below `f64::EPSILON`
/// keep their relative precision.
pub fn binomial_sf(k: u64, n: u64, p: f64) -> Result<f64> {
    if k == 0 {
        return Ok(1.0);
    }
    if k > n || p <= 0.0 {
        return Ok(0.0);
    }
    if p >= 1.0 {
        return Ok(1.0);
    }
    checked_beta_reg(k as f64, (n - k) as f64 + 1.0, p).map_err(|e| {
        Error::Computation(format!("Failed to evaluate binomial tail: {}", e))
    })
}

/// Discrete inverse CDF of `Binomial(n, q)`
///
/// Returns the smallest `k` in `0..=n` with `P(X <= k) >= prob`.
pub fn binomial_quantile(prob: f64, n: u64, q: f64) -> Result<u64> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(Error::InvalidParameter(format!(
            "Probability {prob} must be in [0, 1]"
        )));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::invalid_quantile(q));
    }

    // CDF is non-decreasing in k, so binary search over [0, n]
    let mut lo = 0u64;
    let mut hi = n;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if binomial_cdf(mid, n, q)? >= prob {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

/// Bisection root finder for continuous functions on a bracketing interval
///
/// Bisection cannot diverge, which makes it the right tool for monotone
/// equations such as the exact binomial bounds.
///
/// The stopping rule is relative: iteration ends once the bracket width
/// falls below `tolerance` times the larger endpoint magnitude, or when the
/// bracket can no longer be split in floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    /// Relative bracket width at which to stop
    pub tolerance: f64,
    /// Iteration cap; exceeding it is reported as an error
    pub max_iterations: usize,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl Bisection {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Find a root of `f` in `[lo, hi]`
    ///
    /// `f(lo)` and `f(hi)` must have opposite signs (or one of them be zero).
    pub fn solve<F>(&self, mut f: F, mut lo: f64, mut hi: f64) -> Result<f64>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if !(self.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Bisection tolerance {} must be positive",
                self.tolerance
            )));
        }
        if !(lo <= hi) {
            return Err(Error::InvalidParameter(format!(
                "Invalid bracket [{lo}, {hi}]"
            )));
        }

        let mut f_lo = f(lo)?;
        let f_hi = f(hi)?;
        if f_lo.is_nan() || f_hi.is_nan() {
            return Err(Error::non_finite("bracket evaluation"));
        }
        if f_lo == 0.0 {
            return Ok(lo);
        }
        if f_hi == 0.0 {
            return Ok(hi);
        }
        if f_lo.signum() == f_hi.signum() {
            return Err(Error::Computation(format!(
                "Root not bracketed by [{lo}, {hi}]: f(lo) = {f_lo}, f(hi) = {f_hi}"
            )));
        }

        for iteration in 0..self.max_iterations {
            let mid = 0.5 * (lo + hi);
            let scale = lo.abs().max(hi.abs()).max(f64::MIN_POSITIVE);
            if hi - lo <= self.tolerance * scale || mid <= lo || mid >= hi {
                trace!(iteration, root = mid, "bisection converged");
                return Ok(mid);
            }

            let f_mid = f(mid)?;
            if f_mid.is_nan() {
                return Err(Error::non_finite("bisection midpoint evaluation"));
            }
            if f_mid == 0.0 {
                return Ok(mid);
            }
            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        Err(Error::Computation(format!(
            "Bisection did not converge within {} iterations (bracket [{lo}, {hi}])",
            self.max_iterations
        )))
    }
}
