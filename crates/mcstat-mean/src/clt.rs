//! Adaptive mean estimation with a CLT-based stopping rule
//!
//! A pilot draw estimates the standard deviation, which is inflated by a
//! safety factor and plugged into the normal sample-size formula
//! `n = ceil((z * sigma / tol)^2)`. A second, independent draw of that size
//! yields the estimate.
//!
//! The error bound is heuristic. It relies on the CLT holding at the chosen
//! sample size and on the inflated pilot deviation bounding the true one.
//! For heavy-tailed integrands (e.g. `U^p` with `p` close to `-1/2`) the
//! pilot routinely underestimates the deviation and the realised failure
//! rate can exceed `alpha` by an order of magnitude.

use crate::config::{CltMeanConfig, Tolerance};
use mcstat_core::{check_alpha, math, Error, Result, SamplingFunction};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Outcome of a CLT mean estimation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanEstimate {
    /// Estimated population mean
    pub mu_hat: f64,
    /// Observations spent on the pilot draw
    pub n_pilot: usize,
    /// Observations spent on the mean draw
    pub n_mu: usize,
    /// Pilot standard deviation (n - 1 denominator)
    pub sigma_hat: f64,
    /// Inflated standard deviation used for sizing
    pub sigma_upper: f64,
    /// Working absolute precision
    pub tolerance: f64,
    /// Total error probability
    pub alpha: f64,
}

impl MeanEstimate {
    /// Total sampling cost, pilot included
    pub fn total_samples(&self) -> usize {
        self.n_pilot + self.n_mu
    }
}

impl fmt::Display for MeanEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.6} ± {} at {:.1}% using {} samples",
            self.mu_hat,
            self.tolerance,
            (1.0 - self.alpha) * 100.0,
            self.total_samples()
        )
    }
}

/// Two-stage CLT mean estimator
///
/// # Example
///
/// ```rust
/// use mcstat_mean::CltMeanEstimator;
/// use mcstat_core::RngSampler;
/// use rand::Rng;
///
/// let estimator = CltMeanEstimator::new(0.05, 0.0, 0.01).unwrap();
/// let mut sampler = RngSampler::seeded(3, |rng| rng.gen::<f64>());
/// let estimate = estimator.estimate(&mut sampler).unwrap();
/// assert!((estimate.mu_hat - 0.5).abs() < 0.1);
/// assert_eq!(estimate.total_samples(), 1000 + estimate.n_mu);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CltMeanEstimator {
    tolerance: Tolerance,
    alpha: f64,
    config: CltMeanConfig,
}

impl CltMeanEstimator {
    /// Create an estimator with default pilot size and inflation factor
    pub fn new(abs_tol: f64, rel_tol: f64, alpha: f64) -> Result<Self> {
        let estimator = Self {
            tolerance: Tolerance::new(abs_tol, rel_tol),
            alpha,
            config: CltMeanConfig::default(),
        };
        estimator.validate()?;
        Ok(estimator)
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CltMeanConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the pilot draw size
    pub fn with_pilot_size(mut self, pilot_size: usize) -> Self {
        self.config.pilot_size = pilot_size;
        self
    }

    /// Set the standard deviation inflation factor
    pub fn with_inflation(mut self, inflation: f64) -> Self {
        self.config.inflation = inflation;
        self
    }

    /// Stream the mean draw in batches of at most `batch_size`
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = Some(batch_size);
        self
    }

    /// Cap the size of the mean draw
    pub fn with_sample_budget(mut self, budget: usize) -> Self {
        self.config.sample_budget = Some(budget);
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn config(&self) -> &CltMeanConfig {
        &self.config
    }

    pub fn validate(&self) -> Result<()> {
        check_alpha(self.alpha)?;
        self.tolerance.validate()?;
        self.config.validate()
    }

    /// Sample size needed for a mean within `tol` given deviation `sigma_upper`
    pub fn required_samples(&self, sigma_upper: f64) -> Result<usize> {
        self.validate()?;
        let z = math::normal_critical_value(self.alpha)?;
        self.sample_size(z, sigma_upper, self.tolerance.working())
    }

    fn sample_size(&self, z: f64, sigma_upper: f64, tol: f64) -> Result<usize> {
        let raw = (z * sigma_upper / tol).powi(2).ceil();
        if !raw.is_finite() {
            return Err(Error::non_finite("required sample size"));
        }
        if let Some(budget) = self.config.sample_budget {
            if raw > budget as f64 {
                return Err(Error::Computation(format!(
                    "Required sample size {raw} exceeds budget of {budget}"
                )));
            }
        }
        if raw >= usize::MAX as f64 {
            return Err(Error::Computation(format!(
                "Required sample size {raw} is not addressable"
            )));
        }
        Ok((raw as usize).max(1))
    }

    /// Estimate the mean of the distribution behind `sampler`
    #[instrument(
        skip(self, sampler),
        fields(abs_tol = self.tolerance.abs, rel_tol = self.tolerance.rel, alpha = self.alpha)
    )]
    pub fn estimate<S>(&self, sampler: &mut S) -> Result<MeanEstimate>
    where
        S: SamplingFunction + ?Sized,
    {
        self.validate()?;
        let tol = self.tolerance.working();
        let z = math::normal_critical_value(self.alpha)?;

        let pilot = sampler.draw_checked(self.config.pilot_size)?;
        let sigma_hat = math::std_dev(&pilot)?;
        if !sigma_hat.is_finite() {
            return Err(Error::non_finite("pilot sample"));
        }
        let sigma_upper = self.config.inflation * sigma_hat;

        let n_mu = self.sample_size(z, sigma_upper, tol)?;
        debug!(
            n_pilot = self.config.pilot_size,
            sigma_hat, sigma_upper, z, n_mu, "sized mean draw"
        );

        let mu_hat = self.draw_mean(sampler, n_mu)?;
        if !mu_hat.is_finite() {
            return Err(Error::non_finite("mean sample"));
        }
        debug!(mu_hat, "mean estimated");

        Ok(MeanEstimate {
            mu_hat,
            n_pilot: self.config.pilot_size,
            n_mu,
            sigma_hat,
            sigma_upper,
            tolerance: tol,
            alpha: self.alpha,
        })
    }

    fn draw_mean<S>(&self, sampler: &mut S, n: usize) -> Result<f64>
    where
        S: SamplingFunction + ?Sized,
    {
        match self.config.batch_size {
            None => math::mean(&sampler.draw_checked(n)?),
            Some(batch) => {
                let mut sum = 0.0;
                let mut remaining = n;
                while remaining > 0 {
                    let len = remaining.min(batch);
                    sum += sampler.draw_checked(len)?.iter().sum::<f64>();
                    remaining -= len;
                }
                Ok(sum / n as f64)
            }
        }
    }
}

/// Estimate a mean with default pilot size (1000) and inflation (1.2)
pub fn estimate_mean<S>(
    sampler: &mut S,
    abs_tol: f64,
    rel_tol: f64,
    alpha: f64,
) -> Result<MeanEstimate>
where
    S: SamplingFunction + ?Sized,
{
    CltMeanEstimator::new(abs_tol, rel_tol, alpha)?.estimate(sampler)
}
