//! Distribution-free confidence intervals for quantiles
//!
//! The number of observations below the true `q`-quantile is
//! `Binomial(n, q)`, so order statistics at binomial quantile positions
//! bracket it with the requested confidence for any continuous
//! distribution. The sorted sample is padded with caller-supplied bounds
//! of the support, which serve as the interval ends when the sample is too
//! small to pin the quantile down.

use crate::types::ConfidenceLevel;
use mcstat_core::{check_quantile, math, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Quantile confidence interval with the order statistics that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileInterval {
    pub lower: f64,
    pub upper: f64,
    /// Quantile level the interval targets
    pub quantile: f64,
    pub confidence_level: f64,
    /// Position of the lower bound in the padded order statistics `0..=n+1`
    pub lower_index: usize,
    /// Position of the upper bound in the padded order statistics `0..=n+1`
    pub upper_index: usize,
    /// Whether an index had to be clamped into `0..=n+1`
    pub clamped: bool,
}

impl QuantileInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Order-statistic confidence interval estimator for a fixed quantile
///
/// # Example
///
/// ```rust
/// use mcstat_confidence::QuantileCI;
///
/// let sample: Vec<f64> = (1..=100).map(|x| x as f64).collect();
/// let ci = QuantileCI::new(0.5, 0.05).unwrap();
/// let median = ci.interval(&sample, (0.0, 101.0)).unwrap();
/// assert!(median.contains(50.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileCI {
    quantile: f64,
    level: ConfidenceLevel,
}

impl QuantileCI {
    pub fn new(quantile: f64, alpha: f64) -> Result<Self> {
        check_quantile(quantile)?;
        Ok(Self {
            quantile,
            level: ConfidenceLevel::from_alpha(alpha)?,
        })
    }

    /// Create an interval estimator for the median
    pub fn median(alpha: f64) -> Result<Self> {
        Self::new(0.5, alpha)
    }

    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    pub fn confidence_level(&self) -> f64 {
        self.level.value()
    }

    /// Interval for the quantile of the distribution `sample` was drawn from
    ///
    /// `extremes` must bound every value the distribution can produce; this
    /// is not checked against the sample. The caller's slice is not reordered.
    #[instrument(skip(self, sample), fields(n = sample.len(), quantile = self.quantile))]
    pub fn interval(&self, sample: &[f64], extremes: (f64, f64)) -> Result<QuantileInterval> {
        let (lo_bound, hi_bound) = extremes;
        if sample.is_empty() {
            return Err(Error::empty_input());
        }
        if lo_bound.is_nan() || hi_bound.is_nan() || lo_bound > hi_bound {
            return Err(Error::InvalidInput(format!(
                "Extremes ({lo_bound}, {hi_bound}) must be ordered"
            )));
        }
        if sample.iter().any(|x| x.is_nan()) {
            return Err(Error::InvalidInput("Sample contains NaN".to_string()));
        }

        let n = sample.len();
        let mut ordered = Vec::with_capacity(n + 2);
        ordered.push(lo_bound);
        ordered.extend_from_slice(sample);
        ordered.push(hi_bound);
        ordered[1..=n].sort_unstable_by(f64::total_cmp);

        let tail = self.level.tail_probability();
        let k_lower = math::binomial_quantile(tail, n as u64, self.quantile)?;
        let k_upper = math::binomial_quantile(1.0 - tail, n as u64, self.quantile)?;

        let (lower_index, lower_clamped) = clamp_index(1 + k_lower as i64, n);
        let (upper_index, upper_clamped) = clamp_index(2 + k_upper as i64, n);
        let clamped = lower_clamped || upper_clamped;
        if clamped {
            warn!(
                n,
                lower_index, upper_index, "order statistic index clamped to the padded sample"
            );
        }
        debug!(k_lower, k_upper, lower_index, upper_index, "quantile interval indices");

        Ok(QuantileInterval {
            lower: ordered[lower_index],
            upper: ordered[upper_index],
            quantile: self.quantile,
            confidence_level: self.level.value(),
            lower_index,
            upper_index,
            clamped,
        })
    }
}

/// Clamp a padded order-statistic position into `0..=n+1`
fn clamp_index(index: i64, n: usize) -> (usize, bool) {
    let max = n as i64 + 1;
    let clamped = index.clamp(0, max);
    (clamped as usize, clamped != index)
}

/// Order-statistic interval for the `quant`-quantile
pub fn quantile_interval(
    quant: f64,
    sample: &[f64],
    extremes: (f64, f64),
    alpha: f64,
) -> Result<QuantileInterval> {
    QuantileCI::new(quant, alpha)?.interval(sample, extremes)
}
