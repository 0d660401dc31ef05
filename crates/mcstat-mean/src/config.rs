//! Tolerance and estimator configuration

use mcstat_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Requested precision of a mean estimate
///
/// The estimator works to the larger of the two values as an absolute
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute error tolerance
    pub abs: f64,
    /// Relative error tolerance
    pub rel: f64,
}

impl Tolerance {
    pub fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }

    /// Purely absolute tolerance
    pub fn absolute(abs: f64) -> Self {
        Self::new(abs, 0.0)
    }

    /// Working absolute precision `max(abs, rel)`
    pub fn working(&self) -> f64 {
        self.abs.max(self.rel)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("absolute", self.abs), ("relative", self.rel)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "{name} tolerance {value} must be finite and non-negative"
                )));
            }
        }
        if self.working() <= 0.0 {
            return Err(Error::InvalidParameter(
                "At least one of the absolute and relative tolerances must be positive"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Tuning knobs of the CLT mean estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltMeanConfig {
    /// Size of the pilot draw used to estimate the standard deviation
    pub pilot_size: usize,
    /// Safety factor applied to the pilot standard deviation
    pub inflation: f64,
    /// Request the sizing draw in batches of at most this many observations
    pub batch_size: Option<usize>,
    /// Refuse to draw more than this many observations for the mean
    pub sample_budget: Option<usize>,
}

impl CltMeanConfig {
    pub const DEFAULT_PILOT_SIZE: usize = 1000;
    pub const DEFAULT_INFLATION: f64 = 1.2;

    pub fn validate(&self) -> Result<()> {
        if self.pilot_size < 2 {
            return Err(Error::InvalidParameter(format!(
                "Pilot size {} must be at least 2",
                self.pilot_size
            )));
        }
        if !(self.inflation > 0.0) || !self.inflation.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "Inflation factor {} must be finite and positive",
                self.inflation
            )));
        }
        if self.batch_size == Some(0) {
            return Err(Error::InvalidParameter(
                "Batch size must be positive".to_string(),
            ));
        }
        if self.sample_budget == Some(0) {
            return Err(Error::InvalidParameter(
                "Sample budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CltMeanConfig {
    fn default() -> Self {
        Self {
            pilot_size: Self::DEFAULT_PILOT_SIZE,
            inflation: Self::DEFAULT_INFLATION,
            batch_size: None,
            sample_budget: None,
        }
    }
}
