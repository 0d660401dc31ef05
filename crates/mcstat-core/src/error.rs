//! Error types for Monte Carlo estimation
//!
//! Provides a unified error type for all mcstat crates.

use thiserror::Error;

/// Core error type for Monte Carlo estimation routines
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a total error probability outside (0, 1)
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidParameter(format!("Alpha {alpha} must be in (0, 1)"))
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in (0, 1)"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}

/// Validate a two-sided total error probability
pub fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_alpha(alpha))
    }
}

/// Validate a quantile level strictly inside (0, 1)
pub fn check_quantile(p: f64) -> Result<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_quantile(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::InvalidInput("sampler returned too few values".to_string());
        assert_eq!(err.to_string(), "Invalid input: sampler returned too few values");

        let err = Error::InsufficientData { expected: 10, actual: 5 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 10 samples, got 5");

        let err = Error::Computation("bisection did not converge".to_string());
        assert_eq!(err.to_string(), "Computation error: bisection did not converge");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input();
        match err {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::invalid_alpha(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: Alpha 1.5 must be in (0, 1)");

        let err = Error::invalid_quantile(-0.1);
        assert_eq!(err.to_string(), "Invalid parameter: Quantile -0.1 must be in (0, 1)");

        let err = Error::size_mismatch(100, 50, "pilot draw");
        assert_eq!(err.to_string(), "Invalid input: Size mismatch in pilot draw: expected 100, got 50");

        let err = Error::non_finite("pilot sample");
        assert_eq!(err.to_string(), "Computation error: pilot sample contains NaN or infinite values");
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_check_alpha() {
        assert!(check_alpha(0.05).is_ok());
        assert!(check_alpha(0.999).is_ok());
        assert!(check_alpha(0.0).is_err());
        assert!(check_alpha(1.0).is_err());
        assert!(check_alpha(-0.1).is_err());
        assert!(check_alpha(f64::NAN).is_err());
    }

    #[test]
    fn test_check_quantile() {
        assert!(check_quantile(0.5).is_ok());
        assert!(check_quantile(0.0).is_err());
        assert!(check_quantile(1.0).is_err());
        assert!(matches!(check_quantile(2.0), Err(Error::InvalidParameter(_))));
    }
}
