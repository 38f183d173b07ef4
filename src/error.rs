//! Error types for scenario validation and file-backed configuration

use thiserror::Error;

/// A scenario input outside the domain the engine is defined over.
///
/// Raised before any simulation work starts; the engine never runs with
/// out-of-domain inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must lie in [0, 1] (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("interest-only period ({interest_only}y) exceeds loan term ({term}y)")]
    InterestOnlyExceedsTerm { interest_only: u32, term: u32 },

    #[error("{field} must not exceed {max} years (got {years})")]
    PeriodTooLong { field: &'static str, years: u32, max: u32 },

    #[error("holding period must be at least 1 year (got {years})")]
    HoldingPeriodTooShort { years: u32 },

    #[error("marginal tax rate {value} is not one of the supported brackets")]
    UnsupportedTaxRate { value: f64 },

    #[error("sensitivity axis `{axis}` has no values")]
    EmptyAxis { axis: &'static str },
}

/// Crate-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("invalid assumption: {0}")]
    InvalidAssumption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_converts() {
        let err: Error = ParameterError::HoldingPeriodTooShort { years: 0 }.into();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert_eq!(
            err.to_string(),
            "invalid parameter: holding period must be at least 1 year (got 0)"
        );
    }
}
