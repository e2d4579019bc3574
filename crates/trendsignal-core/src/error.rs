//! Error types for the signal engine.

use thiserror::Error;

/// Top-level signal engine error.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Collaborator failure: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Price data errors.
///
/// Raised by the indicator engine and the data adapters. Downstream
/// computation is meaningless without valid history, so these are surfaced
/// to the caller rather than absorbed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Required column missing: {0}")]
    MissingColumn(String),

    #[error("Missing {column} value at bar {index}")]
    MissingValue { column: &'static str, index: usize },

    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Duplicate timestamp {0}")]
    DuplicateTimestamp(i64),

    #[error("Timestamps out of order at bar {index}: {current} follows {previous}")]
    UnorderedTimestamps {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Indicator parameter errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Failures of an external collaborator (forecaster, upstream classifier).
///
/// The signal generator converts these into a HOLD fallback; they never
/// propagate past it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("Forecaster failed: {0}")]
    Forecaster(String),

    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),

    #[error("Trend classification unavailable: {0}")]
    Classification(String),

    #[error("Malformed trend classification: {0}")]
    MalformedClassification(String),
}

/// Result type alias for signal engine operations.
pub type SignalResult<T> = Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_converts_into_signal_error() {
        let err: SignalError = DataError::InsufficientData {
            required: 20,
            available: 5,
        }
        .into();

        assert!(matches!(err, SignalError::Data(_)));
        assert_eq!(
            err.to_string(),
            "Data error: Insufficient data: need 20 bars, have 5"
        );
    }

    #[test]
    fn test_missing_value_message() {
        let err = DataError::MissingValue {
            column: "volume",
            index: 3,
        };
        assert_eq!(err.to_string(), "Missing volume value at bar 3");
    }
}
