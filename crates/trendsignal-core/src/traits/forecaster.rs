//! Trend forecaster capability.

use crate::error::CollaboratorError;
use crate::types::{ForecastResult, PriceSeries};

/// External predictor of future trend direction.
///
/// Implementations may be statistical, neural or stubbed. Timeouts and
/// cancellation belong to the implementation; the engine only sees a result
/// or a failure.
pub trait Forecaster: Send + Sync {
    /// Predict the trend following the last bar of `series`.
    fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult, CollaboratorError>;

    /// Get the forecaster name.
    fn name(&self) -> &str {
        "forecaster"
    }
}

impl<F> Forecaster for F
where
    F: Fn(&PriceSeries) -> Result<ForecastResult, CollaboratorError> + Send + Sync,
{
    fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult, CollaboratorError> {
        self(series)
    }
}
