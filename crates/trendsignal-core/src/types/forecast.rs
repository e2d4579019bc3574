//! Output contract of an external trend forecaster.

use serde::{Deserialize, Serialize};

use super::TrendLabel;
use crate::error::CollaboratorError;

/// Predicted trend direction with a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// `Uptrend`, `Downtrend` or `Unknown`
    pub predicted: TrendLabel,
    /// In `[0, 1]`
    pub confidence: f64,
}

impl ForecastResult {
    pub fn new(predicted: TrendLabel, confidence: f64) -> Self {
        Self {
            predicted,
            confidence,
        }
    }

    /// Result used when the forecaster is unavailable.
    pub fn unknown() -> Self {
        Self::new(TrendLabel::Unknown, 0.0)
    }

    /// Check the result against the forecaster contract.
    pub fn validate(&self) -> Result<(), CollaboratorError> {
        if self.predicted == TrendLabel::Sideways {
            return Err(CollaboratorError::MalformedForecast(
                "forecasters predict Uptrend, Downtrend or Unknown, not Sideways".into(),
            ));
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(CollaboratorError::MalformedForecast(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(ForecastResult::new(TrendLabel::Uptrend, 0.9).validate().is_ok());
        assert!(ForecastResult::unknown().validate().is_ok());
        assert!(ForecastResult::new(TrendLabel::Sideways, 0.5).validate().is_err());
        assert!(ForecastResult::new(TrendLabel::Downtrend, 1.5).validate().is_err());
        assert!(ForecastResult::new(TrendLabel::Downtrend, f64::NAN).validate().is_err());
    }
}
