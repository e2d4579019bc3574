//! Least-squares drift forecaster.

use statrs::statistics::Statistics;
use trendsignal_core::error::CollaboratorError;
use trendsignal_core::traits::Forecaster;
use trendsignal_core::types::{ForecastResult, PriceSeries, TrendLabel};

/// Fits a straight line to the last `lookback` closes and projects it one
/// bar ahead.
///
/// Confidence is the relative distance of the projection from the last
/// close, capped at 1.
#[derive(Debug, Clone)]
pub struct LinearTrendForecaster {
    lookback: usize,
}

impl Default for LinearTrendForecaster {
    fn default() -> Self {
        Self::new(20)
    }
}

impl LinearTrendForecaster {
    /// Create a forecaster. `lookback` is raised to at least 2 bars.
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback: lookback.max(2),
        }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Projected close one bar past the end of `closes`.
    fn project(closes: &[f64]) -> f64 {
        let xs: Vec<f64> = (0..closes.len()).map(|i| i as f64).collect();
        let slope = xs.iter().covariance(closes.iter()) / xs.iter().variance();
        let intercept = closes.iter().mean() - slope * xs.iter().mean();
        intercept + slope * closes.len() as f64
    }
}

impl Forecaster for LinearTrendForecaster {
    fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult, CollaboratorError> {
        if series.len() < self.lookback {
            return Err(CollaboratorError::Forecaster(format!(
                "need {} closes, have {}",
                self.lookback,
                series.len()
            )));
        }

        let closes = series.closes();
        let window = &closes[closes.len() - self.lookback..];
        let last = window[window.len() - 1];
        if !last.is_finite() || last <= 0.0 {
            return Err(CollaboratorError::Forecaster(format!(
                "last close {} is not a positive price",
                last
            )));
        }

        let predicted = Self::project(window);
        if !predicted.is_finite() {
            return Err(CollaboratorError::Forecaster(
                "projection is not a finite number".into(),
            ));
        }

        let label = if predicted > last {
            TrendLabel::Uptrend
        } else {
            TrendLabel::Downtrend
        };
        let confidence = ((predicted - last).abs() / last).min(1.0);

        Ok(ForecastResult::new(label, confidence))
    }

    fn name(&self) -> &str {
        "linear_trend"
    }
}
