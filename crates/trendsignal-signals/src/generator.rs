//! Trading signal generation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use trendsignal_analysis::TrendClassifier;
use trendsignal_core::error::{CollaboratorError, SignalError};
use trendsignal_core::traits::{ErrorReporter, Forecaster, NoopReporter};
use trendsignal_core::types::{
    ForecastResult, PriceSeries, RiskProfile, SignalAction, TradingSignal, TrendClassification,
    TrendLabel,
};
use trendsignal_indicators::IndicatorEngine;
use trendsignal_risk::LevelCalculator;

/// Strength/confidence cut-offs of the decision table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Strength above this (with `strong_confidence`) gives STRONG_BUY/STRONG_SELL
    pub strong_strength: f64,
    /// Strength above this gives BUY/SELL
    pub strength: f64,
    pub strong_confidence: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            strong_strength: 0.7,
            strength: 0.5,
            strong_confidence: 0.8,
        }
    }
}

impl SignalThresholds {
    pub fn validate(&self) -> Result<(), SignalError> {
        for (name, value) in [
            ("strong_strength", self.strong_strength),
            ("strength", self.strength),
            ("strong_confidence", self.strong_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SignalError::Config(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.strong_strength < self.strength {
            return Err(SignalError::Config(
                "strong_strength must not be below strength".into(),
            ));
        }
        Ok(())
    }
}

/// Turns a trend classification and a forecast into a risk-calibrated
/// [`TradingSignal`].
///
/// Generation is total: collaborator failures and malformed inputs produce a
/// HOLD marked as fallback, and the failure goes to the [`ErrorReporter`].
#[derive(Clone)]
pub struct SignalGenerator {
    levels: LevelCalculator,
    thresholds: SignalThresholds,
    reporter: Arc<dyn ErrorReporter>,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(RiskProfile::default(), 2)
    }
}

impl SignalGenerator {
    /// `precision` is the number of decimal places of stop/take levels.
    pub fn new(profile: RiskProfile, precision: u32) -> Self {
        Self {
            levels: LevelCalculator::new(profile, precision),
            thresholds: SignalThresholds::default(),
            reporter: Arc::new(NoopReporter),
        }
    }

    pub fn with_thresholds(mut self, thresholds: SignalThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.levels.profile()
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Decision table; the first matching row wins.
    pub fn decide(
        &self,
        detected: TrendLabel,
        strength: f64,
        predicted: TrendLabel,
        confidence: f64,
    ) -> SignalAction {
        let t = &self.thresholds;
        let strong = strength > t.strong_strength && confidence > t.strong_confidence;

        match (detected, predicted) {
            (TrendLabel::Uptrend, TrendLabel::Uptrend) if strong => SignalAction::StrongBuy,
            (TrendLabel::Uptrend, TrendLabel::Uptrend) if strength > t.strength => SignalAction::Buy,
            (TrendLabel::Downtrend, TrendLabel::Downtrend) if strong => SignalAction::StrongSell,
            (TrendLabel::Downtrend, TrendLabel::Downtrend) if strength > t.strength => {
                SignalAction::Sell
            }
            _ => SignalAction::Hold,
        }
    }

    /// Produce exactly one signal for `symbol` at `timestamp`/`price`.
    pub fn generate(
        &self,
        symbol: &str,
        timestamp: i64,
        price: f64,
        classification: Result<TrendClassification, CollaboratorError>,
        forecast: Result<ForecastResult, CollaboratorError>,
    ) -> TradingSignal {
        let inputs = classification
            .and_then(|c| check_classification(&c).map(|_| c))
            .and_then(|c| forecast.and_then(|f| f.validate().map(|_| (c, f))));

        let (classification, forecast) = match inputs {
            Ok(inputs) => inputs,
            Err(failure) => return self.fallback(symbol, timestamp, price, &failure),
        };

        let mut action = self.decide(
            classification.label,
            classification.strength,
            forecast.predicted,
            forecast.confidence,
        );
        let levels = self.levels.for_action(price, action);
        if levels.is_none() && action != SignalAction::Hold {
            warn!(symbol, price, %action, "no decimal levels for price, holding");
            action = SignalAction::Hold;
        }
        let target = self.price_target(price, forecast.predicted);

        let signal = TradingSignal {
            symbol: symbol.to_string(),
            timestamp,
            action,
            price,
            stop_loss: levels.and_then(|l| l.stop_loss_f64()),
            take_profit: levels.and_then(|l| l.take_profit_f64()),
            detected_trend: classification.label,
            predicted_trend: forecast.predicted,
            strength: classification.strength,
            confidence: forecast.confidence,
            duration: classification.duration,
            volume_trend: Some(classification.volume_trend),
            price_target: target.map(|t| t.0),
            price_target_lower: target.map(|t| t.1),
            price_target_upper: target.map(|t| t.2),
            fallback: false,
        };

        info!(
            "Signal for {}: {} at {:.2} (trend {} / forecast {})",
            symbol, signal.action, price, signal.detected_trend, signal.predicted_trend
        );
        signal
    }

    /// Run the full chain for a series: indicators, classification,
    /// forecast and decision. Never fails.
    pub fn generate_for_series(
        &self,
        series: &PriceSeries,
        engine: &IndicatorEngine,
        classifier: &TrendClassifier,
        forecaster: &dyn Forecaster,
    ) -> TradingSignal {
        let (timestamp, price) = series
            .last()
            .map(|bar| (bar.timestamp, bar.close))
            .unwrap_or((0, 0.0));

        let classification = classifier.classify_series(engine, series);
        let forecast = forecaster.forecast(series);

        self.generate(series.symbol(), timestamp, price, Ok(classification), forecast)
    }

    fn fallback(
        &self,
        symbol: &str,
        timestamp: i64,
        price: f64,
        failure: &CollaboratorError,
    ) -> TradingSignal {
        warn!(symbol, error = %failure, "collaborator failed, falling back to HOLD");
        self.reporter.report(symbol, failure);
        let target = self.price_target(price, TrendLabel::Unknown);

        TradingSignal {
            symbol: symbol.to_string(),
            timestamp,
            action: SignalAction::Hold,
            price,
            stop_loss: None,
            take_profit: None,
            detected_trend: TrendLabel::Unknown,
            predicted_trend: TrendLabel::Unknown,
            strength: 0.0,
            confidence: 0.0,
            duration: 0,
            volume_trend: None,
            price_target: target.map(|t| t.0),
            price_target_lower: target.map(|t| t.1),
            price_target_upper: target.map(|t| t.2),
            fallback: true,
        }
    }

    /// `(target, lower, upper)` for a forecast, absent when it has no
    /// decimal representation.
    fn price_target(&self, price: f64, predicted: TrendLabel) -> Option<(f64, f64, f64)> {
        self.levels
            .price_target_f64(price, predicted)
            .and_then(|target| target.to_f64())
    }
}

fn check_classification(c: &TrendClassification) -> Result<(), CollaboratorError> {
    if !c.strength.is_finite() || !(0.0..=1.0).contains(&c.strength) {
        return Err(CollaboratorError::MalformedClassification(format!(
            "strength {} outside [0, 1]",
            c.strength
        )));
    }
    Ok(())
}
