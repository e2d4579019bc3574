//! Indicator engine: every indicator the trend classifier needs, aligned to
//! one price series.

use serde::{Deserialize, Serialize};
use trendsignal_core::error::{DataError, IndicatorError, SignalResult};
use trendsignal_core::traits::{Indicator, MultiOutputIndicator};
use trendsignal_core::types::{IndicatorSeries, PriceSeries};

use crate::momentum::{Macd, Rsi};
use crate::moving_average::{Ema, Sma};

/// Indicator windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_window: usize,
    pub ema_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_window: usize,
    pub volume_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_window: 50,
            ema_window: 20,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_window: 14,
            volume_window: 20,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let windows = [
            ("sma_window", self.sma_window),
            ("ema_window", self.ema_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("rsi_window", self.rsi_window),
            ("volume_window", self.volume_window),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "{} must be greater than 0",
                name
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(
                "macd_fast must be less than macd_slow".into(),
            ));
        }
        Ok(())
    }

    /// Bars needed before any windowed indicator yields a value.
    pub fn min_bars(&self) -> usize {
        self.sma_window
            .min(self.rsi_window + 1)
            .min(self.volume_window)
            .max(1)
    }
}

/// MACD line, signal and histogram as aligned series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// All indicators for one price series, aligned by position.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub timestamps: Vec<i64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
    pub sma: IndicatorSeries,
    pub ema: IndicatorSeries,
    pub macd: MacdSeries,
    pub rsi: IndicatorSeries,
    pub volume_sma: IndicatorSeries,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Computes indicator series from price series.
///
/// Stateless apart from its configuration; every call is a pure function of
/// the series passed in.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Create an engine. The config is checked on every computation, so an
    /// invalid one surfaces as an [`IndicatorError`] there.
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Simple moving average of close.
    pub fn sma(&self, series: &PriceSeries, window: usize) -> SignalResult<IndicatorSeries> {
        check_window(window)?;
        let closes = closes(series)?;
        run(&Sma::new(window), &closes, series)
    }

    /// Exponential moving average of close.
    pub fn ema(&self, series: &PriceSeries, window: usize) -> SignalResult<IndicatorSeries> {
        check_window(window)?;
        let closes = closes(series)?;
        run(&Ema::new(window), &closes, series)
    }

    /// Relative strength index of close.
    pub fn rsi(&self, series: &PriceSeries, window: usize) -> SignalResult<IndicatorSeries> {
        check_window(window)?;
        let closes = closes(series)?;
        run(&Rsi::new(window), &closes, series)
    }

    /// Simple moving average of volume.
    pub fn volume_sma(&self, series: &PriceSeries, window: usize) -> SignalResult<IndicatorSeries> {
        check_window(window)?;
        let volumes = volumes(series)?;
        let sma = Sma::new(window);
        sma.validate_data(&volumes)?;
        Ok(IndicatorSeries::new(
            format!("volume_sma_{}", window),
            &series.timestamps(),
            sma.calculate(&volumes),
        ))
    }

    /// MACD with the configured periods.
    pub fn macd(&self, series: &PriceSeries) -> SignalResult<MacdSeries> {
        self.config.validate()?;
        let closes = closes(series)?;
        Ok(self.macd_from_closes(&closes, &series.timestamps())?)
    }

    /// Compute every indicator in one pass.
    ///
    /// Fails when the config is invalid, when a close or volume is missing,
    /// or when the series is shorter than the smallest configured window.
    /// Indicators whose own window is not yet filled are returned with
    /// undefined positions.
    pub fn compute(&self, series: &PriceSeries) -> SignalResult<IndicatorSet> {
        self.config.validate()?;
        let closes = closes(series)?;
        let volumes = volumes(series)?;
        let required = self.config.min_bars();
        if series.len() < required {
            return Err(DataError::InsufficientData {
                required,
                available: series.len(),
            }
            .into());
        }

        let timestamps = series.timestamps();
        let c = &self.config;
        let sma = Sma::new(c.sma_window);
        let ema = Ema::new(c.ema_window);
        let rsi = Rsi::new(c.rsi_window);
        let volume_sma = Sma::new(c.volume_window);

        Ok(IndicatorSet {
            sma: IndicatorSeries::new(sma.name(), &timestamps, sma.calculate(&closes)),
            ema: IndicatorSeries::new(ema.name(), &timestamps, ema.calculate(&closes)),
            rsi: IndicatorSeries::new(rsi.name(), &timestamps, rsi.calculate(&closes)),
            volume_sma: IndicatorSeries::new(
                format!("volume_sma_{}", c.volume_window),
                &timestamps,
                volume_sma.calculate(&volumes),
            ),
            macd: self.macd_from_closes(&closes, &timestamps)?,
            timestamps,
            closes,
            volumes,
        })
    }

    fn macd_from_closes(&self, closes: &[f64], timestamps: &[i64]) -> Result<MacdSeries, DataError> {
        let c = &self.config;
        let macd = Macd::with_periods(c.macd_fast, c.macd_slow, c.macd_signal);
        macd.validate_data(closes)?;

        let outputs = macd.calculate(closes);
        let line: Vec<f64> = outputs.iter().map(|o| o.macd).collect();
        let signal: Vec<f64> = outputs.iter().map(|o| o.signal).collect();
        let histogram: Vec<f64> = outputs.iter().map(|o| o.histogram).collect();

        Ok(MacdSeries {
            line: IndicatorSeries::from_defined("macd_line", timestamps, &line),
            signal: IndicatorSeries::from_defined("macd_signal", timestamps, &signal),
            histogram: IndicatorSeries::from_defined("macd_histogram", timestamps, &histogram),
        })
    }
}

fn check_window(window: usize) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidParameter(
            "window must be greater than 0".into(),
        ));
    }
    Ok(())
}

fn run(
    indicator: &impl Indicator,
    data: &[f64],
    series: &PriceSeries,
) -> SignalResult<IndicatorSeries> {
    indicator.validate_data(data)?;
    Ok(IndicatorSeries::new(
        indicator.name(),
        &series.timestamps(),
        indicator.calculate(data),
    ))
}

fn closes(series: &PriceSeries) -> Result<Vec<f64>, DataError> {
    require_finite(series.closes(), "close")
}

fn volumes(series: &PriceSeries) -> Result<Vec<f64>, DataError> {
    require_finite(series.volumes(), "volume")
}

fn require_finite(values: Vec<f64>, column: &'static str) -> Result<Vec<f64>, DataError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DataError::MissingValue { column, index }),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendsignal_core::error::SignalError;
    use trendsignal_core::types::Bar;

    fn series_from(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 86_400_000, c, c + 1.0, c - 1.0, c, 1000.0 + i as f64))
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = IndicatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_bars(), 15);
    }

    #[test]
    fn test_config_validation() {
        let config = IndicatorConfig {
            rsi_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compute_aligns_every_series() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.2).sin() * 3.0).collect();
        let series = series_from(&closes);
        let set = IndicatorEngine::default().compute(&series).unwrap();

        assert_eq!(set.len(), 60);
        for s in [
            &set.sma,
            &set.ema,
            &set.rsi,
            &set.volume_sma,
            &set.macd.line,
            &set.macd.signal,
            &set.macd.histogram,
        ] {
            assert_eq!(s.len(), 60, "{}", s.name());
            assert_eq!(s.points()[59].timestamp, series.last().unwrap().timestamp);
        }
        assert_eq!(set.sma.warmup_len(), 49);
        assert_eq!(set.rsi.warmup_len(), 14);
        assert_eq!(set.volume_sma.warmup_len(), 19);
        assert_eq!(set.ema.warmup_len(), 0);
    }

    #[test]
    fn test_compute_rejects_short_series() {
        let series = series_from(&[100.0; 10]);
        let err = IndicatorEngine::default().compute(&series).unwrap_err();
        assert!(matches!(
            err,
            SignalError::Data(DataError::InsufficientData {
                required: 15,
                available: 10
            })
        ));
    }

    #[test]
    fn test_missing_close_is_data_error() {
        let mut closes = vec![100.0; 30];
        closes[7] = f64::NAN;
        let series = series_from(&closes);

        let err = IndicatorEngine::default().compute(&series).unwrap_err();
        assert!(matches!(
            err,
            SignalError::Data(DataError::MissingValue {
                column: "close",
                index: 7
            })
        ));
    }

    #[test]
    fn test_missing_volume_is_data_error() {
        let bars = (0..30)
            .map(|i| {
                let volume = if i == 3 { f64::NAN } else { 500.0 };
                Bar::new(i, 10.0, 11.0, 9.0, 10.0, volume)
            })
            .collect();
        let series = PriceSeries::new("TEST", bars).unwrap();
        let engine = IndicatorEngine::default();

        assert!(matches!(
            engine.volume_sma(&series, 20),
            Err(SignalError::Data(DataError::MissingValue { column: "volume", index: 3 }))
        ));
        // Close-only indicators are unaffected
        assert!(engine.sma(&series, 20).is_ok());
    }

    #[test]
    fn test_single_indicator_window_check() {
        let series = series_from(&[1.0, 2.0, 3.0]);
        let engine = IndicatorEngine::default();

        assert!(engine.sma(&series, 4).is_err());
        assert!(engine.sma(&series, 3).is_ok());
        assert!(engine.rsi(&series, 3).is_err());
        assert!(engine.rsi(&series, 2).is_ok());
        assert!(engine.ema(&series, 50).is_ok());
    }

    #[test]
    fn test_zero_window_is_invalid_parameter() {
        let series = series_from(&[1.0, 2.0, 3.0]);
        let engine = IndicatorEngine::default();

        for result in [
            engine.sma(&series, 0),
            engine.ema(&series, 0),
            engine.rsi(&series, 0),
            engine.volume_sma(&series, 0),
        ] {
            assert!(matches!(
                result,
                Err(SignalError::Indicator(IndicatorError::InvalidParameter(_)))
            ));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_by_compute() {
        let engine = IndicatorEngine::new(IndicatorConfig {
            sma_window: 0,
            ..Default::default()
        });
        let series = series_from(&[100.0; 60]);

        assert!(matches!(
            engine.compute(&series),
            Err(SignalError::Indicator(IndicatorError::InvalidParameter(_)))
        ));
        assert!(engine.macd(&series).is_err());
    }

    #[test]
    fn test_macd_histogram_identity_on_series() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.15).sin() * 7.0).collect();
        let macd = IndicatorEngine::default().macd(&series_from(&closes)).unwrap();

        for i in 0..80 {
            let line = macd.line.value_at(i).unwrap();
            let signal = macd.signal.value_at(i).unwrap();
            assert_eq!(macd.histogram.value_at(i).unwrap(), line - signal);
        }
    }
}
