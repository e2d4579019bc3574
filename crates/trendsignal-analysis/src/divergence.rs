//! Price/indicator divergence detection.

use tracing::debug;
use trendsignal_core::types::{
    DivergenceEvent, DivergenceKind, DivergenceReport, IndicatorSeries, PriceSeries,
};
use trendsignal_indicators::IndicatorSet;

/// Finds bars where price and an indicator move in opposite directions.
///
/// Bullish: close falls while the indicator rises.
/// Bearish: close rises while the indicator falls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivergenceDetector;

impl DivergenceDetector {
    pub fn new() -> Self {
        Self
    }

    /// Divergence events of `indicator` against the closes of `series`.
    ///
    /// Bars where either value is undefined at `i` or `i - 1`, or where the
    /// indicator timestamp does not match the bar, are skipped.
    pub fn detect(&self, series: &PriceSeries, indicator: &IndicatorSeries) -> Vec<DivergenceEvent> {
        let bars = series.bars();
        let points = indicator.points();
        let len = bars.len().min(points.len());

        (1..len)
            .filter_map(|i| {
                let (prev_bar, bar) = (&bars[i - 1], &bars[i]);
                let (prev_point, point) = (&points[i - 1], &points[i]);
                if prev_point.timestamp != prev_bar.timestamp || point.timestamp != bar.timestamp {
                    return None;
                }
                let kind = divergence_kind(
                    (prev_bar.close, bar.close),
                    (prev_point.value?, point.value?),
                )?;
                Some(DivergenceEvent {
                    timestamp: bar.timestamp,
                    kind,
                })
            })
            .collect()
    }

    /// Events against one indicator, grouped with its name.
    pub fn report(&self, series: &PriceSeries, indicator: &IndicatorSeries) -> DivergenceReport {
        let events = self.detect(series, indicator);
        debug!(
            symbol = series.symbol(),
            indicator = indicator.name(),
            events = events.len(),
            "divergence scan complete"
        );
        DivergenceReport {
            indicator: indicator.name().to_string(),
            events,
        }
    }

    /// RSI and MACD-line divergence reports.
    pub fn detect_indicators(&self, series: &PriceSeries, set: &IndicatorSet) -> Vec<DivergenceReport> {
        vec![
            self.report(series, &set.rsi),
            self.report(series, &set.macd.line),
        ]
    }
}

fn divergence_kind(close: (f64, f64), indicator: (f64, f64)) -> Option<DivergenceKind> {
    let (prev_close, close) = close;
    let (prev_value, value) = indicator;
    if !(prev_close.is_finite() && close.is_finite() && prev_value.is_finite() && value.is_finite()) {
        return None;
    }

    if close < prev_close && value > prev_value {
        Some(DivergenceKind::Bullish)
    } else if close > prev_close && value < prev_value {
        Some(DivergenceKind::Bearish)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendsignal_core::types::Bar;
    use trendsignal_indicators::{IndicatorConfig, IndicatorEngine};

    fn series_from(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 1_000, c, c, c, c, 100.0))
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    fn indicator(series: &PriceSeries, values: Vec<Option<f64>>) -> IndicatorSeries {
        IndicatorSeries::new("ind", &series.timestamps(), values)
    }

    #[test]
    fn test_bullish_and_bearish() {
        let series = series_from(&[100.0, 98.0, 101.0, 102.0]);
        let ind = indicator(&series, vec![Some(40.0), Some(45.0), Some(42.0), Some(43.0)]);

        let events = DivergenceDetector::new().detect(&series, &ind);
        assert_eq!(
            events,
            vec![
                DivergenceEvent {
                    timestamp: 1_000,
                    kind: DivergenceKind::Bullish
                },
                DivergenceEvent {
                    timestamp: 2_000,
                    kind: DivergenceKind::Bearish
                },
            ]
        );
    }

    #[test]
    fn test_undefined_positions_skipped() {
        let series = series_from(&[100.0, 98.0, 97.0, 99.0]);
        let ind = indicator(&series, vec![None, Some(45.0), Some(46.0), Some(44.0)]);

        let events = DivergenceDetector::new().detect(&series, &ind);
        // Bar 1 has no indicator value at bar 0
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 2_000);
        assert_eq!(events[0].kind, DivergenceKind::Bullish);
        assert_eq!(events[1].kind, DivergenceKind::Bearish);
    }

    #[test]
    fn test_misaligned_timestamps_skipped() {
        let series = series_from(&[100.0, 98.0, 101.0]);
        let ind = IndicatorSeries::new("ind", &[0, 1_000, 2_500], vec![Some(1.0), Some(2.0), Some(1.0)]);

        let events = DivergenceDetector::new().detect(&series, &ind);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, 1_000);
    }

    #[test]
    fn test_flat_moves_are_not_divergence() {
        let series = series_from(&[100.0, 100.0, 99.0]);
        let ind = indicator(&series, vec![Some(1.0), Some(2.0), Some(2.0)]);
        assert!(DivergenceDetector::new().detect(&series, &ind).is_empty());
    }

    #[test]
    fn test_report_and_indicators() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0 + (i as f64 * 1.7).cos())
            .collect();
        let series = series_from(&closes);
        let config = IndicatorConfig {
            sma_window: 10,
            ..Default::default()
        };
        let set = IndicatorEngine::new(config).compute(&series).unwrap();

        let reports = DivergenceDetector::new().detect_indicators(&series, &set);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].indicator, "rsi_14");
        assert_eq!(reports[1].indicator, "macd_line");
        for report in &reports {
            assert_eq!(
                report.bullish().count() + report.bearish().count(),
                report.events.len()
            );
        }
        // RSI is undefined until bar 14, so no event can precede bar 15
        assert!(reports[0].events.iter().all(|e| e.timestamp >= 15_000));
    }
}
