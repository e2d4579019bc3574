//! Property tests for trend analysis.
//!
//! 1. Divergence exclusivity: no timestamp is both Bullish and Bearish
//! 2. Classification ranges: strength in [0, 1], duration bounded by the
//!    series length and zero exactly when the label is Unknown

use std::collections::HashMap;

use proptest::prelude::*;
use trendsignal_analysis::{DivergenceDetector, TrendClassifier};
use trendsignal_core::types::{Bar, DivergenceKind, IndicatorSeries, PriceSeries, TrendLabel};
use trendsignal_indicators::{IndicatorConfig, IndicatorEngine};

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn series_from(closes: &[f64], volumes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .zip(volumes.iter().cycle())
        .enumerate()
        .map(|(i, (&c, &v))| Bar::new(i as i64 * 60_000, c, c, c, c, v))
        .collect();
    PriceSeries::new("PROP", bars).unwrap()
}

fn small_engine() -> IndicatorEngine {
    IndicatorEngine::new(IndicatorConfig {
        sma_window: 8,
        ema_window: 5,
        macd_fast: 3,
        macd_slow: 7,
        macd_signal: 3,
        rsi_window: 5,
        volume_window: 4,
    })
}

proptest! {
    #[test]
    fn divergence_kinds_are_exclusive(
        closes in prop::collection::vec(arb_price(), 2..80),
        values in prop::collection::vec(prop::option::of(0.0..100.0_f64), 2..80),
    ) {
        let series = series_from(&closes, &[1.0]);
        let values: Vec<Option<f64>> = values.iter().copied().cycle().take(closes.len()).collect();
        let indicator = IndicatorSeries::new("ind", &series.timestamps(), values);

        let events = DivergenceDetector::new().detect(&series, &indicator);
        let mut seen: HashMap<i64, DivergenceKind> = HashMap::new();
        for event in &events {
            prop_assert!(seen.insert(event.timestamp, event.kind).is_none());
        }

        for event in events {
            let i = (event.timestamp / 60_000) as usize;
            prop_assert!(i >= 1);
            match event.kind {
                DivergenceKind::Bullish => prop_assert!(closes[i] < closes[i - 1]),
                DivergenceKind::Bearish => prop_assert!(closes[i] > closes[i - 1]),
            }
        }
    }
}

proptest! {
    #[test]
    fn classification_stays_in_range(
        closes in prop::collection::vec(arb_price(), 8..80),
        volumes in prop::collection::vec(100.0..10_000.0_f64, 1..10),
    ) {
        let series = series_from(&closes, &volumes);
        let c = TrendClassifier::default().classify_series(&small_engine(), &series);

        prop_assert!((0.0..=1.0).contains(&c.strength));
        prop_assert!(c.duration <= closes.len());
        prop_assert_eq!(c.duration == 0, c.label == TrendLabel::Unknown);
        prop_assert_eq!(c.votes.is_empty(), c.label == TrendLabel::Unknown);
    }
}
