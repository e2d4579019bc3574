//! Indicator output aligned to a price series.

use serde::{Deserialize, Serialize};

/// One indicator observation. `value` is `None` inside the warm-up window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub value: Option<f64>,
}

/// Indicator values aligned 1:1 by position with a [`PriceSeries`].
///
/// [`PriceSeries`]: crate::types::PriceSeries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    name: String,
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Zip timestamps with computed values.
    ///
    /// Both slices come from the same price series, so they have equal
    /// length; any excess on either side is dropped.
    pub fn new(name: impl Into<String>, timestamps: &[i64], values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        let points = timestamps
            .iter()
            .zip(values)
            .map(|(&timestamp, value)| IndicatorPoint { timestamp, value })
            .collect();
        Self {
            name: name.into(),
            points,
        }
    }

    /// Build from values that are defined at every position.
    pub fn from_defined(name: impl Into<String>, timestamps: &[i64], values: &[f64]) -> Self {
        Self::new(name, timestamps, values.iter().copied().map(Some).collect())
    }

    /// Indicator name (e.g. `sma_50`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    /// Value at a position; `None` when undefined or out of range.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// Value at the latest position.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.value)
    }

    /// Iterate over the raw values.
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Number of leading undefined positions.
    pub fn warmup_len(&self) -> usize {
        self.points.iter().take_while(|p| p.value.is_none()).count()
    }
}
