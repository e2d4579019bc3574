//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One time-indexed OHLCV observation.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Ordered, immutable sequence of bars for one symbol.
///
/// Timestamps are strictly increasing; this is checked on construction so
/// every consumer can rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Create a series, rejecting duplicate or out-of-order timestamps.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, DataError> {
        for (index, pair) in bars.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            if current == previous {
                return Err(DataError::DuplicateTimestamp(current));
            }
            if current < previous {
                return Err(DataError::UnorderedTimestamps {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Symbol identifier.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// The first `len` bars as a new series.
    pub fn prefix(&self, len: usize) -> PriceSeries {
        Self {
            symbol: self.symbol.clone(),
            bars: self.bars[..len.min(self.bars.len())].to_vec(),
        }
    }

    /// Extract timestamps as a vector.
    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, close: f64) -> Bar {
        Bar::new(timestamp, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_series_rejects_duplicate_timestamps() {
        let result = PriceSeries::new("AAPL", vec![bar(1, 100.0), bar(1, 101.0)]);
        assert_eq!(result, Err(DataError::DuplicateTimestamp(1)));
    }

    #[test]
    fn test_series_rejects_unordered_timestamps() {
        let result = PriceSeries::new("AAPL", vec![bar(1, 100.0), bar(3, 101.0), bar(2, 102.0)]);
        assert_eq!(
            result,
            Err(DataError::UnorderedTimestamps {
                index: 2,
                previous: 3,
                current: 2,
            })
        );
    }

    #[test]
    fn test_series_extractions() {
        let series = PriceSeries::new("AAPL", vec![bar(1, 100.5), bar(2, 101.5)]).unwrap();

        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 1000.0]);
        assert_eq!(series.timestamps(), vec![1, 2]);
        assert_eq!(series.last().unwrap().close, 101.5);
    }

    #[test]
    fn test_prefix() {
        let series =
            PriceSeries::new("AAPL", vec![bar(1, 100.0), bar(2, 101.0), bar(3, 102.0)]).unwrap();

        let prefix = series.prefix(2);
        assert_eq!(prefix.len(), 2);
        assert_eq!(prefix.last().unwrap().timestamp, 2);
        assert_eq!(series.prefix(10).len(), 3);
    }

    #[test]
    fn test_bar_datetime() {
        let bar = bar(1_705_276_800_000, 100.0);
        assert_eq!(bar.datetime().unwrap().to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }
}
