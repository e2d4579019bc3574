//! Trend analysis on top of computed indicators.
//!
//! - [`TrendClassifier`]: multi-indicator vote, strength, duration and volume trend
//! - [`DivergenceDetector`]: price/indicator divergence events

mod divergence;
mod trend;

pub use divergence::DivergenceDetector;
pub use trend::{TrendClassifier, TrendConfig};
