//! Signal generation.
//!
//! Combines a trend classification with a forecast into a five-level trading
//! signal carrying risk-profile stop-loss and take-profit levels.

mod forecast;
mod generator;

pub use forecast::LinearTrendForecaster;
pub use generator::{SignalGenerator, SignalThresholds};
