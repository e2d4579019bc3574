//! Technical indicators aligned to price series.
//!
//! This crate provides the indicators the trend classifier consumes:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volume moving average
//!
//! Every output has one entry per input bar; warm-up positions are `None`.

pub mod engine;
pub mod momentum;
pub mod moving_average;

pub use engine::{IndicatorConfig, IndicatorEngine, IndicatorSet, MacdSeries};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
