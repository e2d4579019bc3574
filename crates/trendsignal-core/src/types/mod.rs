//! Core data types for the signal engine.

mod divergence;
mod forecast;
mod indicator_series;
mod ohlcv;
mod risk;
mod signal;
mod trend;

pub use divergence::{DivergenceEvent, DivergenceKind, DivergenceReport};
pub use forecast::ForecastResult;
pub use indicator_series::{IndicatorPoint, IndicatorSeries};
pub use ohlcv::{Bar, PriceSeries};
pub use risk::RiskProfile;
pub use signal::{SignalAction, TradingSignal};
pub use trend::{Direction, TrendClassification, TrendLabel, TrendVote, VolumeTrend, VoteSource};
