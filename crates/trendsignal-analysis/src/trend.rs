//! Multi-indicator trend classification.
//!
//! Three indicator rules each cast a vote in `{-1, 0, +1}` at a bar:
//! price against its SMA and EMA, the MACD line against its signal line, and
//! RSI against the overbought/oversold levels. The mean vote decides the
//! label.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trendsignal_core::error::SignalError;
use trendsignal_core::types::{
    Direction, PriceSeries, TrendClassification, TrendLabel, TrendVote, VolumeTrend, VoteSource,
};
use trendsignal_indicators::{IndicatorEngine, IndicatorSet};

/// Configuration for the trend classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// RSI above this votes bearish
    pub overbought: f64,
    /// RSI below this votes bullish
    pub oversold: f64,
    /// Mean vote beyond ±threshold gives Uptrend/Downtrend
    pub vote_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
            vote_threshold: 0.3,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.overbought <= self.oversold {
            return Err(SignalError::Config(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(SignalError::Config(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.vote_threshold) {
            return Err(SignalError::Config(
                "Vote threshold must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Classifies the trend of the latest bar of a series.
#[derive(Debug, Clone, Default)]
pub struct TrendClassifier {
    config: TrendConfig,
}

impl TrendClassifier {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// The three votes at `index`, or `None` if any input is undefined there.
    pub fn votes_at(&self, set: &IndicatorSet, index: usize) -> Option<[TrendVote; 3]> {
        let timestamp = *set.timestamps.get(index)?;
        let close = *set.closes.get(index)?;
        let sma = set.sma.value_at(index)?;
        let ema = set.ema.value_at(index)?;
        let macd_line = set.macd.line.value_at(index)?;
        let macd_signal = set.macd.signal.value_at(index)?;
        let rsi = set.rsi.value_at(index)?;

        let price = if close > sma && close > ema {
            Direction::Up
        } else if close < sma && close < ema {
            Direction::Down
        } else {
            Direction::Flat
        };

        let macd = if macd_line > macd_signal {
            Direction::Up
        } else if macd_line < macd_signal {
            Direction::Down
        } else {
            Direction::Flat
        };

        let rsi = if rsi > self.config.overbought {
            Direction::Down
        } else if rsi < self.config.oversold {
            Direction::Up
        } else {
            Direction::Flat
        };

        let vote = |source, direction| TrendVote {
            timestamp,
            source,
            direction,
        };
        Some([
            vote(VoteSource::Price, price),
            vote(VoteSource::Macd, macd),
            vote(VoteSource::Rsi, rsi),
        ])
    }

    /// Label implied by a set of votes.
    pub fn label_from_votes(&self, votes: &[TrendVote]) -> TrendLabel {
        let Some(avg) = TrendVote::average(votes) else {
            return TrendLabel::Unknown;
        };

        if avg > self.config.vote_threshold {
            TrendLabel::Uptrend
        } else if avg < -self.config.vote_threshold {
            TrendLabel::Downtrend
        } else {
            TrendLabel::Sideways
        }
    }

    /// Label of the bar at `index`.
    pub fn label_at(&self, set: &IndicatorSet, index: usize) -> TrendLabel {
        match self.votes_at(set, index) {
            Some(votes) => self.label_from_votes(&votes),
            None => TrendLabel::Unknown,
        }
    }

    /// Labels for every bar in a single forward pass.
    ///
    /// Every indicator is causal, so the label at `i` equals the label of the
    /// prefix series ending at `i`.
    pub fn labels(&self, set: &IndicatorSet) -> Vec<TrendLabel> {
        (0..set.len()).map(|i| self.label_at(set, i)).collect()
    }

    /// Strength for a label given the RSI at the same bar.
    pub fn strength(&self, label: TrendLabel, rsi: Option<f64>) -> f64 {
        match (label, rsi) {
            (TrendLabel::Uptrend, Some(rsi)) => (rsi / 100.0).clamp(0.0, 1.0),
            (TrendLabel::Downtrend, Some(rsi)) => ((100.0 - rsi) / 100.0).clamp(0.0, 1.0),
            _ => 0.5,
        }
    }

    /// Consecutive bars, walking back from the latest and including it, whose
    /// label equals the latest label. `Unknown` has no duration.
    pub fn duration(&self, labels: &[TrendLabel]) -> usize {
        match labels.last() {
            None | Some(TrendLabel::Unknown) => 0,
            Some(current) => labels.iter().rev().take_while(|l| *l == current).count(),
        }
    }

    /// `Increasing` when volume exceeds its moving average at `index`.
    pub fn volume_trend_at(&self, set: &IndicatorSet, index: usize) -> VolumeTrend {
        match (set.volumes.get(index), set.volume_sma.value_at(index)) {
            (Some(&volume), Some(avg)) if volume > avg => VolumeTrend::Increasing,
            _ => VolumeTrend::Decreasing,
        }
    }

    /// Classify the latest bar of a computed indicator set.
    pub fn classify(&self, set: &IndicatorSet) -> TrendClassification {
        let Some(last) = set.len().checked_sub(1) else {
            return TrendClassification::unknown(0);
        };
        let timestamp = set.timestamps[last];

        let Some(votes) = self.votes_at(set, last) else {
            debug!(timestamp, "indicators undefined at latest bar");
            return TrendClassification {
                volume_trend: self.volume_trend_at(set, last),
                ..TrendClassification::unknown(timestamp)
            };
        };

        let label = self.label_from_votes(&votes);
        let labels = self.labels(set);

        let classification = TrendClassification {
            timestamp,
            label,
            strength: self.strength(label, set.rsi.value_at(last)),
            duration: self.duration(&labels),
            volume_trend: self.volume_trend_at(set, last),
            votes: votes.to_vec(),
        };

        debug!(
            timestamp,
            label = %classification.label,
            strength = classification.strength,
            duration = classification.duration,
            "trend classified"
        );

        classification
    }

    /// Compute indicators and classify. Never fails: indicator errors yield
    /// an `Unknown` classification.
    pub fn classify_series(
        &self,
        engine: &IndicatorEngine,
        series: &PriceSeries,
    ) -> TrendClassification {
        match engine.compute(series) {
            Ok(set) => self.classify(&set),
            Err(e) => {
                warn!(symbol = series.symbol(), error = %e, "trend unknown");
                let timestamp = series.last().map(|b| b.timestamp).unwrap_or_default();
                TrendClassification::unknown(timestamp)
            }
        }
    }
}
