//! Trend votes and classifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Combined trend label for a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrendLabel {
    Uptrend,
    Downtrend,
    Sideways,
    /// An upstream indicator was undefined or unavailable.
    #[default]
    Unknown,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendLabel::Uptrend => "Uptrend",
            TrendLabel::Downtrend => "Downtrend",
            TrendLabel::Sideways => "Sideways",
            TrendLabel::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Direction of a single indicator vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Down,
    Flat,
    Up,
}

impl Direction {
    /// Signed value in `{-1, 0, +1}`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Down => -1,
            Direction::Flat => 0,
            Direction::Up => 1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Down),
            0 => Ok(Direction::Flat),
            1 => Ok(Direction::Up),
            other => Err(format!("vote must be -1, 0 or 1, got {}", other)),
        }
    }
}

/// Which indicator rule produced a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteSource {
    /// Close against SMA and EMA
    Price,
    /// MACD line against its signal line
    Macd,
    /// RSI overbought/oversold
    Rsi,
}

/// One indicator's vote at a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendVote {
    pub timestamp: i64,
    pub source: VoteSource,
    pub direction: Direction,
}

impl TrendVote {
    /// Mean of the vote values, `None` when no votes were cast.
    pub fn average(votes: &[TrendVote]) -> Option<f64> {
        if votes.is_empty() {
            return None;
        }
        let sum: i32 = votes.iter().map(|v| v.direction.as_i8() as i32).sum();
        Some(sum as f64 / votes.len() as f64)
    }
}

/// Latest volume relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
}

impl fmt::Display for VolumeTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeTrend::Increasing => write!(f, "Increasing"),
            VolumeTrend::Decreasing => write!(f, "Decreasing"),
        }
    }
}

/// Trend classification of the latest bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendClassification {
    /// Timestamp of the classified bar
    pub timestamp: i64,
    pub label: TrendLabel,
    /// In `[0, 1]`
    pub strength: f64,
    /// Consecutive bars, up to and including the latest, sharing `label`
    pub duration: usize,
    pub volume_trend: VolumeTrend,
    /// Votes that produced `label`; empty when `label` is `Unknown`
    pub votes: Vec<TrendVote>,
}

impl TrendClassification {
    /// Classification reported when indicators are missing.
    pub fn unknown(timestamp: i64) -> Self {
        Self {
            timestamp,
            label: TrendLabel::Unknown,
            strength: 0.5,
            duration: 0,
            volume_trend: VolumeTrend::Decreasing,
            votes: Vec::new(),
        }
    }
}
