//! Price/indicator divergence events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DivergenceKind {
    /// Price falls while the indicator rises
    Bullish,
    /// Price rises while the indicator falls
    Bearish,
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceKind::Bullish => write!(f, "Bullish"),
            DivergenceKind::Bearish => write!(f, "Bearish"),
        }
    }
}

/// A divergence at one bar. Identity is `(timestamp, kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivergenceEvent {
    pub timestamp: i64,
    pub kind: DivergenceKind,
}

/// All divergence events found against one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceReport {
    pub indicator: String,
    pub events: Vec<DivergenceEvent>,
}

impl DivergenceReport {
    pub fn bullish(&self) -> impl Iterator<Item = &DivergenceEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == DivergenceKind::Bullish)
    }

    pub fn bearish(&self) -> impl Iterator<Item = &DivergenceEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == DivergenceKind::Bearish)
    }

    /// Dominant divergence direction: bullish only when bullish events
    /// outnumber bearish ones. `None` without any events.
    pub fn bias(&self) -> Option<DivergenceKind> {
        if self.events.is_empty() {
            return None;
        }
        if self.bullish().count() > self.bearish().count() {
            Some(DivergenceKind::Bullish)
        } else {
            Some(DivergenceKind::Bearish)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp: i64, kind: DivergenceKind) -> DivergenceEvent {
        DivergenceEvent { timestamp, kind }
    }

    #[test]
    fn test_bias() {
        let mut report = DivergenceReport {
            indicator: "rsi_14".to_string(),
            events: vec![],
        };
        assert_eq!(report.bias(), None);

        report.events = vec![
            event(1, DivergenceKind::Bullish),
            event(2, DivergenceKind::Bearish),
        ];
        // Ties fall to bearish
        assert_eq!(report.bias(), Some(DivergenceKind::Bearish));

        report.events.push(event(3, DivergenceKind::Bullish));
        assert_eq!(report.bias(), Some(DivergenceKind::Bullish));
        assert_eq!(report.bullish().count(), 2);
        assert_eq!(report.bearish().count(), 1);
    }
}
