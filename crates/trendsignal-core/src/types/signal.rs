//! Trading signal produced for the execution/reporting layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TrendLabel, VolumeTrend};

/// Discrete trading action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalAction {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalAction {
    /// BUY or STRONG_BUY.
    pub fn is_buy(&self) -> bool {
        matches!(self, SignalAction::Buy | SignalAction::StrongBuy)
    }

    /// SELL or STRONG_SELL.
    pub fn is_sell(&self) -> bool {
        matches!(self, SignalAction::Sell | SignalAction::StrongSell)
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalAction::StrongBuy => "STRONG_BUY",
            SignalAction::Buy => "BUY",
            SignalAction::Hold => "HOLD",
            SignalAction::Sell => "SELL",
            SignalAction::StrongSell => "STRONG_SELL",
        };
        write!(f, "{}", s)
    }
}

/// A risk-calibrated trading signal. Created once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub symbol: String,
    /// Timestamp of the bar the signal was generated for
    pub timestamp: i64,
    pub action: SignalAction,
    /// Latest close
    pub price: f64,
    /// Absent for HOLD
    pub stop_loss: Option<f64>,
    /// Absent for HOLD
    pub take_profit: Option<f64>,
    pub detected_trend: TrendLabel,
    pub predicted_trend: TrendLabel,
    /// Trend strength in `[0, 1]`
    pub strength: f64,
    /// Forecast confidence in `[0, 1]`
    pub confidence: f64,
    /// Bars the detected trend has persisted
    pub duration: usize,
    pub volume_trend: Option<VolumeTrend>,
    /// Forecast price target
    pub price_target: Option<f64>,
    pub price_target_lower: Option<f64>,
    pub price_target_upper: Option<f64>,
    /// Set when a collaborator failed and this is the substituted HOLD
    pub fallback: bool,
}

impl TradingSignal {
    /// Render the signal as a short human-readable report.
    pub fn summary(&self) -> String {
        let mut out = format!("Signal for {}: {}\n", self.symbol, self.action);
        out.push_str(&format!("Price: {:.2} at {}\n", self.price, self.timestamp));
        if let Some(stop) = self.stop_loss {
            out.push_str(&format!("Stop-loss: {:.2}\n", stop));
        }
        if let Some(take) = self.take_profit {
            out.push_str(&format!("Take-profit: {:.2}\n", take));
        }
        out.push_str(&format!(
            "Detected trend: {} (strength {:.2}, duration {} bars)\n",
            self.detected_trend, self.strength, self.duration
        ));
        out.push_str(&format!(
            "Predicted trend: {} (confidence {:.2})\n",
            self.predicted_trend, self.confidence
        ));
        if let (Some(target), Some(lower), Some(upper)) = (
            self.price_target,
            self.price_target_lower,
            self.price_target_upper,
        ) {
            out.push_str(&format!(
                "Price target: {:.2} ({:.2} - {:.2})\n",
                target, lower, upper
            ));
        }
        if let Some(volume) = self.volume_trend {
            out.push_str(&format!("Volume trend: {}\n", volume));
        }
        if self.fallback {
            out.push_str("Fallback: upstream analysis failed, holding\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold() -> TradingSignal {
        TradingSignal {
            symbol: "AAPL".to_string(),
            timestamp: 1,
            action: SignalAction::Hold,
            price: 100.0,
            stop_loss: None,
            take_profit: None,
            detected_trend: TrendLabel::Sideways,
            predicted_trend: TrendLabel::Uptrend,
            strength: 0.5,
            confidence: 0.4,
            duration: 3,
            volume_trend: Some(VolumeTrend::Increasing),
            price_target: Some(105.0),
            price_target_lower: Some(99.75),
            price_target_upper: Some(110.25),
            fallback: false,
        }
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&SignalAction::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
        assert_eq!(SignalAction::StrongSell.to_string(), "STRONG_SELL");
        assert!(SignalAction::StrongBuy.is_buy());
        assert!(!SignalAction::Hold.is_buy() && !SignalAction::Hold.is_sell());
    }

    #[test]
    fn test_hold_serializes_null_levels() {
        let value = serde_json::to_value(hold()).unwrap();
        assert!(value["stop_loss"].is_null());
        assert!(value["take_profit"].is_null());
        assert_eq!(value["action"], "HOLD");
        assert_eq!(value["detected_trend"], "Sideways");
    }

    #[test]
    fn test_summary_omits_absent_levels() {
        let summary = hold().summary();
        assert!(summary.starts_with("Signal for AAPL: HOLD"));
        assert!(!summary.contains("Stop-loss"));
        assert!(summary.contains("Volume trend: Increasing"));
        assert!(summary.contains("Price target: 105.00 (99.75 - 110.25)"));
    }
}
