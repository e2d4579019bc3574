//! Risk tiers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named risk-tolerance bucket controlling stop-loss/take-profit distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskProfile {
    /// Stop-loss distance as a fraction of price.
    pub fn stop_loss_pct(&self) -> Decimal {
        match self {
            RiskProfile::Low => dec!(0.02),
            RiskProfile::Medium => dec!(0.05),
            RiskProfile::High => dec!(0.10),
        }
    }

    /// Take-profit distance as a fraction of price.
    pub fn take_profit_pct(&self) -> Decimal {
        match self {
            RiskProfile::Low => dec!(0.03),
            RiskProfile::Medium => dec!(0.08),
            RiskProfile::High => dec!(0.15),
        }
    }

    /// All tiers, least to most aggressive.
    pub fn all() -> &'static [RiskProfile] {
        &[RiskProfile::Low, RiskProfile::Medium, RiskProfile::High]
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Low => "low",
            RiskProfile::Medium => "medium",
            RiskProfile::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "medium" => Ok(RiskProfile::Medium),
            "high" => Ok(RiskProfile::High),
            _ => Err(format!("Unknown risk profile: {} (expected low, medium or high)", s)),
        }
    }
}
