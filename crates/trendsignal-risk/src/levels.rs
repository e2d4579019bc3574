//! Stop-loss and take-profit levels.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use trendsignal_core::types::{RiskProfile, SignalAction, TrendLabel};

/// Exposure implied by a trading action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// `None` for HOLD.
    pub fn for_action(action: SignalAction) -> Option<Self> {
        if action.is_buy() {
            Some(Side::Long)
        } else if action.is_sell() {
            Some(Side::Short)
        } else {
            None
        }
    }
}

/// Protective exit levels for a position opened at `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectiveLevels {
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
}

impl ProtectiveLevels {
    pub fn stop_loss_f64(&self) -> Option<f64> {
        self.stop_loss.to_f64()
    }

    pub fn take_profit_f64(&self) -> Option<f64> {
        self.take_profit.to_f64()
    }
}

/// Forecast price band around the latest close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTarget {
    pub target: Decimal,
    pub lower: Decimal,
    pub upper: Decimal,
}

impl PriceTarget {
    /// `(target, lower, upper)` as floats.
    pub fn to_f64(&self) -> Option<(f64, f64, f64)> {
        Some((self.target.to_f64()?, self.lower.to_f64()?, self.upper.to_f64()?))
    }
}

/// Target multipliers for an Uptrend/Downtrend forecast.
const TARGET_UP: Decimal = Decimal::from_parts(105, 0, 0, false, 2);
const TARGET_DOWN: Decimal = Decimal::from_parts(95, 0, 0, false, 2);
/// Band half-width relative to the target.
const TARGET_BAND: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Calculates stop-loss/take-profit levels from a risk profile.
#[derive(Debug, Clone)]
pub struct LevelCalculator {
    profile: RiskProfile,
    precision: u32,
}

impl Default for LevelCalculator {
    fn default() -> Self {
        Self::new(RiskProfile::default(), 2)
    }
}

impl LevelCalculator {
    /// `precision` is the number of decimal places levels are rounded to.
    pub fn new(profile: RiskProfile, precision: u32) -> Self {
        Self { profile, precision }
    }

    pub fn profile(&self) -> RiskProfile {
        self.profile
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Levels for an entry at `price` on `side`.
    ///
    /// Long: stop below, target above. Short: stop above, target below.
    /// `None` when a level falls outside the decimal range.
    pub fn calculate(&self, price: Decimal, side: Side) -> Option<ProtectiveLevels> {
        let stop_offset = price.checked_mul(self.profile.stop_loss_pct())?;
        let take_offset = price.checked_mul(self.profile.take_profit_pct())?;

        let (stop_loss, take_profit) = match side {
            Side::Long => (
                price.checked_sub(stop_offset)?,
                price.checked_add(take_offset)?,
            ),
            Side::Short => (
                price.checked_add(stop_offset)?,
                price.checked_sub(take_offset)?,
            ),
        };

        Some(ProtectiveLevels {
            stop_loss: stop_loss.round_dp(self.precision),
            take_profit: take_profit.round_dp(self.precision),
        })
    }

    /// Levels for a signal action at a float price.
    ///
    /// `None` for HOLD, for prices that have no decimal representation
    /// (NaN, infinities), and for levels that overflow.
    pub fn for_action(&self, price: f64, action: SignalAction) -> Option<ProtectiveLevels> {
        let side = Side::for_action(action)?;
        let price = Decimal::from_f64(price)?;
        self.calculate(price, side)
    }

    /// Price band implied by a forecast.
    ///
    /// Uptrend moves the target 5% above `price`, Downtrend 5% below, and
    /// anything else keeps it at `price`. The band spans 5% either side of
    /// the target.
    pub fn price_target(&self, price: Decimal, predicted: TrendLabel) -> Option<PriceTarget> {
        let target = match predicted {
            TrendLabel::Uptrend => price.checked_mul(TARGET_UP)?,
            TrendLabel::Downtrend => price.checked_mul(TARGET_DOWN)?,
            TrendLabel::Sideways | TrendLabel::Unknown => price,
        };
        let half_width = target.checked_mul(TARGET_BAND)?;

        Some(PriceTarget {
            target: target.round_dp(self.precision),
            lower: target.checked_sub(half_width)?.round_dp(self.precision),
            upper: target.checked_add(half_width)?.round_dp(self.precision),
        })
    }

    /// [`price_target`](Self::price_target) at a float price.
    pub fn price_target_f64(&self, price: f64, predicted: TrendLabel) -> Option<PriceTarget> {
        self.price_target(Decimal::from_f64(price)?, predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_long_levels() {
        let calc = LevelCalculator::new(RiskProfile::Medium, 2);
        let levels = calc.calculate(dec!(100), Side::Long).unwrap();
        assert_eq!(levels.stop_loss, dec!(95));
        assert_eq!(levels.take_profit, dec!(108));
    }

    #[test]
    fn test_short_levels() {
        let calc = LevelCalculator::new(RiskProfile::Medium, 2);
        let levels = calc.calculate(dec!(100), Side::Short).unwrap();
        assert_eq!(levels.stop_loss, dec!(105));
        assert_eq!(levels.take_profit, dec!(92));
    }

    #[test]
    fn test_rounding() {
        let calc = LevelCalculator::new(RiskProfile::Low, 2);
        let levels = calc.calculate(dec!(123.457), Side::Long).unwrap();
        // 123.457 * 0.98 = 120.98786, 123.457 * 1.03 = 127.16071
        assert_eq!(levels.stop_loss, dec!(120.99));
        assert_eq!(levels.take_profit, dec!(127.16));
    }

    #[test]
    fn test_hold_has_no_levels() {
        let calc = LevelCalculator::default();
        assert!(calc.for_action(100.0, SignalAction::Hold).is_none());
        assert!(calc.for_action(f64::NAN, SignalAction::Buy).is_none());

        let levels = calc.for_action(100.0, SignalAction::StrongSell).unwrap();
        assert_eq!(levels.stop_loss_f64(), Some(105.0));
        assert_eq!(levels.take_profit_f64(), Some(92.0));
    }

    #[test]
    fn test_distances_increase_with_risk() {
        let price = dec!(250);
        for side in [Side::Long, Side::Short] {
            let distances: Vec<(Decimal, Decimal)> = RiskProfile::all()
                .iter()
                .map(|&profile| {
                    let levels = LevelCalculator::new(profile, 2).calculate(price, side).unwrap();
                    (
                        (levels.stop_loss - price).abs(),
                        (levels.take_profit - price).abs(),
                    )
                })
                .collect();

            for pair in distances.windows(2) {
                assert!(pair[0].0 < pair[1].0, "{:?}", side);
                assert!(pair[0].1 < pair[1].1, "{:?}", side);
            }
        }
    }

    #[test]
    fn test_levels_near_decimal_limit() {
        let calc = LevelCalculator::new(RiskProfile::High, 2);
        let price = Decimal::from_f64(7.5e28).unwrap();

        assert!(calc.calculate(price, Side::Long).is_none());
        assert!(calc.calculate(Decimal::MAX, Side::Short).is_none());
        assert!(calc.for_action(7.5e28, SignalAction::StrongBuy).is_none());
        assert!(calc.for_action(7.5e28, SignalAction::Sell).is_none());

        // Low risk offsets still fit below the limit
        let low = LevelCalculator::new(RiskProfile::Low, 2);
        assert!(low.for_action(7.5e28, SignalAction::Buy).is_some());
        assert!(low.for_action(7.5e28, SignalAction::Sell).is_some());
    }

    #[test]
    fn test_price_target_follows_forecast() {
        let calc = LevelCalculator::new(RiskProfile::Medium, 2);

        let up = calc.price_target(dec!(100), TrendLabel::Uptrend).unwrap();
        assert_eq!(up.target, dec!(105));
        assert_eq!(up.lower, dec!(99.75));
        assert_eq!(up.upper, dec!(110.25));

        let down = calc.price_target(dec!(100), TrendLabel::Downtrend).unwrap();
        assert_eq!(down.target, dec!(95));
        assert_eq!(down.lower, dec!(90.25));
        assert_eq!(down.upper, dec!(99.75));

        for label in [TrendLabel::Sideways, TrendLabel::Unknown] {
            let flat = calc.price_target(dec!(100), label).unwrap();
            assert_eq!(flat.target, dec!(100));
            assert_eq!(flat.lower, dec!(95));
            assert_eq!(flat.upper, dec!(105));
        }
    }

    #[test]
    fn test_price_target_rounding_and_limits() {
        let calc = LevelCalculator::new(RiskProfile::Low, 2);
        // 33.333 * 1.05 = 34.99965
        let target = calc.price_target(dec!(33.333), TrendLabel::Uptrend).unwrap();
        assert_eq!(target.target, dec!(35.00));

        assert!(calc.price_target_f64(f64::NAN, TrendLabel::Uptrend).is_none());
        assert!(calc.price_target(Decimal::MAX, TrendLabel::Sideways).is_none());
        assert_eq!(
            calc.price_target_f64(100.0, TrendLabel::Uptrend).unwrap().to_f64(),
            Some((105.0, 99.75, 110.25))
        );
    }
}
