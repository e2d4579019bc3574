//! Risk calibration for trading signals.
//!
//! Maps a risk profile and an entry price to stop-loss and take-profit levels,
//! and a forecast to a price target band.

mod levels;

pub use levels::{LevelCalculator, PriceTarget, ProtectiveLevels, Side};
