//! Core traits for the signal engine and its collaborators.

mod forecaster;
mod indicator;
mod price_source;
mod reporter;

pub use forecaster::Forecaster;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use price_source::PriceSource;
pub use reporter::{ErrorReporter, NoopReporter};
