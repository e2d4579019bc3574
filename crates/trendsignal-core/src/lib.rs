//! Core types and traits for the trend signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceSeries, IndicatorSeries)
//! - Trend classifications, divergence events and trading signals
//! - Collaborator traits for indicators, forecasters, price sources and
//!   error reporting

pub mod error;
pub mod traits;
pub mod types;

pub use error::{SignalError, SignalResult};
pub use traits::*;
pub use types::*;
