//! Indicator trait definitions.

use crate::error::DataError;

/// Trait for single-output technical indicators.
///
/// Output is aligned 1:1 with the input: position `i` of the result belongs
/// to `data[i]`. Positions inside the warm-up window are `None` rather than
/// a fabricated number.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>>;

    /// Minimum data points required to produce one defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), DataError> {
        if data.len() < self.period() {
            return Err(DataError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g., MACD).
///
/// Some indicators produce multiple related values per position.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data, aligned 1:1.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), DataError> {
        if data.len() < self.period() {
            return Err(DataError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}
