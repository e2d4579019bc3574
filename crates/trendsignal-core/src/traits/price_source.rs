//! Market data source trait.

use crate::error::DataError;
use crate::types::PriceSeries;
use async_trait::async_trait;

/// Trait for historical price sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Load the full bar history for a symbol, ordered oldest to newest.
    async fn load_series(&self, symbol: &str) -> Result<PriceSeries, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
