//! CLI command implementations.

pub mod analyze;
pub mod signal;
pub mod validate;

use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};
use trendsignal_analysis::{DivergenceDetector, TrendClassifier};
use trendsignal_config::AppConfig;
use trendsignal_core::traits::PriceSource;
use trendsignal_data::CsvDataSource;
use trendsignal_indicators::IndicatorEngine;

/// Components shared by every per-symbol task.
#[derive(Clone)]
pub struct Pipeline {
    pub source: Arc<dyn PriceSource>,
    pub engine: IndicatorEngine,
    pub classifier: TrendClassifier,
    pub detector: DivergenceDetector,
}

impl Pipeline {
    pub fn from_config(config: &AppConfig, data: Option<&Path>) -> Result<Self> {
        let data = data
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&config.data.path));
        let source = CsvDataSource::new(&data).with_context(|| {
            format!(
                "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
                data.display()
            )
        })?;

        Ok(Self {
            source: Arc::new(source),
            engine: IndicatorEngine::new(config.indicators.clone()),
            classifier: TrendClassifier::new(config.trend.clone()),
            detector: DivergenceDetector::new(),
        })
    }
}

/// Results of a fan-out over symbols.
pub struct SymbolResults<T> {
    /// Successful results in input order
    pub values: Vec<T>,
    pub failures: usize,
}

impl<T> SymbolResults<T> {
    /// Fail the command if any symbol failed.
    pub fn finish(self) -> Result<()> {
        if self.failures > 0 {
            anyhow::bail!(
                "{} of {} symbols failed",
                self.failures,
                self.failures + self.values.len()
            );
        }
        Ok(())
    }
}

/// Run `task` for every symbol on its own tokio task.
///
/// Failed symbols are logged and counted; the rest come back in input order.
pub async fn for_each_symbol<T, F, Fut>(symbols: &[String], task: F) -> Result<SymbolResults<T>>
where
    T: Send + 'static,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for (index, symbol) in symbols.iter().enumerate() {
        let fut = task(symbol.clone());
        let symbol = symbol.clone();
        set.spawn(async move { (index, symbol, fut.await) });
    }

    let mut results = Vec::with_capacity(symbols.len());
    let mut failures = 0;
    while let Some(joined) = set.join_next().await {
        let (index, symbol, result) = joined.context("Symbol task panicked")?;
        match result {
            Ok(value) => results.push((index, value)),
            Err(e) => {
                error!("{}: {:#}", symbol, e);
                failures += 1;
            }
        }
    }

    results.sort_by_key(|(index, _)| *index);
    info!("Processed {} symbols, {} failed", results.len(), failures);
    Ok(SymbolResults {
        values: results.into_iter().map(|(_, value)| value).collect(),
        failures,
    })
}
