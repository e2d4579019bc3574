//! Signal command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use trendsignal_config::AppConfig;
use trendsignal_core::types::TradingSignal;
use trendsignal_monitor::TracingReporter;
use trendsignal_signals::{LinearTrendForecaster, SignalGenerator};

use super::{for_each_symbol, Pipeline};
use crate::cli::{OutputFormat, SignalArgs};

pub async fn run(args: SignalArgs, config: &AppConfig) -> Result<()> {
    let settings = &config.signal;
    let risk = args.risk.unwrap_or(settings.risk_profile);
    info!("Generating signals for {} symbols (risk {})", args.symbols.len(), risk);

    let pipeline = Pipeline::from_config(config, args.data.as_deref())?;
    let reporter = Arc::new(TracingReporter::new());
    let generator = SignalGenerator::new(risk, settings.price_precision)
        .with_thresholds(settings.thresholds.clone())
        .with_reporter(reporter.clone());
    let forecaster = LinearTrendForecaster::new(config.forecast.lookback);

    let results = for_each_symbol(&args.symbols, |symbol| {
        let pipeline = pipeline.clone();
        let generator = generator.clone();
        let forecaster = forecaster.clone();
        async move { signal_for(&pipeline, &generator, &forecaster, symbol).await }
    })
    .await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results.values)?),
        OutputFormat::Text => {
            for signal in &results.values {
                println!("{}", signal.summary());
            }
        }
    }

    if reporter.count() > 0 {
        warn!("{} signals fell back to HOLD", reporter.count());
    }

    results.finish()
}

async fn signal_for(
    pipeline: &Pipeline,
    generator: &SignalGenerator,
    forecaster: &LinearTrendForecaster,
    symbol: String,
) -> Result<TradingSignal> {
    let series = pipeline
        .source
        .load_series(&symbol)
        .await
        .with_context(|| format!("Failed to load data for {}", symbol))?;

    Ok(generator.generate_for_series(
        &series,
        &pipeline.engine,
        &pipeline.classifier,
        forecaster,
    ))
}
