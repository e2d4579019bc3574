//! Analyze command implementation.

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Serialize;
use tracing::info;
use trendsignal_config::AppConfig;
use trendsignal_core::types::{DivergenceReport, TrendClassification};

use super::{for_each_symbol, Pipeline};
use crate::cli::{AnalyzeArgs, OutputFormat};

/// Trend and divergence analysis of one symbol.
#[derive(Debug, Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub bars: usize,
    pub classification: TrendClassification,
    pub divergences: Vec<DivergenceReport>,
}

impl SymbolAnalysis {
    pub fn summary(&self) -> String {
        let c = &self.classification;
        let date = DateTime::from_timestamp_millis(c.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| c.timestamp.to_string());

        let mut out = format!("{} ({} bars, latest {})\n", self.symbol, self.bars, date);
        out.push_str(&format!(
            "  Trend: {} (strength {:.2}, duration {} bars, volume {})\n",
            c.label, c.strength, c.duration, c.volume_trend
        ));
        for vote in &c.votes {
            out.push_str(&format!("    {:?} vote: {:+}\n", vote.source, vote.direction.as_i8()));
        }
        for report in &self.divergences {
            let bias = report
                .bias()
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "none".to_string());
            out.push_str(&format!(
                "  Divergence vs {}: {} bullish, {} bearish (bias {})\n",
                report.indicator,
                report.bullish().count(),
                report.bearish().count(),
                bias
            ));
        }
        out
    }
}

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    info!("Analyzing {} symbols", args.symbols.len());
    let pipeline = Pipeline::from_config(config, args.data.as_deref())?;

    let results = for_each_symbol(&args.symbols, |symbol| {
        let pipeline = pipeline.clone();
        async move { analyze_symbol(&pipeline, symbol).await }
    })
    .await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results.values)?),
        OutputFormat::Text => {
            for analysis in &results.values {
                println!("{}", analysis.summary());
            }
        }
    }

    results.finish()
}

async fn analyze_symbol(pipeline: &Pipeline, symbol: String) -> Result<SymbolAnalysis> {
    let series = pipeline
        .source
        .load_series(&symbol)
        .await
        .with_context(|| format!("Failed to load data for {}", symbol))?;
    let set = pipeline
        .engine
        .compute(&series)
        .with_context(|| format!("Failed to compute indicators for {}", symbol))?;

    Ok(SymbolAnalysis {
        bars: series.len(),
        classification: pipeline.classifier.classify(&set),
        divergences: pipeline.detector.detect_indicators(&series, &set),
        symbol,
    })
}
