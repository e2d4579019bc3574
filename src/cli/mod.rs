//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trendsignal_core::types::RiskProfile;

/// Configuration file used when `--config` is not given and it exists.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "trendsignal")]
#[command(author, version, about = "Technical trend classification and risk-calibrated trading signals")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the current trend and scan for divergences
    Analyze(AnalyzeArgs),
    /// Generate a trading signal per symbol
    Signal(SignalArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyze (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Data file or directory (CSV); defaults to the configured path
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct SignalArgs {
    /// Symbols to generate signals for (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Data file or directory (CSV); defaults to the configured path
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Risk profile (low, medium, high); overrides the configured profile
    #[arg(short, long)]
    pub risk: Option<RiskProfile>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_args() {
        let cli = Cli::try_parse_from([
            "trendsignal",
            "signal",
            "-S",
            "AAPL,MSFT",
            "--risk",
            "HIGH",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Signal(args) => {
                assert_eq!(args.symbols, vec!["AAPL", "MSFT"]);
                assert_eq!(args.risk, Some(RiskProfile::High));
                assert!(args.output == OutputFormat::Json);
            }
            _ => panic!("expected signal command"),
        }
    }

    #[test]
    fn test_symbols_required() {
        assert!(Cli::try_parse_from(["trendsignal", "analyze"]).is_err());
    }

    #[test]
    fn test_unknown_risk_rejected() {
        assert!(Cli::try_parse_from(["trendsignal", "signal", "-S", "AAPL", "--risk", "yolo"]).is_err());
    }
}
