//! Trend signal CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, LogLevel, DEFAULT_CONFIG};
use std::path::{Path, PathBuf};
use trendsignal_config::{load_config, AppConfig};
use trendsignal_monitor::{setup_logging, WorkerGuard};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG);
        default.exists().then_some(default)
    });
    let config_path = config_path.as_deref();

    // Execute command
    match cli.command {
        Commands::Analyze(args) => {
            let (config, _guard) = init(config_path, cli.log_level, cli.json_logs)?;
            cli::commands::analyze::run(args, &config).await
        }
        Commands::Signal(args) => {
            let (config, _guard) = init(config_path, cli.log_level, cli.json_logs)?;
            cli::commands::signal::run(args, &config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(config_path).await,
    }
}

/// Load and validate configuration, then set up logging from it.
fn init(
    config_path: Option<&Path>,
    log_level: Option<LogLevel>,
    json_logs: bool,
) -> Result<(AppConfig, Option<WorkerGuard>)> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let level = log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = json_logs || config.logging.is_json();
    let guard = setup_logging(&level, json, config.logging.directory.as_deref().map(Path::new))
        .context("Failed to set up logging")?;

    Ok((config, guard))
}
