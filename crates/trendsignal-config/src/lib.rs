//! Configuration management.
//!
//! Settings come from an optional TOML file overlaid with `TRENDSIGNAL__*`
//! environment variables, e.g. `TRENDSIGNAL__SIGNAL__RISK_PROFILE=high`.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataSettings, ForecastSettings, LoggingConfig, SignalSettings,
};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "TRENDSIGNAL";

/// Load configuration from file and environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
