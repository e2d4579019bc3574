//! Configuration structures.

use serde::{Deserialize, Serialize};
use trendsignal_analysis::TrendConfig;
use trendsignal_core::error::SignalError;
use trendsignal_core::types::RiskProfile;
use trendsignal_indicators::IndicatorConfig;
use trendsignal_signals::SignalThresholds;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub signal: SignalSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

impl AppConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), SignalError> {
        self.logging.validate()?;
        self.indicators.validate()?;
        self.trend.validate()?;
        self.signal.validate()?;
        self.forecast.validate()?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trendsignal".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for the rolling log file; console only when unset
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    fn validate(&self) -> Result<(), SignalError> {
        if !self.is_json() && !self.format.eq_ignore_ascii_case("pretty") {
            return Err(SignalError::Config(format!(
                "Unknown log format: {} (expected pretty or json)",
                self.format
            )));
        }
        Ok(())
    }
}

/// Price data location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file or directory of `{SYMBOL}.csv` files
    pub path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: "data".to_string(),
        }
    }
}

/// Signal generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSettings {
    pub risk_profile: RiskProfile,
    /// Decimal places of stop-loss/take-profit levels
    pub price_precision: u32,
    pub thresholds: SignalThresholds,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            risk_profile: RiskProfile::Medium,
            price_precision: 2,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl SignalSettings {
    fn validate(&self) -> Result<(), SignalError> {
        if self.price_precision > 8 {
            return Err(SignalError::Config(
                "price_precision must be at most 8".into(),
            ));
        }
        self.thresholds.validate()
    }
}

/// Drift forecaster settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Closes used for the least-squares fit
    pub lookback: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self { lookback: 20 }
    }
}

impl ForecastSettings {
    fn validate(&self) -> Result<(), SignalError> {
        if self.lookback < 2 {
            return Err(SignalError::Config(
                "forecast lookback must be at least 2".into(),
            ));
        }
        Ok(())
    }
}
