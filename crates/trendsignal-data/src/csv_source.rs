//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use trendsignal_core::error::DataError;
use trendsignal_core::traits::PriceSource;
use trendsignal_core::types::{Bar, PriceSeries};

const DATE_COLUMNS: &[&str] = &["Date", "date", "timestamp", "Timestamp"];
const CLOSE_COLUMNS: &[&str] = &["Close", "close", "Adj Close"];
const VOLUME_COLUMNS: &[&str] = &["Volume", "volume"];

/// CSV record format. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open", default)]
    open: Option<f64>,
    #[serde(alias = "High", alias = "high", default)]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "low", default)]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: Option<f64>,
}

impl CsvRecord {
    /// Missing close/volume become NaN so the indicator engine can report
    /// the exact bar.
    fn into_bar(self, timestamp: i64) -> Bar {
        let close = self.close.or(self.adj_close).unwrap_or(f64::NAN);
        Bar::new(
            timestamp,
            self.open.unwrap_or(close),
            self.high.unwrap_or(close),
            self.low.unwrap_or(close),
            close,
            self.volume.unwrap_or(f64::NAN),
        )
    }
}

/// CSV data source for historical data.
///
/// Points either at a single file, used for every symbol, or at a directory
/// holding one `{SYMBOL}.csv` (or `{SYMBOL}_daily.csv`) per symbol.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// File holding `symbol`'s bars.
    pub fn resolve(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let upper = symbol.to_uppercase();
        let lower = symbol.to_lowercase();
        [
            format!("{}.csv", upper),
            format!("{}.csv", lower),
            format!("{}_daily.csv", upper),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.path.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    /// Load `symbol` synchronously.
    pub fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.resolve(symbol)?;
        let file = std::fs::File::open(&path).map_err(|e| DataError::ParseError(e.to_string()))?;
        parse_series(symbol, file)
    }
}

#[async_trait]
impl PriceSource for CsvDataSource {
    async fn load_series(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.resolve(symbol)?;
        debug!("Loading {} from {:?}", symbol, path);
        let contents = tokio::fs::read(&path)
            .await
            .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;
        parse_series(symbol, contents.as_slice())
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse OHLCV rows into a validated, timestamp-ordered series.
pub fn parse_series(symbol: &str, reader: impl Read) -> Result<PriceSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::ParseError(e.to_string()))?
        .clone();
    for (column, aliases) in [
        ("date", DATE_COLUMNS),
        ("close", CLOSE_COLUMNS),
        ("volume", VOLUME_COLUMNS),
    ] {
        if !headers.iter().any(|h| aliases.contains(&h)) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }

    let mut bars = Vec::new();
    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let timestamp = parse_timestamp(&record.date)?;
        bars.push(record.into_bar(timestamp));
    }

    // Sort by timestamp
    bars.sort_by_key(|b| b.timestamp);

    debug!("Parsed {} bars for {}", bars.len(), symbol);
    PriceSeries::new(symbol, bars)
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return ts.checked_mul(1000).ok_or_else(|| {
            DataError::ParseError(format!("Timestamp out of range: {}", date_str))
        });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
