//! Price data sources.

mod csv_source;

pub use csv_source::{parse_series, CsvDataSource};
