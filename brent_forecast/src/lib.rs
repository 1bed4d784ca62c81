//! # Brent Forecast
//!
//! Core of the Brent crude price dashboard: loading historical prices,
//! filtering them by date, and turning a pre-trained model's predictions into
//! historical-fit and future segments.
//!
//! ## Features
//!
//! - Delimited price files with configurable delimiter, columns and decimal separator
//! - Inclusive date-range filtering with a full-range fallback for bad selections
//! - Load-once caches for price tables and model artifacts
//! - Daily forecasts with confidence bands from serialized additive models
//! - Configurable history lookback when partitioning a forecast
//!
//! ## Quick Start
//!
//! ```no_run
//! use brent_forecast::data::{CsvFormat, DataLoader};
//! use brent_forecast::forecast::generate_forecast;
//! use brent_forecast::models::AdditiveModel;
//! use brent_forecast::partition::{partition, Lookback};
//! use std::path::Path;
//!
//! # fn main() -> brent_forecast::Result<()> {
//! let history = DataLoader::load_history("petroleo_hist.csv", &CsvFormat::default())?;
//! let view = history.filter_range(history.first_date(), history.last_date());
//! assert_eq!(view.len(), history.len());
//!
//! let model = AdditiveModel::load(Path::new("modelo_prophet.json"))?;
//! let rows = generate_forecast(&model, 30)?;
//! let split = partition(&rows, 30, Lookback::Days(365))?;
//! assert_eq!(split.future.len(), 30);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod data;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod partition;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{
    filter_range, CsvFormat, DataLoader, FilteredHistory, HistoricalRecord, HistoricalSeries,
    HistoryLoader,
};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::generate_forecast;
pub use crate::models::{AdditiveModel, ForecastModel, ForecastRow, ModelLoader};
pub use crate::partition::{partition, ForecastPartition, Lookback};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
