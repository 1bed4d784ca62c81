//! # Brent Dashboard
//!
//! Views over [`brent_forecast`]: a historical price view with a date-range
//! filter and a forecast view with a horizon slider, each producing chart
//! series for an external renderer.
//!
//! ## Usage Example
//!
//! ```no_run
//! use brent_dashboard::{Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::load(None).unwrap();
//! let dashboard = Dashboard::new(config).unwrap();
//!
//! // Whole table
//! let view = dashboard.history_view(&[]).unwrap();
//! println!("{} prices", view.filtered.len());
//!
//! // 30 day forecast with the configured lookback
//! let forecast = dashboard.forecast_view(Some(30), None).unwrap();
//! println!("{} future rows", forecast.partition.future.len());
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod report;
pub mod session;

pub use chart::{build_series, history_chart, BandSeries, ForecastChart, PriceChart};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use session::{Dashboard, ForecastView, HistoryView};
