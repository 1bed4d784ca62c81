//! # Brent Dashboard Workspace
//!
//! Umbrella crate for the Brent crude price dashboard.
//!
//! - [`forecast`]: price loading, date filtering, model artifacts, forecast partitioning
//! - [`dashboard`]: configuration, views, chart series and reports
//!
//! ## Example
//!
//! ```
//! use brent_dashboard_workspace::forecast::{filter_range, HistoricalRecord};
//! use chrono::NaiveDate;
//!
//! let records: Vec<HistoricalRecord> = (1..=10)
//!     .map(|d| HistoricalRecord::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), 80.0))
//!     .collect();
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! assert_eq!(filter_range(&records, start, end).len(), 3);
//! ```

pub use brent_dashboard as dashboard;
pub use brent_forecast as forecast;
