//! Error types for the dashboard crate

use brent_forecast::ForecastError;
use thiserror::Error;

/// Errors surfaced to the user by a dashboard view
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failure in loading, forecasting or partitioning
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Horizon outside the slider bounds
    #[error("Horizon of {value} days is outside {min}..={max}")]
    HorizonOutOfBounds { value: usize, min: usize, max: usize },

    /// Failure writing a report or export
    #[error("Output error: {0}")]
    OutputError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::ConfigError(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::OutputError(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::OutputError(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::OutputError(err.to_string())
    }
}
