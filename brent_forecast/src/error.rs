//! Error types for the brent_forecast crate

use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading prices, filtering them or producing forecasts
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The historical price file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A date or price field (or the file layout) could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A date selection that is unordered, incomplete or outside the data bounds
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The model artifact is missing or could not be deserialized
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// A model produced output that breaks the forecast contract
    #[error("Model error: {0}")]
    ModelError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ForecastError::IoError(io),
            other => ForecastError::ParseError(format!("{:?}", other)),
        }
    }
}

impl From<chrono::ParseError> for ForecastError {
    fn from(err: chrono::ParseError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for ForecastError {
    fn from(err: std::num::ParseFloatError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}

impl From<Arc<ForecastError>> for ForecastError {
    /// Recover an error handed back by a shared cache initializer
    fn from(shared: Arc<ForecastError>) -> Self {
        Arc::try_unwrap(shared).unwrap_or_else(|shared| match shared.as_ref() {
            ForecastError::FileNotFound(msg) => ForecastError::FileNotFound(msg.clone()),
            ForecastError::ParseError(msg) => ForecastError::ParseError(msg.clone()),
            ForecastError::InvalidRange(msg) => ForecastError::InvalidRange(msg.clone()),
            ForecastError::ModelUnavailable(msg) => ForecastError::ModelUnavailable(msg.clone()),
            ForecastError::ModelError(msg) => ForecastError::ModelError(msg.clone()),
            ForecastError::InvalidParameter(msg) => ForecastError::InvalidParameter(msg.clone()),
            ForecastError::DataError(msg) => ForecastError::DataError(msg.clone()),
            ForecastError::IoError(err) => {
                ForecastError::IoError(std::io::Error::new(err.kind(), err.to_string()))
            }
        })
    }
}

impl ForecastError {
    /// Whether the error ends the current view (everything except a range fallback)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ForecastError::InvalidRange(_))
    }
}
