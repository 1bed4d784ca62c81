//! Dashboard configuration
//!
//! Values are layered: built-in defaults, then an optional file (any format
//! the `config` crate understands, usually TOML), then environment variables
//! such as `BRENT_DATA__DELIMITER=;` or `BRENT_FORECAST__LOOKBACK_DAYS=365`.

use crate::error::{DashboardError, Result};
use brent_forecast::{CsvFormat, Lookback};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "BRENT";

/// Where the historical prices live and how they are laid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    /// Single-character field delimiter
    pub delimiter: String,
    pub date_column: String,
    pub price_column: String,
    pub date_format: Option<String>,
    /// Single-character decimal separator
    pub decimal_separator: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("petroleo_hist.csv"),
            delimiter: ",".to_string(),
            date_column: "ds".to_string(),
            price_column: "y".to_string(),
            date_format: None,
            decimal_separator: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Serialized model artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("modelo_prophet.json"),
        }
    }
}

/// Horizon slider bounds and partition policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub min_horizon: usize,
    pub max_horizon: usize,
    pub default_horizon: usize,
    /// Days of in-sample fit shown before the forecast; unset shows all of it
    pub lookback_days: Option<usize>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_horizon: 1,
            max_horizon: 90,
            default_horizon: 30,
            lookback_days: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub forecast: ForecastConfig,
}

impl DashboardConfig {
    /// Build the layered configuration, reading `file` when given
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = file {
            if !path.exists() {
                return Err(DashboardError::ConfigError(format!(
                    "config file '{}' not found",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let delimiter = single_char(&self.data.delimiter, "data.delimiter")?;
        let decimal = single_char(&self.data.decimal_separator, "data.decimal_separator")?;
        if delimiter == decimal {
            return Err(DashboardError::ConfigError(format!(
                "data.decimal_separator must differ from data.delimiter ('{}')",
                delimiter
            )));
        }

        let f = &self.forecast;
        if f.min_horizon == 0 {
            return Err(DashboardError::ConfigError(
                "forecast.min_horizon must be at least 1".to_string(),
            ));
        }
        if f.min_horizon > f.max_horizon
            || f.default_horizon < f.min_horizon
            || f.default_horizon > f.max_horizon
        {
            return Err(DashboardError::ConfigError(format!(
                "forecast horizons must satisfy min <= default <= max (got {} / {} / {})",
                f.min_horizon, f.default_horizon, f.max_horizon
            )));
        }
        Ok(())
    }

    /// File layout for the history loader
    pub fn csv_format(&self) -> Result<CsvFormat> {
        let delimiter = single_char(&self.data.delimiter, "data.delimiter")?;
        if !delimiter.is_ascii() {
            return Err(DashboardError::ConfigError(
                "data.delimiter must be an ASCII character".to_string(),
            ));
        }

        let mut format = CsvFormat::default()
            .with_delimiter(delimiter as u8)
            .with_columns(&self.data.date_column, &self.data.price_column)
            .with_decimal_separator(single_char(
                &self.data.decimal_separator,
                "data.decimal_separator",
            )?);
        if let Some(date_format) = &self.data.date_format {
            format = format.with_date_format(date_format);
        }
        Ok(format)
    }

    pub fn lookback(&self) -> Lookback {
        Lookback::from_days(self.forecast.lookback_days)
    }

    /// Ensure `horizon` lies within the slider bounds
    pub fn check_horizon(&self, horizon: usize) -> Result<usize> {
        let (min, max) = (self.forecast.min_horizon, self.forecast.max_horizon);
        if horizon < min || horizon > max {
            return Err(DashboardError::HorizonOutOfBounds {
                value: horizon,
                min,
                max,
            });
        }
        Ok(horizon)
    }
}

fn single_char(value: &str, key: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DashboardError::ConfigError(format!(
            "{} must be a single character, got '{}'",
            key, value
        ))),
    }
}
