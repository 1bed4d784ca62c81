//! Additive trend + seasonality model loaded from a serialized artifact
//!
//! The artifact is a JSON document written by the training pipeline:
//!
//! ```json
//! {
//!   "name": "brent-daily",
//!   "history_start": "2020-01-01",
//!   "history_end": "2024-12-31",
//!   "trend": { "offset": 64.2, "slope": 0.004, "changepoints": [{ "date": "2022-03-01", "delta": -0.01 }] },
//!   "seasonalities": [{ "name": "yearly", "period_days": 365.25, "coefficients": [[1.2, -0.4]] }],
//!   "residual_std": 2.1,
//!   "trend_uncertainty": 0.05,
//!   "interval_width": 0.8
//! }
//! ```

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastRow};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

fn default_interval_width() -> f64 {
    0.8
}

/// Piecewise linear trend, in price units per day since the start of history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub offset: f64,
    pub slope: f64,
    #[serde(default)]
    pub changepoints: Vec<Changepoint>,
}

/// Slope change taking effect from `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Changepoint {
    pub date: NaiveDate,
    pub delta: f64,
}

/// Fourier series seasonal component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    pub period_days: f64,
    /// `[cos, sin]` coefficient pair for each Fourier order, starting at 1
    pub coefficients: Vec<[f64; 2]>,
}

impl Seasonality {
    fn value_at(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, [a, b])| {
                let angle = 2.0 * PI * (i as f64 + 1.0) * t / self.period_days;
                a * angle.cos() + b * angle.sin()
            })
            .sum()
    }
}

/// Trained additive model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveModel {
    pub name: String,
    pub history_start: NaiveDate,
    pub history_end: NaiveDate,
    pub trend: Trend,
    #[serde(default)]
    pub seasonalities: Vec<Seasonality>,
    /// Standard deviation of the in-sample residuals
    pub residual_std: f64,
    /// Growth of the standard deviation per day beyond the end of history
    #[serde(default)]
    pub trend_uncertainty: f64,
    /// Probability mass covered by the confidence band
    #[serde(default = "default_interval_width")]
    pub interval_width: f64,
}

impl AdditiveModel {
    /// Deserialize and validate a model artifact
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ForecastError::ModelUnavailable(format!(
                "model artifact '{}' not found",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            ForecastError::ModelUnavailable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let model = Self::from_json(&raw)?;

        info!(
            "Loaded model '{}' trained on {} to {}",
            model.name, model.history_start, model.history_end
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(raw)
            .map_err(|e| ForecastError::ModelUnavailable(format!("malformed artifact: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    /// Write the artifact as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| ForecastError::DataError(e.to_string()))?;
        fs::write(path, raw)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ForecastError::ModelUnavailable(msg));

        if self.history_start > self.history_end {
            return invalid(format!(
                "history_start {} is after history_end {}",
                self.history_start, self.history_end
            ));
        }
        if !self.residual_std.is_finite() || self.residual_std < 0.0 {
            return invalid("residual_std must be a non-negative number".to_string());
        }
        if !self.trend_uncertainty.is_finite() || self.trend_uncertainty < 0.0 {
            return invalid("trend_uncertainty must be a non-negative number".to_string());
        }
        if self.interval_width <= 0.0 || self.interval_width >= 1.0 {
            return invalid("interval_width must be between 0 and 1".to_string());
        }
        if let Some(s) = self.seasonalities.iter().find(|s| s.period_days <= 0.0) {
            return invalid(format!("seasonality '{}' has a non-positive period", s.name));
        }
        Ok(())
    }

    /// Two-sided normal quantile for the configured interval width
    fn z_score(&self) -> Result<f64> {
        let normal =
            Normal::new(0.0, 1.0).map_err(|e| ForecastError::ModelError(e.to_string()))?;
        Ok(normal.inverse_cdf((1.0 + self.interval_width) / 2.0))
    }

    fn days_since_start(&self, date: NaiveDate) -> f64 {
        (date - self.history_start).num_days() as f64
    }

    fn trend_at(&self, date: NaiveDate) -> f64 {
        let t = self.days_since_start(date);
        let bends: f64 = self
            .trend
            .changepoints
            .iter()
            .map(|cp| cp.delta * (t - self.days_since_start(cp.date)).max(0.0))
            .sum();
        self.trend.offset + self.trend.slope * t + bends
    }

    /// Point estimate for a single date
    pub fn point_at(&self, date: NaiveDate) -> f64 {
        let t = self.days_since_start(date);
        let seasonal: f64 = self.seasonalities.iter().map(|s| s.value_at(t)).sum();
        self.trend_at(date) + seasonal
    }
}

impl ForecastModel for AdditiveModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn history_start(&self) -> NaiveDate {
        self.history_start
    }

    fn history_end(&self) -> NaiveDate {
        self.history_end
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>> {
        let z = self.z_score()?;

        Ok(dates
            .iter()
            .map(|&date| {
                let point = self.point_at(date);
                let days_ahead = (date - self.history_end).num_days().max(0) as f64;
                let half_width = z * (self.residual_std + self.trend_uncertainty * days_ahead);
                ForecastRow::new(date, point, point - half_width, point + half_width)
            })
            .collect())
    }
}
