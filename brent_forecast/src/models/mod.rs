//! Pre-trained forecasting models
//!
//! Models are fitted elsewhere and consumed here as read-only artifacts. A
//! model knows the span of history it was trained on and can predict a point
//! estimate with a confidence band for any calendar date.

use crate::cache::Memoized;
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

pub mod additive;

pub use additive::AdditiveModel;

/// Prediction for a single date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Point estimate
    pub point_estimate: f64,
    /// Lower bound of the confidence band
    pub lower_bound: f64,
    /// Upper bound of the confidence band
    pub upper_bound: f64,
}

impl ForecastRow {
    pub fn new(date: NaiveDate, point_estimate: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            date,
            point_estimate,
            lower_bound,
            upper_bound,
        }
    }

    /// Width of the confidence band
    pub fn band_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Whether `value` falls inside the confidence band
    pub fn covers(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}

/// A trained model able to extend its timeline and predict over it
pub trait ForecastModel: Debug {
    /// Name of the model
    fn name(&self) -> &str;

    /// First date of the training history
    fn history_start(&self) -> NaiveDate;

    /// Last date of the training history
    fn history_end(&self) -> NaiveDate;

    /// Every calendar day of the known history followed by `horizon_days` future days
    fn future_dates(&self, horizon_days: usize) -> Result<Vec<NaiveDate>> {
        let start = self.history_start();
        let count = timeline_len(start, self.history_end(), horizon_days)?;
        Ok(crate::utils::daily_dates(start, count))
    }

    /// Point estimate and band for every date in `dates`, in the same order
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>>;
}

/// Number of days from `start` through `end` plus `horizon_days`.
///
/// Fails when the last day would not be a representable date.
pub fn timeline_len(start: NaiveDate, end: NaiveDate, horizon_days: usize) -> Result<usize> {
    let out_of_range = || {
        ForecastError::InvalidParameter(format!(
            "A {} day horizon past {} runs beyond the last supported date",
            horizon_days, end
        ))
    };

    u64::try_from(horizon_days)
        .ok()
        .and_then(|days| end.checked_add_days(Days::new(days)))
        .ok_or_else(out_of_range)?;

    let known = (end - start).num_days().max(0) as usize + 1;
    known.checked_add(horizon_days).ok_or_else(out_of_range)
}

/// Memoized artifact loader: each model file is deserialized once per process
#[derive(Debug, Default)]
pub struct ModelLoader {
    cache: Memoized<AdditiveModel>,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<AdditiveModel>> {
        self.cache.get_or_load(path.as_ref(), AdditiveModel::load)
    }

    pub fn is_cached<P: AsRef<Path>>(&self, path: P) -> bool {
        self.cache.contains(path.as_ref())
    }
}
