//! Splitting a forecast into its historical-fit and future segments

use crate::error::{ForecastError, Result};
use crate::models::ForecastRow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How much of the in-sample fit to keep in front of the future segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookback {
    /// Every row before the future segment
    #[default]
    All,
    /// Only the given number of rows immediately before the future segment
    Days(usize),
}

impl Lookback {
    /// `None` means unrestricted
    pub fn from_days(days: Option<usize>) -> Self {
        days.map_or(Lookback::All, Lookback::Days)
    }
}

/// Forecast rows split at the start of the forecast horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPartition {
    /// In-sample fit preceding the horizon
    pub history: Vec<ForecastRow>,
    /// The last `horizon_days` rows
    pub future: Vec<ForecastRow>,
    /// First date of the future segment
    pub forecast_start: NaiveDate,
}

impl ForecastPartition {
    pub fn horizon_days(&self) -> usize {
        self.future.len()
    }

    /// History followed by future, in date order
    pub fn rows(&self) -> impl Iterator<Item = &ForecastRow> {
        self.history.iter().chain(self.future.iter())
    }
}

/// Split `rows` so that the last `horizon_days` form the future segment.
///
/// With [`Lookback::Days`], history keeps only that many rows directly
/// preceding the future segment.
pub fn partition(
    rows: &[ForecastRow],
    horizon_days: usize,
    lookback: Lookback,
) -> Result<ForecastPartition> {
    if horizon_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be at least one day".to_string(),
        ));
    }
    if rows.len() < horizon_days {
        return Err(ForecastError::InvalidParameter(format!(
            "Cannot take a {}-day horizon from {} forecast rows",
            horizon_days,
            rows.len()
        )));
    }

    let split = rows.len() - horizon_days;
    let history_from = match lookback {
        Lookback::All => 0,
        Lookback::Days(days) => split.saturating_sub(days),
    };

    Ok(ForecastPartition {
        history: rows[history_from..split].to_vec(),
        future: rows[split..].to_vec(),
        forecast_start: rows[split].date,
    })
}
