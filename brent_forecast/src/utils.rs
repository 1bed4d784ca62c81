//! Utility functions for the brent_forecast crate

use crate::data::{HistoricalRecord, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::models::additive::{AdditiveModel, Seasonality, Trend};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// `count` consecutive calendar days starting at `start`
pub fn daily_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    std::iter::successors(Some(start), |day| day.succ_opt())
        .take(count)
        .collect()
}

/// The `horizon` calendar days following `last`
pub fn future_dates(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    match last.checked_add_days(Days::new(1)) {
        Some(first) => daily_dates(first, horizon),
        None => Vec::new(),
    }
}

/// Whether `dates` advance by exactly one calendar day at every step
pub fn is_daily(dates: &[NaiveDate]) -> bool {
    dates
        .windows(2)
        .all(|w| w[0].succ_opt() == Some(w[1]))
}

/// Calculate accuracy metrics for predicted vs actual values
pub fn forecast_accuracy(predicted: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = predicted.len() as f64;
    let errors: Vec<f64> = predicted
        .iter()
        .zip(actual.iter())
        .map(|(&p, &a)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;

    let pct_errors: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e / a).abs() * 100.0)
        .collect();
    let mape = if pct_errors.is_empty() {
        0.0
    } else {
        pct_errors.iter().sum::<f64>() / pct_errors.len() as f64
    };

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
    })
}

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error over non-zero actuals
    pub mape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        Ok(())
    }
}

/// Generate a deterministic synthetic daily price history
///
/// Prices follow a random walk with a mild yearly cycle and never drop below
/// one dollar.
///
/// # Arguments
/// * `start` - First date of the history
/// * `days` - Number of daily observations
/// * `base_price` - Starting price
/// * `volatility` - Standard deviation of the daily change
/// * `seed` - Random seed
pub fn generate_sample_history(
    start: NaiveDate,
    days: usize,
    base_price: f64,
    volatility: f64,
    seed: u64,
) -> Result<HistoricalSeries> {
    let noise = Normal::new(0.0, volatility)
        .map_err(|e| ForecastError::InvalidParameter(format!("volatility: {}", e)))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut price = base_price;
    let records = daily_dates(start, days)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let cycle = (2.0 * std::f64::consts::PI * i as f64 / 365.25).sin() * 0.05;
            price = (price + cycle + noise.sample(&mut rng)).max(1.0);
            HistoricalRecord::new(date, price)
        })
        .collect();

    HistoricalSeries::new(records)
}

/// Build a simple straight-line artifact matching a history, for demos
pub fn demo_model(name: &str, history: &HistoricalSeries) -> AdditiveModel {
    let (start, end) = history.bounds();
    let span = (end - start).num_days().max(1) as f64;
    let records = history.records();
    let offset = records[0].price;
    let slope = (records[records.len() - 1].price - offset) / span;

    let residuals: Vec<f64> = records
        .iter()
        .map(|r| r.price - (offset + slope * (r.date - start).num_days() as f64))
        .collect();
    let residual_std =
        (residuals.iter().map(|r| r.powi(2)).sum::<f64>() / residuals.len() as f64).sqrt();

    AdditiveModel {
        name: name.to_string(),
        history_start: start,
        history_end: end,
        trend: Trend {
            offset,
            slope,
            changepoints: Vec::new(),
        },
        seasonalities: vec![Seasonality {
            name: "yearly".to_string(),
            period_days: 365.25,
            coefficients: vec![[0.0, 0.5]],
        }],
        residual_std,
        trend_uncertainty: residual_std * 0.02,
        interval_width: 0.8,
    }
}
