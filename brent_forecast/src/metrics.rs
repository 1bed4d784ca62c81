//! In-sample fit evaluation against observed prices

use crate::data::HistoricalRecord;
use crate::error::{ForecastError, Result};
use crate::models::ForecastRow;
use crate::utils::forecast_accuracy;
use std::collections::HashMap;

/// How well the model's in-sample fit tracks the observed history
#[derive(Debug, Clone, PartialEq)]
pub struct FitMetrics {
    /// Number of dates present in both history and forecast
    pub matched: usize,
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
    /// Share of observed prices inside the confidence band, in percent
    pub band_coverage: f64,
}

/// Compare forecast rows with observed prices on the dates both contain
pub fn fit_metrics(history: &[HistoricalRecord], forecast: &[ForecastRow]) -> Result<FitMetrics> {
    let by_date: HashMap<_, _> = forecast.iter().map(|row| (row.date, row)).collect();

    let pairs: Vec<(&ForecastRow, f64)> = history
        .iter()
        .filter_map(|record| by_date.get(&record.date).map(|row| (*row, record.price)))
        .collect();

    if pairs.is_empty() {
        return Err(ForecastError::DataError(
            "Forecast and history share no dates".to_string(),
        ));
    }

    let predicted: Vec<f64> = pairs.iter().map(|(row, _)| row.point_estimate).collect();
    let actual: Vec<f64> = pairs.iter().map(|(_, price)| *price).collect();
    let accuracy = forecast_accuracy(&predicted, &actual)?;

    let covered = pairs.iter().filter(|(row, price)| row.covers(*price)).count();

    Ok(FitMetrics {
        matched: pairs.len(),
        mae: accuracy.mae,
        rmse: accuracy.rmse,
        mape: accuracy.mape,
        band_coverage: covered as f64 / pairs.len() as f64 * 100.0,
    })
}
