//! Terminal tables and file exports

use crate::error::Result;
use brent_forecast::metrics::FitMetrics;
use brent_forecast::{ForecastPartition, ForecastRow, HistoricalRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PriceLine {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Price (US$)")]
    price: String,
}

#[derive(Tabled)]
struct ForecastLine {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Forecast")]
    point: String,
    #[tabled(rename = "Lower")]
    lower: String,
    #[tabled(rename = "Upper")]
    upper: String,
}

/// Row of the forecast CSV export
#[derive(Debug, Serialize)]
struct ExportRow {
    segment: &'static str,
    date: NaiveDate,
    point_estimate: f64,
    lower_bound: f64,
    upper_bound: f64,
}

pub fn price_table(records: &[HistoricalRecord]) -> String {
    let lines = records.iter().map(|r| PriceLine {
        date: r.date,
        price: format!("{:.2}", r.price),
    });
    Table::new(lines).with(Style::rounded()).to_string()
}

pub fn forecast_table(rows: &[ForecastRow]) -> String {
    let lines = rows.iter().map(|r| ForecastLine {
        date: r.date,
        point: format!("{:.2}", r.point_estimate),
        lower: format!("{:.2}", r.lower_bound),
        upper: format!("{:.2}", r.upper_bound),
    });
    Table::new(lines).with(Style::rounded()).to_string()
}

pub fn fit_summary(metrics: &FitMetrics) -> String {
    format!(
        "In-sample fit over {} observed days: MAE {:.3}, RMSE {:.3}, MAPE {:.2}%, band coverage {:.1}%",
        metrics.matched, metrics.mae, metrics.rmse, metrics.mape, metrics.band_coverage
    )
}

/// Write every row of a partition, tagged `history` or `future`
pub fn write_forecast_csv(path: &Path, partition: &ForecastPartition) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;

    let tagged = partition
        .history
        .iter()
        .map(|r| ("history", r))
        .chain(partition.future.iter().map(|r| ("future", r)));

    let mut written = 0;
    for (segment, row) in tagged {
        writer.serialize(ExportRow {
            segment,
            date: row.date,
            point_estimate: row.point_estimate,
            lower_bound: row.lower_bound,
            upper_bound: row.upper_bound,
        })?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Write price history in the `ds,y` layout the loader reads by default
pub fn write_history_csv(path: &Path, records: &[HistoricalRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["ds", "y"])?;
    for record in records {
        writer.write_record([record.date.to_string(), format!("{:.4}", record.price)])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
