//! Chart series for an external renderer
//!
//! Nothing here changes a value: series are column selections from a
//! filtered history or a forecast partition, paired with labels and colors.

use brent_forecast::{FilteredHistory, ForecastPartition, ForecastRow};
use chrono::NaiveDate;
use serde::Serialize;

pub const HISTORY_LINE_COLOR: &str = "blue";
pub const HISTORY_BAND_COLOR: &str = "lightblue";
pub const FUTURE_LINE_COLOR: &str = "red";
pub const FUTURE_BAND_COLOR: &str = "pink";
pub const PRICE_LINE_COLOR: &str = "steelblue";

/// Point estimate with a shaded band, all on one date axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSeries {
    pub label: String,
    pub line_color: String,
    pub band_color: String,
    pub dates: Vec<NaiveDate>,
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BandSeries {
    fn from_rows(label: &str, line_color: &str, band_color: &str, rows: &[ForecastRow]) -> Self {
        Self {
            label: label.to_string(),
            line_color: line_color.to_string(),
            band_color: band_color.to_string(),
            dates: rows.iter().map(|r| r.date).collect(),
            point: rows.iter().map(|r| r.point_estimate).collect(),
            lower: rows.iter().map(|r| r.lower_bound).collect(),
            upper: rows.iter().map(|r| r.upper_bound).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Two-tone forecast chart: in-sample fit followed by the projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub history: BandSeries,
    pub future: BandSeries,
}

/// Single price line for the historical view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: String,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

pub fn build_series(partition: &ForecastPartition) -> ForecastChart {
    ForecastChart {
        title: "Brent Price Forecast (History vs. Future)".to_string(),
        x_label: "Date".to_string(),
        y_label: "Forecast Price (US$)".to_string(),
        history: BandSeries::from_rows(
            "History (model fit)",
            HISTORY_LINE_COLOR,
            HISTORY_BAND_COLOR,
            &partition.history,
        ),
        future: BandSeries::from_rows(
            "Forecast",
            FUTURE_LINE_COLOR,
            FUTURE_BAND_COLOR,
            &partition.future,
        ),
    }
}

pub fn history_chart(view: &FilteredHistory) -> PriceChart {
    PriceChart {
        title: format!("Brent Price History ({} to {})", view.start, view.end),
        x_label: "Date".to_string(),
        y_label: "Price (US$)".to_string(),
        color: PRICE_LINE_COLOR.to_string(),
        dates: view.records.iter().map(|r| r.date).collect(),
        prices: view.records.iter().map(|r| r.price).collect(),
    }
}
