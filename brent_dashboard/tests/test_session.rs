use brent_dashboard::config::DashboardConfig;
use brent_dashboard::report::{forecast_table, price_table, write_forecast_csv};
use brent_dashboard::{Dashboard, DashboardError};
use brent_forecast::utils::demo_model;
use brent_forecast::{ForecastError, HistoricalSeries, Lookback};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// Semicolon file of the last ten days of 2024 plus a matching model artifact
fn create_workspace() -> (TempDir, DashboardConfig) {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("brent.csv");
    let model_path = dir.path().join("model.json");

    let mut file = fs::File::create(&data_path).unwrap();
    writeln!(file, "date;price").unwrap();
    for day in 22..=31 {
        writeln!(file, "2024-12-{};{},5", day, 70 + day - 22).unwrap();
    }

    let history = HistoricalSeries::new(
        (22..=31)
            .map(|d| {
                brent_forecast::HistoricalRecord::new(
                    NaiveDate::from_ymd_opt(2024, 12, d).unwrap(),
                    70.5 + (d - 22) as f64,
                )
            })
            .collect(),
    )
    .unwrap();
    demo_model("session", &history).save(&model_path).unwrap();

    let mut config = DashboardConfig::default();
    config.data.path = data_path;
    config.data.delimiter = ";".to_string();
    config.data.date_column = "date".to_string();
    config.data.price_column = "price".to_string();
    config.data.decimal_separator = ",".to_string();
    config.model.path = model_path;

    (dir, config)
}

#[test]
fn test_history_view_filters_range() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard
        .history_view(&[date("2024-12-24"), date("2024-12-26")])
        .unwrap();

    assert!(view.notice().is_none());
    assert_eq!(view.filtered.len(), 3);
    assert_eq!(view.chart.prices, vec![72.5, 73.5, 74.5]);
    assert_eq!(view.chart.dates.len(), 3);
}

#[test]
fn test_history_view_fallback_has_notice() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard
        .history_view(&[date("2024-12-30"), date("2024-12-24")])
        .unwrap();

    assert_eq!(view.filtered.len(), 10);
    assert!(view.notice().unwrap().contains("full date range"));
}

#[test]
fn test_history_is_loaded_once() {
    let (_dir, config) = create_workspace();
    let data_path = config.data.path.clone();
    let dashboard = Dashboard::new(config).unwrap();

    let first = dashboard.history().unwrap();
    fs::remove_file(&data_path).unwrap();
    let second = dashboard.history().unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_missing_history_file() {
    let (_dir, mut config) = create_workspace();
    config.data.path = Path::new("does-not-exist.csv").to_path_buf();
    let dashboard = Dashboard::new(config).unwrap();

    let result = dashboard.history_view(&[]);
    assert!(matches!(
        result,
        Err(DashboardError::Forecast(ForecastError::FileNotFound(_)))
    ));
}

#[test]
fn test_forecast_view_default_horizon() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard.forecast_view(None, None).unwrap();

    assert_eq!(view.horizon_days, 30);
    assert_eq!(view.lookback, Lookback::All);
    assert_eq!(view.rows.len(), 10 + 30);
    assert_eq!(view.partition.future.len(), 30);
    assert_eq!(view.partition.history.len(), 10);
    assert_eq!(view.partition.forecast_start, date("2025-01-01"));
    assert_eq!(view.chart.future.dates[29], date("2025-01-30"));
}

#[test]
fn test_forecast_view_lookback_override() {
    let (_dir, mut config) = create_workspace();
    config.forecast.lookback_days = Some(5);
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard.forecast_view(Some(1), None).unwrap();
    assert_eq!(view.partition.history.len(), 5);
    assert_eq!(view.partition.future.len(), 1);

    let view = dashboard.forecast_view(Some(1), Some(Lookback::All)).unwrap();
    assert_eq!(view.partition.history.len(), 10);
}

#[test]
fn test_forecast_view_rejects_out_of_slider_horizon() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    assert!(matches!(
        dashboard.forecast_view(Some(0), None),
        Err(DashboardError::HorizonOutOfBounds { .. })
    ));
    assert!(matches!(
        dashboard.forecast_view(Some(91), None),
        Err(DashboardError::HorizonOutOfBounds { .. })
    ));
    assert!(dashboard.forecast_view(Some(90), None).is_ok());
}

#[test]
fn test_missing_model_is_unavailable() {
    let (_dir, mut config) = create_workspace();
    config.model.path = Path::new("modelo_prophet.json").to_path_buf();
    let dashboard = Dashboard::new(config).unwrap();

    // The history view still works without a model
    assert!(dashboard.history_view(&[]).is_ok());
    assert!(matches!(
        dashboard.forecast_view(None, None),
        Err(DashboardError::Forecast(ForecastError::ModelUnavailable(_)))
    ));
}

#[test]
fn test_fit_metrics_against_history() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard.forecast_view(Some(7), None).unwrap();
    let metrics = dashboard.fit_metrics(&view).unwrap();

    assert_eq!(metrics.matched, 10);
    assert!(metrics.band_coverage >= 0.0 && metrics.band_coverage <= 100.0);
}

#[test]
fn test_reports() {
    let (dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let history = dashboard.history().unwrap();
    let table = price_table(history.head(3));
    assert!(table.contains("2024-12-22"));
    assert!(table.contains("70.50"));

    let view = dashboard.forecast_view(Some(3), None).unwrap();
    let table = forecast_table(&view.partition.future);
    assert!(table.contains("2025-01-03"));

    let export = dir.path().join("forecast.csv");
    assert_eq!(write_forecast_csv(&export, &view.partition).unwrap(), 10 + 3);
    let contents = fs::read_to_string(&export).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "segment,date,point_estimate,lower_bound,upper_bound");
    assert_eq!(lines.len(), 1 + 10 + 3);
    assert!(lines[1].starts_with("history,2024-12-22,"));
    assert!(lines[13].starts_with("future,2025-01-03,"));
}

#[test]
fn test_export_counts_rows_after_lookback() {
    let (dir, mut config) = create_workspace();
    config.forecast.lookback_days = Some(4);
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard.forecast_view(Some(3), None).unwrap();
    let export = dir.path().join("trimmed.csv");
    let written = write_forecast_csv(&export, &view.partition).unwrap();

    assert_eq!(written, 4 + 3);
    assert!(written < view.rows.len());
    let contents = fs::read_to_string(&export).unwrap();
    assert_eq!(contents.lines().count(), 1 + written);
}

#[test]
fn test_history_preview_uses_filtered_rows() {
    let (_dir, config) = create_workspace();
    let dashboard = Dashboard::new(config).unwrap();

    let view = dashboard
        .history_view(&[date("2024-12-25"), date("2024-12-31")])
        .unwrap();

    let preview = view.filtered.head(2);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].date, date("2024-12-25"));
    assert_eq!(view.filtered.head(50).len(), 7);
}
