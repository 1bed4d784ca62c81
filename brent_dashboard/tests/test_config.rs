use brent_dashboard::config::DashboardConfig;
use brent_dashboard::DashboardError;
use brent_forecast::Lookback;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

fn write_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = DashboardConfig::default();

    assert_eq!(config.data.path, PathBuf::from("petroleo_hist.csv"));
    assert_eq!(config.model.path, PathBuf::from("modelo_prophet.json"));
    assert_eq!(config.forecast.min_horizon, 1);
    assert_eq!(config.forecast.max_horizon, 90);
    assert_eq!(config.forecast.default_horizon, 30);
    assert_eq!(config.lookback(), Lookback::All);

    let format = config.csv_format().unwrap();
    assert_eq!(format.delimiter, b',');
    assert_eq!(format.date_column, "ds");
    assert_eq!(format.price_column, "y");
}

#[test]
fn test_load_file_overrides_defaults() {
    let file = write_toml(
        r#"
[data]
path = "brent.csv"
delimiter = ";"
date_column = "date"
price_column = "price"
decimal_separator = ","

[forecast]
default_horizon = 60
lookback_days = 365
"#,
    );

    let config = DashboardConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.data.path, PathBuf::from("brent.csv"));
    assert_eq!(config.forecast.default_horizon, 60);
    assert_eq!(config.forecast.max_horizon, 90);
    assert_eq!(config.lookback(), Lookback::Days(365));
    assert_eq!(config.model.path, PathBuf::from("modelo_prophet.json"));

    let format = config.csv_format().unwrap();
    assert_eq!(format.delimiter, b';');
    assert_eq!(format.decimal_separator, ',');
}

#[test]
fn test_missing_config_file() {
    let result = DashboardConfig::load(Some(Path::new("no-such-config.toml")));
    assert!(matches!(result, Err(DashboardError::ConfigError(_))));
}

#[rstest]
#[case("[data]\ndelimiter = \";;\"\n")]
#[case("[data]\ndecimal_separator = \"\"\n")]
#[case("[data]\ndelimiter = \",\"\ndecimal_separator = \",\"\n")]
#[case("[data]\ndelimiter = \";\"\ndecimal_separator = \";\"\n")]
#[case("[forecast]\nmin_horizon = 0\n")]
#[case("[forecast]\ndefault_horizon = 120\n")]
#[case("[forecast]\nmin_horizon = 50\nmax_horizon = 10\n")]
fn test_invalid_config_rejected(#[case] contents: &str) {
    let file = write_toml(contents);
    let result = DashboardConfig::load(Some(file.path()));
    assert!(matches!(result, Err(DashboardError::ConfigError(_))));
}

#[test]
fn test_check_horizon_bounds() {
    let config = DashboardConfig::default();

    assert_eq!(config.check_horizon(1).unwrap(), 1);
    assert_eq!(config.check_horizon(90).unwrap(), 90);
    assert!(matches!(
        config.check_horizon(91),
        Err(DashboardError::HorizonOutOfBounds { value: 91, min: 1, max: 90 })
    ));
}

#[test]
fn test_explicit_date_format_passed_through() {
    let mut config = DashboardConfig::default();
    config.data.date_format = Some("%d/%m/%Y".to_string());

    let format = config.csv_format().unwrap();
    assert_eq!(format.date_format.as_deref(), Some("%d/%m/%Y"));
}
