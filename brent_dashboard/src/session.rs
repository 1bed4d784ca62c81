//! Dashboard session: the views behind each user action
//!
//! A session owns the load-once caches for the price table and the model
//! artifact. Every action (applying a date filter, requesting a forecast)
//! is one synchronous pass over those shared, read-only values.

use crate::chart::{build_series, history_chart, ForecastChart, PriceChart};
use crate::config::DashboardConfig;
use crate::error::Result;
use brent_forecast::metrics::{fit_metrics, FitMetrics};
use brent_forecast::{
    generate_forecast, partition, AdditiveModel, FilteredHistory, ForecastModel,
    ForecastPartition, ForecastRow, HistoricalSeries, HistoryLoader, Lookback, ModelLoader,
};
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

/// Filtered prices and their chart
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub filtered: FilteredHistory,
    pub chart: PriceChart,
}

impl HistoryView {
    /// Message for the user when the requested range was replaced
    pub fn notice(&self) -> Option<String> {
        self.filtered
            .fallback_reason
            .as_ref()
            .map(|reason| format!("Showing the full date range instead: {}", reason))
    }
}

/// A generated forecast, split and charted
#[derive(Debug, Clone)]
pub struct ForecastView {
    pub model_name: String,
    pub horizon_days: usize,
    pub lookback: Lookback,
    /// Every predicted row, in-sample and future
    pub rows: Vec<ForecastRow>,
    pub partition: ForecastPartition,
    pub chart: ForecastChart,
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    histories: HistoryLoader,
    models: ModelLoader,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let format = config.csv_format()?;
        Ok(Self {
            config,
            histories: HistoryLoader::new(format),
            models: ModelLoader::new(),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The configured price table, read on first use
    pub fn history(&self) -> Result<Arc<HistoricalSeries>> {
        Ok(self.histories.load(&self.config.data.path)?)
    }

    /// The configured model artifact, read on first use
    pub fn model(&self) -> Result<Arc<AdditiveModel>> {
        Ok(self.models.load(&self.config.model.path)?)
    }

    /// Apply a date-picker selection (zero, one or two dates)
    pub fn history_view(&self, selection: &[NaiveDate]) -> Result<HistoryView> {
        let history = self.history()?;
        let filtered = history.filter_selection(selection);
        let chart = history_chart(&filtered);
        Ok(HistoryView { filtered, chart })
    }

    /// Generate and split a forecast.
    ///
    /// `horizon_days` defaults to the slider default and must lie within the
    /// slider bounds; `lookback` defaults to the configured policy.
    pub fn forecast_view(
        &self,
        horizon_days: Option<usize>,
        lookback: Option<Lookback>,
    ) -> Result<ForecastView> {
        let horizon_days = self
            .config
            .check_horizon(horizon_days.unwrap_or(self.config.forecast.default_horizon))?;
        let lookback = lookback.unwrap_or_else(|| self.config.lookback());

        let model = self.model()?;
        let rows = generate_forecast(&*model, horizon_days)?;
        let partition = partition(&rows, horizon_days, lookback)?;
        let chart = build_series(&partition);

        info!(
            "Forecast view ready: {} history rows, {} future rows from {}",
            partition.history.len(),
            partition.future.len(),
            partition.forecast_start
        );

        Ok(ForecastView {
            model_name: model.name().to_string(),
            horizon_days,
            lookback,
            rows,
            partition,
            chart,
        })
    }

    /// In-sample accuracy of a forecast against the configured history
    pub fn fit_metrics(&self, view: &ForecastView) -> Result<FitMetrics> {
        let history = self.history()?;
        Ok(fit_metrics(history.records(), &view.rows)?)
    }
}
