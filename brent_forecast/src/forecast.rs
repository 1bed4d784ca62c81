//! Forecast generation over a model's extended daily timeline

use crate::error::{ForecastError, Result};
use crate::models::{timeline_len, ForecastModel, ForecastRow};
use crate::utils::is_daily;
use log::info;

/// Predict every calendar day of the model's history plus `horizon_days` future days.
///
/// The returned rows are in ascending date order with no missing days. Output
/// from `model` that does not follow this layout is rejected rather than
/// passed on.
pub fn generate_forecast<M: ForecastModel + ?Sized>(
    model: &M,
    horizon_days: usize,
) -> Result<Vec<ForecastRow>> {
    if horizon_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be at least one day".to_string(),
        ));
    }

    let expected = timeline_len(model.history_start(), model.history_end(), horizon_days)?;
    let dates = model.future_dates(horizon_days)?;
    if dates.len() != expected || !is_daily(&dates) {
        return Err(ForecastError::ModelError(format!(
            "{} produced {} timeline dates, expected {} consecutive days",
            model.name(),
            dates.len(),
            expected
        )));
    }

    let rows = model.predict(&dates)?;
    if rows.len() != dates.len() || rows.iter().zip(&dates).any(|(row, date)| row.date != *date) {
        return Err(ForecastError::ModelError(format!(
            "{} returned {} predictions for {} dates",
            model.name(),
            rows.len(),
            dates.len()
        )));
    }

    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        info!(
            "Generated {} forecast rows with {} ({} to {}, horizon {} days)",
            rows.len(),
            model.name(),
            first.date,
            last.date,
            horizon_days
        );
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Model that skips every other date of its timeline
    #[derive(Debug)]
    struct SparseModel;

    impl ForecastModel for SparseModel {
        fn name(&self) -> &str {
            "sparse"
        }

        fn history_start(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        }

        fn history_end(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        }

        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>> {
            Ok(dates
                .iter()
                .step_by(2)
                .map(|&d| ForecastRow::new(d, 1.0, 0.0, 2.0))
                .collect())
        }
    }

    /// Flat model whose history ends `days_before_max` days before the last representable date
    #[derive(Debug)]
    struct EdgeModel {
        days_before_max: u64,
    }

    impl ForecastModel for EdgeModel {
        fn name(&self) -> &str {
            "edge"
        }

        fn history_start(&self) -> NaiveDate {
            self.history_end() - chrono::Days::new(9)
        }

        fn history_end(&self) -> NaiveDate {
            NaiveDate::MAX - chrono::Days::new(self.days_before_max)
        }

        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>> {
            Ok(dates.iter().map(|&d| ForecastRow::new(d, 1.0, 0.0, 2.0)).collect())
        }
    }

    /// Model that drops the last day of its timeline
    #[derive(Debug)]
    struct ShortTimelineModel;

    impl ForecastModel for ShortTimelineModel {
        fn name(&self) -> &str {
            "short"
        }

        fn history_start(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        }

        fn history_end(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        }

        fn future_dates(&self, horizon_days: usize) -> Result<Vec<NaiveDate>> {
            Ok(crate::utils::daily_dates(self.history_start(), 10 + horizon_days - 1))
        }

        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>> {
            Ok(dates.iter().map(|&d| ForecastRow::new(d, 1.0, 0.0, 2.0)).collect())
        }
    }

    #[test]
    fn test_huge_horizon_rejected() {
        let model = EdgeModel { days_before_max: 1000 };
        let result = generate_forecast(&model, usize::MAX);
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn test_horizon_past_last_date_rejected() {
        let model = EdgeModel { days_before_max: 2 };
        let result = generate_forecast(&model, 10);
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));

        let rows = generate_forecast(&model, 2).unwrap();
        assert_eq!(rows.len(), 10 + 2);
        assert_eq!(rows[rows.len() - 1].date, NaiveDate::MAX);
    }

    #[test]
    fn test_truncated_timeline_rejected() {
        let result = generate_forecast(&ShortTimelineModel, 5);
        assert!(matches!(result, Err(ForecastError::ModelError(_))));
    }

    #[test]
    fn test_misaligned_predictions_rejected() {
        let result = generate_forecast(&SparseModel, 5);
        assert!(matches!(result, Err(ForecastError::ModelError(_))));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = generate_forecast(&SparseModel, 0);
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }
}
