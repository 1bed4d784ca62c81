//! Historical price loading and date-range filtering

use crate::cache::Memoized;
use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Date layouts tried in order when no explicit format is configured
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// A single (date, price) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Price in USD per barrel
    pub price: f64,
}

impl HistoricalRecord {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Layout of a delimited price file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFormat {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Header name of the date column
    pub date_column: String,
    /// Header name of the price column
    pub price_column: String,
    /// Explicit `chrono` format for the date column; common layouts are tried when unset
    pub date_format: Option<String>,
    /// Decimal separator used by the price column
    pub decimal_separator: char,
}

impl Default for CsvFormat {
    /// Comma separated `ds,y` columns, the layout produced for model training
    fn default() -> Self {
        Self {
            delimiter: b',',
            date_column: "ds".to_string(),
            price_column: "y".to_string(),
            date_format: None,
            decimal_separator: '.',
        }
    }
}

impl CsvFormat {
    /// Semicolon separated `date;price` columns
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            date_column: "date".to_string(),
            price_column: "price".to_string(),
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_columns(mut self, date_column: &str, price_column: &str) -> Self {
        self.date_column = date_column.to_string();
        self.price_column = price_column.to_string();
        self
    }

    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = Some(date_format.to_string());
        self
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    fn parse_date(&self, raw: &str) -> std::result::Result<NaiveDate, String> {
        if let Some(format) = &self.date_format {
            return NaiveDate::parse_from_str(raw, format)
                .map_err(|e| format!("invalid date '{}' for format '{}': {}", raw, format, e));
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(date);
            }
        }

        // Timestamps written with a midnight time component
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .map_err(|_| format!("unrecognized date '{}'", raw))
    }

    fn parse_price(&self, raw: &str) -> std::result::Result<f64, String> {
        let normalized = if self.decimal_separator == '.' {
            raw.to_string()
        } else {
            raw.replace('.', "").replace(self.decimal_separator, ".")
        };

        let price = normalized
            .parse::<f64>()
            .map_err(|e| format!("invalid price '{}': {}", raw, e))?;

        if !price.is_finite() {
            return Err(format!("non-finite price '{}'", raw));
        }

        Ok(price)
    }
}

/// Loader for historical price files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Read every (date, price) row of a delimited file
    pub fn load_history<P: AsRef<Path>>(path: P, format: &CsvFormat) -> Result<HistoricalSeries> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::FileNotFound(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let date_idx = Self::column_index(&headers, &format.date_column)?;
        let price_idx = Self::column_index(&headers, &format.price_column)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            // Header occupies line 1
            let line = i + 2;

            let date = row
                .get(date_idx)
                .ok_or_else(|| "missing date field".to_string())
                .and_then(|raw| format.parse_date(raw))
                .map_err(|e| ForecastError::ParseError(format!("line {}: {}", line, e)))?;

            let price = row
                .get(price_idx)
                .ok_or_else(|| "missing price field".to_string())
                .and_then(|raw| format.parse_price(raw))
                .map_err(|e| ForecastError::ParseError(format!("line {}: {}", line, e)))?;

            records.push(HistoricalRecord { date, price });
        }

        let series = HistoricalSeries::new(records)?;
        info!(
            "Loaded {} price records from {} ({} to {})",
            series.len(),
            path.display(),
            series.first_date(),
            series.last_date()
        );

        Ok(series)
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ForecastError::ParseError(format!(
                    "column '{}' not found in header [{}]",
                    name,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })
    }
}

/// Memoized history loader: each path is read once per process
#[derive(Debug)]
pub struct HistoryLoader {
    format: CsvFormat,
    cache: Memoized<HistoricalSeries>,
}

impl HistoryLoader {
    pub fn new(format: CsvFormat) -> Self {
        Self {
            format,
            cache: Memoized::new(),
        }
    }

    pub fn format(&self) -> &CsvFormat {
        &self.format
    }

    /// Load `path`, reusing the cached table on repeated calls
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<HistoricalSeries>> {
        self.cache
            .get_or_load(path.as_ref(), |p| DataLoader::load_history(p, &self.format))
    }

    /// Whether `path` has already been loaded
    pub fn is_cached<P: AsRef<Path>>(&self, path: P) -> bool {
        self.cache.contains(path.as_ref())
    }
}

/// Chronologically ordered, non-empty table of historical prices with unique dates
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    records: Vec<HistoricalRecord>,
}

impl HistoricalSeries {
    /// Build a series, ordering the records by date
    pub fn new(mut records: Vec<HistoricalRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(ForecastError::ParseError(
                "no data rows found".to_string(),
            ));
        }

        records.sort_by_key(|r| r.date);

        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::ParseError(format!(
                "duplicate date {}",
                pair[0].date
            )));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// Inclusive (min, max) date bounds
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_date(), self.last_date())
    }

    /// First `n` rows, for table previews
    pub fn head(&self, n: usize) -> &[HistoricalRecord] {
        leading(&self.records, n)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    /// Rows between `start` and `end` inclusive.
    ///
    /// An unordered pair or one reaching outside the loaded bounds falls back
    /// to the full table; the reason is kept on the returned view.
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> FilteredHistory {
        match resolve_range(self.bounds(), start, end) {
            Ok((start, end)) => FilteredHistory {
                start,
                end,
                records: records_between(&self.records, start, end).to_vec(),
                fallback_reason: None,
            },
            Err(e) => self.full_range(e),
        }
    }

    /// Apply a date-picker selection holding zero, one or two dates
    pub fn filter_selection(&self, selection: &[NaiveDate]) -> FilteredHistory {
        match selection {
            [start, end] => self.filter_range(*start, *end),
            [] => self.full_view(),
            _ => self.full_range(ForecastError::InvalidRange(format!(
                "expected a start and end date, got {} date(s)",
                selection.len()
            ))),
        }
    }

    /// The whole table, without a fallback notice
    pub fn full_view(&self) -> FilteredHistory {
        let (start, end) = self.bounds();
        FilteredHistory {
            start,
            end,
            records: self.records.clone(),
            fallback_reason: None,
        }
    }

    fn full_range(&self, reason: ForecastError) -> FilteredHistory {
        warn!("Falling back to the full date range: {}", reason);
        FilteredHistory {
            fallback_reason: Some(reason.to_string()),
            ..self.full_view()
        }
    }
}

/// Result of applying a date filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredHistory {
    /// Effective start of the range
    pub start: NaiveDate,
    /// Effective end of the range
    pub end: NaiveDate,
    /// Matching rows in date order
    pub records: Vec<HistoricalRecord>,
    /// Why the requested range was replaced by the full range, if it was
    pub fallback_reason: Option<String>,
}

impl FilteredHistory {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fell_back(&self) -> bool {
        self.fallback_reason.is_some()
    }

    /// First `n` rows of the filtered range, or all of them when there are fewer
    pub fn head(&self, n: usize) -> &[HistoricalRecord] {
        leading(&self.records, n)
    }
}

fn leading(records: &[HistoricalRecord], n: usize) -> &[HistoricalRecord] {
    &records[..n.min(records.len())]
}

/// Check a requested range against the data bounds
pub fn resolve_range(
    bounds: (NaiveDate, NaiveDate),
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let (min, max) = bounds;
    if start > end {
        return Err(ForecastError::InvalidRange(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }
    if start < min || end > max {
        return Err(ForecastError::InvalidRange(format!(
            "{} to {} is outside the available data ({} to {})",
            start, end, min, max
        )));
    }
    Ok((start, end))
}

/// Rows of a date-ordered slice with `start <= date <= end`
pub fn records_between(
    records: &[HistoricalRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> &[HistoricalRecord] {
    let lo = records.partition_point(|r| r.date < start);
    let hi = records.partition_point(|r| r.date <= end);
    if lo >= hi {
        return &[];
    }
    &records[lo..hi]
}

/// Filter date-ordered records to `[start, end]`, falling back to every
/// record when the range is unordered or outside the records' bounds
pub fn filter_range(
    records: &[HistoricalRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<HistoricalRecord> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Vec::new(),
    };

    match resolve_range((first, last), start, end) {
        Ok((start, end)) => records_between(records, start, end).to_vec(),
        Err(e) => {
            warn!("Falling back to the full date range: {}", e);
            records.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_decimal_comma_prices() {
        let format = CsvFormat::semicolon().with_decimal_separator(',');
        assert_eq!(format.parse_price("74,50").unwrap(), 74.5);
        assert_eq!(format.parse_price("1.074,25").unwrap(), 1074.25);
        assert!(format.parse_price("abc").is_err());
    }

    #[test]
    fn test_date_layouts() {
        let format = CsvFormat::default();
        assert_eq!(format.parse_date("2024-03-05").unwrap(), date("2024-03-05"));
        assert_eq!(format.parse_date("05/03/2024").unwrap(), date("2024-03-05"));
        assert_eq!(
            format.parse_date("2024-03-05 00:00:00").unwrap(),
            date("2024-03-05")
        );
        assert!(format.parse_date("March 5th").is_err());
    }

    #[test]
    fn test_explicit_date_format() {
        let format = CsvFormat::default().with_date_format("%m/%d/%Y");
        assert_eq!(format.parse_date("03/05/2024").unwrap(), date("2024-03-05"));
        assert!(format.parse_date("2024-03-05").is_err());
    }

    #[test]
    fn test_records_between_gap() {
        let records = vec![
            HistoricalRecord::new(date("2024-01-05"), 1.0),
            HistoricalRecord::new(date("2024-01-08"), 2.0),
        ];
        // A weekend with no observations
        assert!(records_between(&records, date("2024-01-06"), date("2024-01-07")).is_empty());
        assert_eq!(records_between(&records, date("2024-01-05"), date("2024-01-08")).len(), 2);
    }
}
