//! CSV price history.
//!
//! Files have a `date,close` header with ISO dates. Rows may be in any
//! order; they are sorted by date and only the trailing window ending at the
//! latest date is kept.

use chrono::{Days, NaiveDate};
use pricer_core::market_data::PriceHistorySource;
use pricer_core::types::PricingError;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One row of a history file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyClose {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

/// Reads every row from a `date,close` CSV.
pub fn read_series<R: Read>(reader: R) -> Result<Vec<DailyClose>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Closes from the `window_days` calendar dates ending at the latest date,
/// oldest first.
///
/// The latest date counts as the first day, so a 365-day window covers
/// `last - 364 ..= last`.
pub fn trailing_window(mut series: Vec<DailyClose>, window_days: u32) -> Vec<f64> {
    series.sort_by_key(|row| row.date);
    let Some(last) = series.last().map(|row| row.date) else {
        return Vec::new();
    };
    let cutoff = last
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);

    series
        .into_iter()
        .filter(|row| row.date > cutoff)
        .map(|row| row.close)
        .collect()
}

/// [`PriceHistorySource`] backed by CSV files.
///
/// `location` is either a single file, used for any underlying, or a
/// directory holding one `<UNDERLYING>.csv` per underlying.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    location: PathBuf,
    window_days: u32,
}

impl CsvHistory {
    /// Creates a source reading from `location`.
    pub fn new(location: impl Into<PathBuf>, window_days: u32) -> Self {
        Self {
            location: location.into(),
            window_days,
        }
    }

    fn path_for(&self, underlying: &str) -> PathBuf {
        if self.location.is_dir() {
            self.location.join(format!("{}.csv", underlying))
        } else {
            self.location.clone()
        }
    }

    fn load(&self, path: &Path) -> Result<Vec<f64>, String> {
        let file = std::fs::File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let series = read_series(file).map_err(|e| format!("{}: {}", path.display(), e))?;
        Ok(trailing_window(series, self.window_days))
    }
}

impl PriceHistorySource for CsvHistory {
    fn daily_closes(&self, underlying: &str) -> Result<Vec<f64>, PricingError> {
        let path = self.path_for(underlying);
        let closes = self
            .load(&path)
            .map_err(|reason| PricingError::HistoryUnavailable {
                underlying: underlying.to_string(),
                reason,
            })?;
        debug!(
            underlying,
            path = %path.display(),
            closes = closes.len(),
            window_days = self.window_days,
            "Loaded price history"
        );
        Ok(closes)
    }
}
