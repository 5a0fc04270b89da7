//! Asynchronous abstraction for sourcing the day's puzzle.
//!
//! Hosts plug in [`PuzzleProvider`] implementations so a session can run
//! against a spreadsheet export, a fixed in-memory set, or a test fixture.
//! Every provider hands back puzzles that already satisfy the puzzle
//! invariant and never serves a date later than its own "today".

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{Puzzle, PuzzleError};

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failures surfaced by puzzle providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("no puzzle found for {0}")]
    NotFound(NaiveDate),

    #[error("puzzle for {date} is malformed")]
    Malformed {
        date: NaiveDate,
        #[source]
        source: PuzzleError,
    },

    #[error("puzzle source unavailable: {0}")]
    Backend(String),
}

/// A puzzle together with the date it is published for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedPuzzle {
    pub date: NaiveDate,
    pub puzzle: Puzzle,
}

/// Source of validated puzzles.
#[async_trait]
pub trait PuzzleProvider: Send + Sync {
    /// Fetch the puzzle for `date`.
    ///
    /// `None` means the most recent puzzle on or before the provider's today.
    async fn get_puzzle(&self, date: Option<NaiveDate>) -> Result<DatedPuzzle>;
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ProviderError::InvalidDate(raw.to_string()))
}

/// Pick the date a request should be served from.
///
/// - explicit future dates are rejected as `InvalidDate`
/// - explicit dates without a puzzle are `NotFound`
/// - no date means the latest available date on or before `today`
pub fn resolve_date<I>(requested: Option<NaiveDate>, available: I, today: NaiveDate) -> Result<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    match requested {
        Some(date) if date > today => Err(ProviderError::InvalidDate(format!(
            "{date} is after {today}"
        ))),
        Some(date) => available
            .into_iter()
            .find(|d| *d == date)
            .ok_or(ProviderError::NotFound(date)),
        None => available
            .into_iter()
            .filter(|d| *d <= today)
            .max()
            .ok_or(ProviderError::NotFound(today)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-06-01").unwrap(), date(2024, 6, 1));
        assert_eq!(parse_date(" 2024-06-01 ").unwrap(), date(2024, 6, 1));
        assert!(matches!(parse_date("06/01/2024"), Err(ProviderError::InvalidDate(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(ProviderError::InvalidDate(_))));
    }

    #[test]
    fn test_resolve_latest_not_after_today() {
        let available = [date(2024, 6, 1), date(2024, 6, 3), date(2024, 6, 5)];
        let resolved = resolve_date(None, available, date(2024, 6, 4)).unwrap();
        assert_eq!(resolved, date(2024, 6, 3));
    }

    #[test]
    fn test_resolve_future_is_invalid() {
        let available = [date(2024, 6, 5)];
        let err = resolve_date(Some(date(2024, 6, 5)), available, date(2024, 6, 4)).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidDate(_)));
    }

    #[test]
    fn test_resolve_missing() {
        let available = [date(2024, 6, 1)];
        let err = resolve_date(Some(date(2024, 5, 1)), available, date(2024, 6, 4)).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(d) if d == date(2024, 5, 1)));

        let err = resolve_date(None, [date(2024, 7, 1)], date(2024, 6, 4)).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(d) if d == date(2024, 6, 4)));
    }
}
