//! Spreadsheet-backed puzzle provider.
//!
//! Reads the `values` grid returned by a spreadsheet values API. The first
//! row is a header; each following row describes one category:
//!
//! ```text
//! date       | level | name  | word 1 | word 2 | word 3 | word 4
//! 2024-06-01 | 1     | FRUIT | APPLE  | PEAR   | PLUM   | KIWI
//! ```
//!
//! Rows are grouped by date up front but validated per lookup, so one bad day
//! only breaks that day.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::definition::{Category, Puzzle, PuzzleError};
use super::provider::{parse_date, resolve_date, DatedPuzzle, ProviderError, PuzzleProvider, Result};
use crate::core::{Level, ProviderConfig, WORDS_PER_CATEGORY};

const COLUMNS: usize = 3 + WORDS_PER_CATEGORY;

/// Raw spreadsheet response body.
#[derive(Debug, Deserialize)]
struct SheetValues {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// One category row, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SheetRow {
    level: String,
    name: String,
    words: [String; WORDS_PER_CATEGORY],
}

impl SheetRow {
    fn to_category(&self) -> std::result::Result<Category, PuzzleError> {
        let raw = self.level.trim();
        let level = raw
            .parse::<u8>()
            .ok()
            .and_then(Level::new)
            .ok_or_else(|| PuzzleError::BadLevel(raw.to_string()))?;
        Ok(Category {
            name: self.name.trim().to_string(),
            level,
            items: self.words.clone().map(|w| w.trim().to_string()),
        })
    }
}

/// Provider over spreadsheet rows.
#[derive(Clone, Debug)]
pub struct SheetProvider {
    config: ProviderConfig,
    rows: BTreeMap<NaiveDate, Vec<SheetRow>>,
}

impl SheetProvider {
    /// Build from a raw values grid, header row included.
    pub fn from_values(config: ProviderConfig, values: Vec<Vec<String>>) -> Self {
        let mut rows: BTreeMap<NaiveDate, Vec<SheetRow>> = BTreeMap::new();

        for (index, row) in values.into_iter().enumerate().skip(1) {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            if row.len() < COLUMNS {
                tracing::warn!("sheet row {} has {} columns, skipping", index, row.len());
                continue;
            }
            let date = match parse_date(&row[0]) {
                Ok(date) => date,
                Err(_) => {
                    tracing::warn!("sheet row {} has unparsable date {:?}, skipping", index, row[0]);
                    continue;
                }
            };

            let mut cells = row.into_iter().skip(1);
            let level = cells.next().unwrap_or_default();
            let name = cells.next().unwrap_or_default();
            let words = std::array::from_fn(|_| cells.next().unwrap_or_default());

            rows.entry(date).or_default().push(SheetRow { level, name, words });
        }

        tracing::debug!("sheet provider loaded {} dates", rows.len());
        Self { config, rows }
    }

    /// Build from a JSON values response (`{"values": [[...], ...]}`).
    pub fn from_json(config: ProviderConfig, json: &str) -> Result<Self> {
        let body: SheetValues =
            serde_json::from_str(json).map_err(|e| ProviderError::Backend(e.to_string()))?;
        Ok(Self::from_values(config, body.values))
    }

    /// Dates with at least one row, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.keys().copied()
    }

    fn build(&self, date: NaiveDate) -> Result<Puzzle> {
        let rows = self.rows.get(&date).ok_or(ProviderError::NotFound(date))?;
        let categories = rows
            .iter()
            .map(SheetRow::to_category)
            .collect::<std::result::Result<Vec<_>, _>>()
            .and_then(Puzzle::new);

        categories.map_err(|source| {
            tracing::warn!("puzzle for {} failed validation: {}", date, source);
            ProviderError::Malformed { date, source }
        })
    }
}

#[async_trait]
impl PuzzleProvider for SheetProvider {
    async fn get_puzzle(&self, date: Option<NaiveDate>) -> Result<DatedPuzzle> {
        let date = resolve_date(date, self.dates(), self.config.today())?;
        let puzzle = self.build(date)?;
        Ok(DatedPuzzle { date, puzzle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; COLUMNS]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn values() -> Vec<Vec<String>> {
        vec![
            row(["date", "level", "name", "w1", "w2", "w3", "w4"]),
            row(["2024-06-01", "1", "FRUIT", "APPLE", "PEAR", "PLUM", "KIWI"]),
            row(["2024-06-01", "2", "COLOR", "RED", "BLUE", "GREEN", "GOLD"]),
            row(["2024-06-01", "3", "METAL", "IRON", "GOLD2", "TIN", "LEAD"]),
            row(["2024-06-01", "4", "TOOL", "SAW", "AXE", "HAMMER", "DRILL"]),
            row(["2024-06-02", "1", "ONLY", "A", "B", "C", "D"]),
            row(["not a date", "1", "X", "E", "F", "G", "H"]),
        ]
    }

    #[test]
    fn test_groups_rows_by_date() {
        let provider = SheetProvider::from_values(ProviderConfig::default(), values());
        let dates: Vec<_> = provider.dates().collect();
        assert_eq!(dates.len(), 2);
    }

    #[test]
    fn test_build_valid_day() {
        let provider = SheetProvider::from_values(ProviderConfig::default(), values());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let puzzle = provider.build(date).unwrap();
        assert_eq!(puzzle.categories()[1].name, "COLOR");
    }

    #[test]
    fn test_incomplete_day_is_malformed() {
        let provider = SheetProvider::from_values(ProviderConfig::default(), values());
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let err = provider.build(date).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Malformed { source: PuzzleError::CategoryCount(1), .. }
        ));
    }

    #[test]
    fn test_bad_level_cell() {
        let sheet_row = SheetRow {
            level: "seven".to_string(),
            name: "X".to_string(),
            words: ["A", "B", "C", "D"].map(str::to_string),
        };
        assert_eq!(
            sheet_row.to_category(),
            Err(PuzzleError::BadLevel("seven".to_string()))
        );

        let sheet_row = SheetRow { level: " 300 ".to_string(), ..sheet_row };
        let err = sheet_row.to_category().unwrap_err();
        assert_eq!(err, PuzzleError::BadLevel("300".to_string()));
        assert_eq!(err.to_string(), "level \"300\" must be between 1 and 4");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SheetProvider::from_json(ProviderConfig::default(), "{not json").unwrap_err();
        assert!(matches!(err, ProviderError::Backend(_)));
    }
}
