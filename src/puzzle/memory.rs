//! In-memory puzzle provider.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::definition::Puzzle;
use super::provider::{resolve_date, DatedPuzzle, ProviderError, PuzzleProvider, Result};
use crate::core::ProviderConfig;

/// Provider backed by a fixed map of dates to puzzles.
///
/// Useful for tests, offline play, and hosts that load an archive up front.
#[derive(Clone, Debug, Default)]
pub struct MemoryProvider {
    config: ProviderConfig,
    puzzles: BTreeMap<NaiveDate, Puzzle>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            puzzles: BTreeMap::new(),
        }
    }

    /// Add a puzzle for a date (builder pattern).
    #[must_use]
    pub fn with_puzzle(mut self, date: NaiveDate, puzzle: Puzzle) -> Self {
        self.insert(date, puzzle);
        self
    }

    /// Add or replace the puzzle for a date.
    pub fn insert(&mut self, date: NaiveDate, puzzle: Puzzle) {
        self.puzzles.insert(date, puzzle);
    }

    /// Number of stored puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Check if no puzzles are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

#[async_trait]
impl PuzzleProvider for MemoryProvider {
    async fn get_puzzle(&self, date: Option<NaiveDate>) -> Result<DatedPuzzle> {
        let date = resolve_date(date, self.puzzles.keys().copied(), self.config.today())?;
        let puzzle = self
            .puzzles
            .get(&date)
            .cloned()
            .ok_or(ProviderError::NotFound(date))?;
        tracing::debug!("memory provider serving puzzle for {}", date);
        Ok(DatedPuzzle { date, puzzle })
    }
}
