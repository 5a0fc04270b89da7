//! Post-round summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::RoundEngine;
use super::guess::RoundOutcome;
use crate::core::{Level, WORDS_PER_CATEGORY};

/// Square drawn for each level, 1 through 4.
const LEVEL_SQUARES: [&str; 4] = ["🟨", "🟩", "🟦", "🟪"];

/// What the player sees once a round is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub date: Option<NaiveDate>,
    pub outcome: RoundOutcome,
    pub mistakes_made: u8,
    /// One row per guess, each word shown by its category level.
    pub rows: Vec<[Level; WORDS_PER_CATEGORY]>,
}

impl RoundSummary {
    /// Summarise a finished round. `None` while the round is still open.
    #[must_use]
    pub fn from_engine(engine: &RoundEngine, date: Option<NaiveDate>) -> Option<Self> {
        if !engine.outcome().is_over() {
            return None;
        }

        Some(Self {
            date,
            outcome: engine.outcome(),
            mistakes_made: engine.mistakes_made(),
            rows: engine.history().records().iter().map(|r| r.levels).collect(),
        })
    }

    /// Shareable text: a header line, then one row of squares per guess.
    #[must_use]
    pub fn share_text(&self) -> String {
        let mut out = match self.date {
            Some(date) => format!("Connections {date}"),
            None => "Connections".to_string(),
        };

        for row in &self.rows {
            out.push('\n');
            for level in row {
                out.push_str(LEVEL_SQUARES[level.index()]);
            }
        }

        out
    }
}
