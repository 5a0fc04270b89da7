//! Read-only board snapshot for the presentation layer.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::engine::Selection;
use super::guess::{GuessRecord, RoundOutcome};
use crate::core::Word;
use crate::puzzle::Category;

/// Everything a renderer needs, detached from the engine.
///
/// Uses `im` vectors, so taking a snapshot is O(1) and later engine
/// mutations never show through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Vector<Word>,
    pub selection: Selection,
    pub cleared: Vector<Category>,
    pub mistakes_remaining: u8,
    pub outcome: RoundOutcome,
    /// End-of-round sequence finished.
    pub resolved: bool,
    pub history: Vector<GuessRecord>,
}

impl BoardSnapshot {
    /// Text of each tile in display order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.board.iter().map(|w| w.text.as_str())
    }
}
