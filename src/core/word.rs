//! Word identity and board tiles.
//!
//! ## ID Layout
//!
//! A puzzle's 16 words get stable ids from their position in the puzzle:
//! `category_index * 4 + item_index`. Board order can change freely (initial
//! deal, shuffles) without affecting identity, so guesses and selections
//! compare ids, never text or board position.
//!
//! ```
//! use rust_connections::core::{Level, WordId};
//!
//! let id = WordId::from_position(2, 3);
//! assert_eq!(id, WordId(11));
//! assert_eq!(id.category_index(), 2);
//!
//! assert!(Level::new(4).is_some());
//! assert!(Level::new(5).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Number of words in a category.
pub const WORDS_PER_CATEGORY: usize = 4;

/// Number of categories in a puzzle.
pub const CATEGORY_COUNT: usize = 4;

/// Stable identity of a word within one puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId(pub u8);

impl WordId {
    /// Id for the word at `item` within the category at `category`.
    #[must_use]
    pub const fn from_position(category: usize, item: usize) -> Self {
        Self((category * WORDS_PER_CATEGORY + item) as u8)
    }

    /// Index of the owning category in puzzle order.
    #[must_use]
    pub const fn category_index(self) -> usize {
        self.0 as usize / WORDS_PER_CATEGORY
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self.0)
    }
}

/// Puzzle-assigned category rank, 1 through 4.
///
/// Used for deterministic ordering only (reveal order, summary colours).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; CATEGORY_COUNT] = [Level(1), Level(2), Level(3), Level(4)];

    /// Create a level. Returns `None` outside 1..=4.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= CATEGORY_COUNT as u8 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw level value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, handy for per-level arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| format!("level {value} outside 1..=4"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A tile on the board.
///
/// `level` is the ground-truth category and is never shown to the player.
/// `selected` is the only field that changes during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Stable identity.
    pub id: WordId,
    /// Display text.
    pub text: String,
    /// Owning category's level.
    pub level: Level,
    /// Whether the player currently has this tile selected.
    pub selected: bool,
}

impl Word {
    /// Create an unselected tile.
    pub fn new(id: WordId, text: impl Into<String>, level: Level) -> Self {
        Self {
            id,
            text: text.into(),
            level,
            selected: false,
        }
    }
}
