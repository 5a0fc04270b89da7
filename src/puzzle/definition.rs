//! Categories and puzzles.
//!
//! A `Puzzle` can only be built through [`Puzzle::new`], which enforces the
//! puzzle invariant. Deserialization goes through the same check, so a
//! malformed puzzle never reaches the round engine.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Level, WordId, CATEGORY_COUNT, WORDS_PER_CATEGORY};

/// Reasons a set of categories is not a valid puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected 4 categories, got {0}")]
    CategoryCount(usize),

    #[error("level \"{0}\" must be between 1 and 4")]
    BadLevel(String),

    #[error("level {0} is used by more than one category")]
    DuplicateLevel(Level),

    #[error("category at {0} has an empty name")]
    EmptyName(Level),

    #[error("category \"{0}\" contains an empty word")]
    EmptyWord(String),

    #[error("word \"{0}\" appears more than once")]
    DuplicateWord(String),
}

/// One hidden group of four words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category label revealed once the group is found.
    pub name: String,
    /// Puzzle-assigned rank.
    pub level: Level,
    /// The four member words.
    pub items: [String; WORDS_PER_CATEGORY],
}

impl Category {
    /// Create a category.
    pub fn new(name: impl Into<String>, level: Level, items: [&str; WORDS_PER_CATEGORY]) -> Self {
        Self {
            name: name.into(),
            level,
            items: items.map(str::to_string),
        }
    }
}

/// Four categories of four words each.
///
/// ## Invariants
///
/// - exactly four categories
/// - levels form the set {1, 2, 3, 4}
/// - names and words are non-empty
/// - the 16 words are pairwise distinct, ignoring case
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Puzzle {
    categories: [Category; CATEGORY_COUNT],
}

impl Puzzle {
    /// Validate and build a puzzle.
    pub fn new(categories: Vec<Category>) -> Result<Self, PuzzleError> {
        let categories: [Category; CATEGORY_COUNT] = categories
            .try_into()
            .map_err(|rest: Vec<Category>| PuzzleError::CategoryCount(rest.len()))?;

        let mut levels = [false; CATEGORY_COUNT];
        let mut seen = FxHashSet::default();

        for category in &categories {
            if std::mem::replace(&mut levels[category.level.index()], true) {
                return Err(PuzzleError::DuplicateLevel(category.level));
            }
            if category.name.trim().is_empty() {
                return Err(PuzzleError::EmptyName(category.level));
            }
            for word in &category.items {
                let normalized = word.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(PuzzleError::EmptyWord(category.name.clone()));
                }
                if !seen.insert(normalized) {
                    return Err(PuzzleError::DuplicateWord(word.clone()));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Categories in puzzle order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category at a given level.
    #[must_use]
    pub fn category(&self, level: Level) -> &Category {
        // Levels are a permutation of 1..=4, so exactly one matches.
        let index = self
            .categories
            .iter()
            .position(|c| c.level == level)
            .unwrap_or_default();
        &self.categories[index]
    }

    /// Level of the category a word belongs to.
    #[must_use]
    pub fn level_of(&self, word: WordId) -> Option<Level> {
        self.categories.get(word.category_index()).map(|c| c.level)
    }

    /// Text of a word.
    #[must_use]
    pub fn text_of(&self, word: WordId) -> Option<&str> {
        let category = self.categories.get(word.category_index())?;
        category
            .items
            .get(word.raw() as usize % WORDS_PER_CATEGORY)
            .map(String::as_str)
    }

    /// Every word with its id and level, in puzzle order.
    pub fn words(&self) -> impl Iterator<Item = (WordId, &str, Level)> + '_ {
        self.categories.iter().enumerate().flat_map(|(ci, category)| {
            category
                .items
                .iter()
                .enumerate()
                .map(move |(wi, text)| (WordId::from_position(ci, wi), text.as_str(), category.level))
        })
    }
}

impl TryFrom<Vec<Category>> for Puzzle {
    type Error = PuzzleError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        Puzzle::new(categories)
    }
}

impl From<Puzzle> for Vec<Category> {
    fn from(puzzle: Puzzle) -> Self {
        puzzle.categories.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new("FRUIT", level(1), ["APPLE", "PEAR", "PLUM", "KIWI"]),
            Category::new("COLOR", level(2), ["RED", "BLUE", "GREEN", "GOLD"]),
            Category::new("METAL", level(3), ["IRON", "GOLD2", "TIN", "LEAD"]),
            Category::new("TOOL", level(4), ["SAW", "AXE", "HAMMER", "DRILL"]),
        ]
    }

    #[test]
    fn test_valid_puzzle() {
        let puzzle = Puzzle::new(categories()).unwrap();
        assert_eq!(puzzle.words().count(), 16);
        assert_eq!(puzzle.category(level(3)).name, "METAL");
        assert_eq!(puzzle.level_of(WordId(5)), Some(level(2)));
        assert_eq!(puzzle.text_of(WordId(14)), Some("HAMMER"));
    }

    #[test]
    fn test_wrong_category_count() {
        let mut cats = categories();
        cats.pop();
        assert_eq!(Puzzle::new(cats), Err(PuzzleError::CategoryCount(3)));
    }

    #[test]
    fn test_duplicate_level() {
        let mut cats = categories();
        cats[3].level = level(1);
        assert_eq!(Puzzle::new(cats), Err(PuzzleError::DuplicateLevel(level(1))));
    }

    #[test]
    fn test_duplicate_word_ignores_case() {
        let mut cats = categories();
        cats[2].items[1] = "gold".to_string();
        assert_eq!(
            Puzzle::new(cats),
            Err(PuzzleError::DuplicateWord("gold".to_string()))
        );
    }

    #[test]
    fn test_empty_word_and_name() {
        let mut cats = categories();
        cats[0].items[0] = "  ".to_string();
        assert!(matches!(Puzzle::new(cats), Err(PuzzleError::EmptyWord(_))));

        let mut cats = categories();
        cats[1].name = String::new();
        assert_eq!(Puzzle::new(cats), Err(PuzzleError::EmptyName(level(2))));
    }

    #[test]
    fn test_deserialize_validates() {
        let puzzle = Puzzle::new(categories()).unwrap();
        let json = serde_json::to_string(&puzzle).unwrap();
        let back: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(puzzle, back);

        let mut cats = categories();
        cats[1].items[0] = "APPLE".to_string();
        let bad = serde_json::to_string(&cats).unwrap();
        assert!(serde_json::from_str::<Puzzle>(&bad).is_err());
    }
}
