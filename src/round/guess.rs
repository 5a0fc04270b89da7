//! Guess results, round outcome, and guess history.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Level, WordId, WORDS_PER_CATEGORY};

/// Result of submitting a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuessResult {
    /// All four words share a category; more categories remain.
    Correct,
    /// Wrong, with at most two words from any one category.
    Incorrect,
    /// Wrong, with three words from one category.
    OneAway,
    /// This exact set was already guessed. Costs nothing.
    Same,
    /// Correct, and it cleared the last category.
    Win,
    /// Wrong, and it used up the last mistake.
    Loss,
}

impl GuessResult {
    /// Whether this result ended the round.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GuessResult::Win | GuessResult::Loss)
    }

    /// Whether this result cost a mistake.
    #[must_use]
    pub fn is_mistake(self) -> bool {
        matches!(self, GuessResult::Incorrect | GuessResult::OneAway | GuessResult::Loss)
    }
}

/// Where the round stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// No puzzle loaded.
    #[default]
    Uninitialized,
    InProgress,
    Won,
    Lost,
}

impl RoundOutcome {
    /// `Won` or `Lost`.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, RoundOutcome::Won | RoundOutcome::Lost)
    }
}

/// An unordered set of four words, stored sorted so equality is set equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess([WordId; WORDS_PER_CATEGORY]);

impl Guess {
    /// Create a guess from four words in any order.
    #[must_use]
    pub fn new(mut words: [WordId; WORDS_PER_CATEGORY]) -> Self {
        words.sort_unstable();
        Self(words)
    }

    /// The words, ascending by id.
    #[must_use]
    pub fn words(&self) -> &[WordId; WORDS_PER_CATEGORY] {
        &self.0
    }

    /// Check if the guess contains a word.
    #[must_use]
    pub fn contains(&self, word: WordId) -> bool {
        self.0.contains(&word)
    }
}

/// A submitted guess as recorded in history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Guess,
    /// Category level of each word, in board order at submission.
    pub levels: [Level; WORDS_PER_CATEGORY],
    pub result: GuessResult,
}

/// Append-only record of submitted guesses.
///
/// Repeats are detected through a hash set keyed by the sorted word ids.
#[derive(Clone, Debug, Default)]
pub struct GuessHistory {
    records: Vector<GuessRecord>,
    seen: FxHashSet<Guess>,
}

impl GuessHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a set of words was already guessed.
    #[must_use]
    pub fn contains(&self, guess: &Guess) -> bool {
        self.seen.contains(guess)
    }

    /// Record a guess. Repeats are ignored and return `false`.
    pub fn push(&mut self, record: GuessRecord) -> bool {
        if !self.seen.insert(record.guess) {
            return false;
        }
        self.records.push_back(record);
        true
    }

    /// Records in submission order.
    #[must_use]
    pub fn records(&self) -> &Vector<GuessRecord> {
        &self.records
    }

    /// Number of recorded guesses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been guessed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.records.clear();
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(words: [u8; 4], result: GuessResult) -> GuessRecord {
        GuessRecord {
            guess: Guess::new(words.map(WordId)),
            levels: Level::ALL,
            result,
        }
    }

    #[test]
    fn test_guess_is_order_independent() {
        let a = Guess::new([WordId(3), WordId(1), WordId(2), WordId(0)]);
        let b = Guess::new([WordId(0), WordId(1), WordId(2), WordId(3)]);
        assert_eq!(a, b);
        assert!(a.contains(WordId(2)));
        assert!(!a.contains(WordId(7)));
    }

    #[test]
    fn test_history_rejects_repeats() {
        let mut history = GuessHistory::new();
        assert!(history.push(record([0, 1, 2, 3], GuessResult::Correct)));
        assert!(!history.push(record([3, 2, 1, 0], GuessResult::Incorrect)));
        assert_eq!(history.len(), 1);
        assert!(history.contains(&Guess::new([WordId(1), WordId(0), WordId(3), WordId(2)])));
    }

    #[test]
    fn test_history_clear() {
        let mut history = GuessHistory::new();
        history.push(record([4, 5, 6, 7], GuessResult::Incorrect));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.contains(&Guess::new([4, 5, 6, 7].map(WordId))));
    }

    #[test]
    fn test_result_classification() {
        assert!(GuessResult::Win.is_terminal());
        assert!(GuessResult::Loss.is_terminal());
        assert!(!GuessResult::OneAway.is_terminal());
        assert!(GuessResult::Loss.is_mistake());
        assert!(!GuessResult::Same.is_mistake());
        assert!(!GuessResult::Correct.is_mistake());
    }
}
