//! The round state machine.
//!
//! ```text
//! Uninitialized ──initialize(Some)──▶ InProgress ──Win──▶ Won
//!       ▲                              │  ▲    │
//!       └──────initialize(None)────────┘  │    └──Loss──▶ Lost
//!                                         └─ Same / Incorrect / OneAway / Correct
//! ```
//!
//! `initialize` resets from any state. Every other mutator is a silent no-op
//! unless the round is `InProgress` with no timed sequence pending: a click
//! arriving after the round ended is normal, not an error.
//!
//! ## Example
//!
//! ```
//! use rust_connections::core::{EngineConfig, Level};
//! use rust_connections::puzzle::{Category, Puzzle};
//! use rust_connections::round::{GuessResult, RoundEngine};
//!
//! let level = |n| Level::new(n).unwrap();
//! let puzzle = Puzzle::new(vec![
//!     Category::new("FRUIT", level(1), ["APPLE", "PEAR", "PLUM", "KIWI"]),
//!     Category::new("COLOR", level(2), ["RED", "BLUE", "GREEN", "GOLD"]),
//!     Category::new("METAL", level(3), ["IRON", "GOLD2", "TIN", "LEAD"]),
//!     Category::new("TOOL", level(4), ["SAW", "AXE", "HAMMER", "DRILL"]),
//! ])
//! .unwrap();
//!
//! let mut engine = RoundEngine::new(EngineConfig::default().with_seed(1));
//! engine.initialize(Some(puzzle));
//!
//! // The first four words in puzzle order are the FRUIT category.
//! let fruit: Vec<_> = engine.puzzle().unwrap().words().take(4).map(|(id, _, _)| id).collect();
//! for id in fruit {
//!     engine.toggle_select(id);
//! }
//! assert_eq!(engine.submit_guess(), Some(GuessResult::Correct));
//! assert_eq!(engine.board().len(), 12);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use im::Vector;
use smallvec::SmallVec;

use super::guess::{Guess, GuessHistory, GuessRecord, GuessResult, RoundOutcome};
use super::sequence::{SequenceEvent, SequenceStep, TimedStep};
use super::snapshot::BoardSnapshot;
use crate::core::{BoardRng, EngineConfig, Level, Word, WordId, CATEGORY_COUNT, WORDS_PER_CATEGORY};
use crate::puzzle::{Category, Puzzle};

/// Current selection, at most four words.
pub type Selection = SmallVec<[WordId; WORDS_PER_CATEGORY]>;

/// Owns all state for one round of one puzzle.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    config: EngineConfig,

    /// Stream for the initial deal.
    deal_rng: BoardRng,
    /// Stream for player-requested shuffles.
    shuffle_rng: BoardRng,

    puzzle: Option<Puzzle>,
    board: Vector<Word>,
    cleared: Vector<Category>,
    history: GuessHistory,
    mistakes_remaining: u8,
    outcome: RoundOutcome,

    pending: VecDeque<TimedStep>,
    sequence_started: bool,
    resolved: bool,
}

impl RoundEngine {
    /// Create an engine with no active round.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => BoardRng::new(seed),
            None => BoardRng::from_entropy(),
        };

        Self {
            deal_rng: rng.for_context("deal"),
            shuffle_rng: rng.for_context("shuffle"),
            mistakes_remaining: config.starting_mistakes(),
            config,
            puzzle: None,
            board: Vector::new(),
            cleared: Vector::new(),
            history: GuessHistory::new(),
            outcome: RoundOutcome::Uninitialized,
            pending: VecDeque::new(),
            sequence_started: false,
            resolved: false,
        }
    }

    /// Start a round, or clear the engine when `puzzle` is `None`.
    ///
    /// Nothing carries over from the previous round, including any pending
    /// sequence.
    pub fn initialize(&mut self, puzzle: Option<Puzzle>) {
        self.board.clear();
        self.cleared.clear();
        self.history.clear();
        self.pending.clear();
        self.sequence_started = false;
        self.resolved = false;
        self.mistakes_remaining = self.config.starting_mistakes();

        let Some(puzzle) = puzzle else {
            self.puzzle = None;
            self.outcome = RoundOutcome::Uninitialized;
            tracing::debug!("round engine cleared");
            return;
        };

        let mut words: Vec<Word> = puzzle
            .words()
            .map(|(id, text, level)| Word::new(id, text, level))
            .collect();
        self.deal_rng.shuffle(&mut words);

        self.board = words.into_iter().collect();
        self.puzzle = Some(puzzle);
        self.outcome = RoundOutcome::InProgress;

        tracing::info!(
            "round started with {} words and {} mistakes",
            self.board.len(),
            self.mistakes_remaining
        );
    }

    // === Snapshot reads ===

    /// The active puzzle.
    #[must_use]
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Words still on the board, in display order.
    #[must_use]
    pub fn board(&self) -> &Vector<Word> {
        &self.board
    }

    /// Selected words, in board order.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.board
            .iter()
            .filter(|w| w.selected)
            .map(|w| w.id)
            .collect()
    }

    /// Categories found (or revealed), in discovery order.
    #[must_use]
    pub fn cleared(&self) -> &Vector<Category> {
        &self.cleared
    }

    /// Guesses submitted this round.
    #[must_use]
    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    #[must_use]
    pub fn mistakes_remaining(&self) -> u8 {
        self.mistakes_remaining
    }

    /// Mistakes spent so far.
    #[must_use]
    pub fn mistakes_made(&self) -> u8 {
        self.config
            .starting_mistakes()
            .saturating_sub(self.mistakes_remaining)
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Whether the end-of-round sequence has finished.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Whether a timed sequence still has steps to run.
    #[must_use]
    pub fn is_sequence_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether player input currently has any effect.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.outcome == RoundOutcome::InProgress && self.pending.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of every read above, cheap to clone.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board.clone(),
            selection: self.selection(),
            cleared: self.cleared.clone(),
            mistakes_remaining: self.mistakes_remaining,
            outcome: self.outcome,
            resolved: self.resolved,
            history: self.history.records().clone(),
        }
    }

    // === Player input ===

    /// Select or deselect a word and return the resulting selection.
    ///
    /// Selecting a fifth word does nothing. Words not on the board are ignored.
    pub fn toggle_select(&mut self, word: WordId) -> Selection {
        if !self.accepts_input() {
            return self.selection();
        }

        let count = self.board.iter().filter(|w| w.selected).count();
        if let Some(tile) = self.board.iter_mut().find(|w| w.id == word) {
            if tile.selected {
                tile.selected = false;
            } else if count < WORDS_PER_CATEGORY {
                tile.selected = true;
            }
            tracing::debug!("{} ({}) selected={}", tile.text, word, tile.selected);
        }

        self.selection()
    }

    /// Re-permute the board. Selection flags travel with their words.
    pub fn shuffle(&mut self) {
        if !self.accepts_input() {
            return;
        }

        let mut words: Vec<Word> = self.board.iter().cloned().collect();
        self.shuffle_rng.shuffle(&mut words);
        self.board = words.into_iter().collect();
    }

    /// Clear every selection.
    pub fn deselect_all(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.clear_selection();
    }

    /// Evaluate the current four-word selection.
    ///
    /// Returns `None`, changing nothing, unless the round is in progress and
    /// exactly four words are selected.
    pub fn submit_guess(&mut self) -> Option<GuessResult> {
        if !self.accepts_input() {
            return None;
        }

        // Copy out ids and levels so the board borrow ends before any mutation.
        let (ids, levels) = {
            let selected: SmallVec<[&Word; WORDS_PER_CATEGORY]> =
                self.board.iter().filter(|w| w.selected).collect();
            if selected.len() != WORDS_PER_CATEGORY {
                return None;
            }
            let ids: [WordId; WORDS_PER_CATEGORY] = std::array::from_fn(|i| selected[i].id);
            let levels: [Level; WORDS_PER_CATEGORY] = std::array::from_fn(|i| selected[i].level);
            (ids, levels)
        };
        let guess = Guess::new(ids);

        if self.history.contains(&guess) {
            tracing::debug!("repeat guess {:?}", guess.words());
            return Some(GuessResult::Same);
        }

        let (best_level, likeness) = self.best_match(&guess)?;

        let result = if likeness == WORDS_PER_CATEGORY {
            self.clear_category(best_level);
            if self.board.is_empty() {
                self.outcome = RoundOutcome::Won;
                tracing::info!("round won with {} mistakes", self.mistakes_made());
                GuessResult::Win
            } else {
                GuessResult::Correct
            }
        } else {
            self.mistakes_remaining = self.mistakes_remaining.saturating_sub(1);
            if self.mistakes_remaining == 0 {
                self.outcome = RoundOutcome::Lost;
                tracing::info!("round lost with {} categories found", self.cleared.len());
                GuessResult::Loss
            } else if likeness == WORDS_PER_CATEGORY - 1 {
                GuessResult::OneAway
            } else {
                GuessResult::Incorrect
            }
        };

        tracing::debug!(
            "guess {:?} scored {} against {} => {:?}",
            guess.words(),
            likeness,
            best_level,
            result
        );
        self.history.push(GuessRecord { guess, levels, result });

        Some(result)
    }

    /// Category with the most selected words; first in puzzle order on ties.
    fn best_match(&self, guess: &Guess) -> Option<(Level, usize)> {
        let puzzle = self.puzzle.as_ref()?;

        let mut likeness = [0usize; CATEGORY_COUNT];
        for word in guess.words() {
            likeness[word.category_index()] += 1;
        }

        let mut best = 0;
        for (index, count) in likeness.iter().enumerate() {
            if *count > likeness[best] {
                best = index;
            }
        }

        Some((puzzle.categories()[best].level, likeness[best]))
    }

    fn clear_category(&mut self, level: Level) -> Option<Category> {
        let category = self.puzzle.as_ref()?.category(level).clone();
        self.board.retain(|w| w.level != level);
        self.cleared.push_back(category.clone());
        Some(category)
    }

    fn clear_selection(&mut self) {
        for word in self.board.iter_mut() {
            word.selected = false;
        }
    }

    // === End-of-round sequences ===

    /// Queue the loss reveal: deselect everything, then reveal each remaining
    /// category in ascending level, then confirm the loss.
    ///
    /// Every reveal, the first included, waits `reveal_delay` before it runs;
    /// `closing_delay` follows the last one.
    ///
    /// Returns `false` unless the round is lost and no sequence has run yet.
    pub fn reveal_remaining_on_loss(&mut self) -> bool {
        if self.outcome != RoundOutcome::Lost || self.sequence_started {
            return false;
        }
        self.sequence_started = true;
        self.clear_selection();

        let remaining: SmallVec<[Level; CATEGORY_COUNT]> = Level::ALL
            .into_iter()
            .filter(|level| self.board.iter().any(|w| w.level == *level))
            .collect();

        let reveal_delay = self.config.reveal_delay();
        for level in &remaining {
            self.pending.push_back(TimedStep {
                delay: reveal_delay,
                step: SequenceStep::Reveal(*level),
            });
        }
        self.pending.push_back(TimedStep {
            delay: self.config.closing_delay(),
            step: SequenceStep::ConfirmLoss,
        });

        tracing::debug!("queued reveal of {} categories", remaining.len());
        true
    }

    /// Queue the pause before the won summary.
    ///
    /// Returns `false` unless the round is won and no sequence has run yet.
    pub fn confirm_win(&mut self) -> bool {
        if self.outcome != RoundOutcome::Won || self.sequence_started {
            return false;
        }
        self.sequence_started = true;
        self.pending.push_back(TimedStep {
            delay: self.config.win_delay(),
            step: SequenceStep::ConfirmWin,
        });
        true
    }

    /// Pause required before the next step, if any.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        self.pending.front().map(|step| step.delay)
    }

    /// Apply the next pending step without waiting.
    pub fn advance(&mut self) -> Option<SequenceEvent> {
        let TimedStep { step, .. } = self.pending.pop_front()?;

        match step {
            SequenceStep::Reveal(level) => {
                let category = self.clear_category(level)?;
                tracing::debug!("revealed {} ({})", category.name, level);
                Some(SequenceEvent::CategoryRevealed(category))
            }
            SequenceStep::ConfirmLoss => {
                self.resolved = true;
                tracing::info!("loss sequence complete");
                Some(SequenceEvent::RoundLost)
            }
            SequenceStep::ConfirmWin => {
                self.resolved = true;
                tracing::info!("win sequence complete");
                Some(SequenceEvent::RoundWon)
            }
        }
    }

    /// Apply every pending step without waiting.
    pub fn finish_sequence(&mut self) -> Vec<SequenceEvent> {
        std::iter::from_fn(|| self.advance()).collect()
    }
}
