//! A single player's session: one engine fed by one puzzle provider.
//!
//! The session is what a UI loop owns. It turns provider failures into one
//! user-visible message, refuses input while that message is shown, and
//! runs the end-of-round sequences.

use chrono::NaiveDate;

use super::engine::{RoundEngine, Selection};
use super::feedback::Feedback;
use super::guess::{GuessResult, RoundOutcome};
use super::sequence::{drive_sequence, SequenceEvent, Timer};
use super::summary::RoundSummary;
use crate::core::{EngineConfig, WordId};
use crate::puzzle::{parse_date, DatedPuzzle, ProviderError, PuzzleProvider};

/// Engine plus the provider that feeds it.
pub struct GameSession<P> {
    provider: P,
    engine: RoundEngine,
    date: Option<NaiveDate>,
    error: Option<String>,
}

impl<P: PuzzleProvider> GameSession<P> {
    /// Create a session with no puzzle loaded.
    pub fn new(provider: P, config: EngineConfig) -> Self {
        Self {
            provider,
            engine: RoundEngine::new(config),
            date: None,
            error: None,
        }
    }

    /// Load the puzzle for `date` (ISO `YYYY-MM-DD`), or the latest one.
    ///
    /// Success starts a fresh round. Failure leaves the engine empty and
    /// records an error message; no partial round is ever built.
    pub async fn load(&mut self, date: Option<&str>) -> Result<NaiveDate, ProviderError> {
        let fetched = match date.map(parse_date).transpose() {
            Ok(requested) => self.provider.get_puzzle(requested).await,
            Err(err) => Err(err),
        };

        match fetched {
            Ok(DatedPuzzle { date, puzzle }) => {
                self.engine.initialize(Some(puzzle));
                self.date = Some(date);
                self.error = None;
                tracing::info!("loaded puzzle for {}", date);
                Ok(date)
            }
            Err(err) => {
                tracing::warn!("failed to load puzzle: {}", err);
                self.engine.initialize(None);
                self.date = None;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    /// Date of the loaded puzzle.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Message from the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether player input is currently accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.error.is_none() && self.engine.accepts_input()
    }

    pub fn toggle_select(&mut self, word: WordId) -> Selection {
        if !self.accepts_input() {
            return self.engine.selection();
        }
        self.engine.toggle_select(word)
    }

    pub fn shuffle(&mut self) {
        if self.accepts_input() {
            self.engine.shuffle();
        }
    }

    pub fn deselect_all(&mut self) {
        if self.accepts_input() {
            self.engine.deselect_all();
        }
    }

    /// Submit the selection and return the result with its feedback.
    pub fn submit_guess(&mut self) -> Option<(GuessResult, Feedback)> {
        if !self.accepts_input() {
            return None;
        }
        let result = self.engine.submit_guess()?;
        Some((result, Feedback::for_result(result, self.engine.mistakes_made())))
    }

    /// Run the end-of-round sequence for a won or lost round.
    ///
    /// Does nothing while the round is still open or once it has resolved.
    pub async fn resolve<T, F>(&mut self, timer: &T, on_event: F) -> Vec<SequenceEvent>
    where
        T: Timer + ?Sized,
        F: FnMut(&SequenceEvent),
    {
        match self.engine.outcome() {
            RoundOutcome::Won => {
                self.engine.confirm_win();
            }
            RoundOutcome::Lost => {
                self.engine.reveal_remaining_on_loss();
            }
            RoundOutcome::Uninitialized | RoundOutcome::InProgress => {}
        }
        drive_sequence(&mut self.engine, timer, on_event).await
    }

    /// Summary of the finished round, once its sequence has run.
    #[must_use]
    pub fn summary(&self) -> Option<RoundSummary> {
        if !self.engine.is_resolved() {
            return None;
        }
        RoundSummary::from_engine(&self.engine, self.date)
    }
}
