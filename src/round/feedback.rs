//! Mapping guess results to player-facing feedback.

use serde::{Deserialize, Serialize};

use super::guess::GuessResult;

/// Animation the presentation layer should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    None,
    /// Wrong guess.
    Shake,
    /// Three of four.
    NearMiss,
    /// A category was found.
    Reveal,
    /// The puzzle was solved.
    Celebrate,
}

/// Message and cue for one guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message: Option<&'static str>,
    pub cue: Cue,
}

impl Feedback {
    /// Feedback for `result`, given the mistakes spent when it was returned.
    ///
    /// The win message gets warmer the fewer mistakes were made.
    #[must_use]
    pub fn for_result(result: GuessResult, mistakes_made: u8) -> Self {
        let (message, cue) = match result {
            GuessResult::Correct => (None, Cue::Reveal),
            GuessResult::Incorrect => (None, Cue::Shake),
            GuessResult::OneAway => (Some("One away..."), Cue::NearMiss),
            GuessResult::Same => (Some("Already guessed!"), Cue::None),
            GuessResult::Loss => (Some("Next time!"), Cue::Shake),
            GuessResult::Win => (Some(win_message(mistakes_made)), Cue::Celebrate),
        };
        Self { message, cue }
    }
}

fn win_message(mistakes_made: u8) -> &'static str {
    match mistakes_made {
        0 => "Perfect!",
        1 => "Great!",
        2 => "Solid!",
        _ => "Phew!",
    }
}
