//! Round engine: selection, guess evaluation, and end-of-round sequencing.
//!
//! `RoundEngine` is the only stateful piece. Everything else in this module
//! either describes its outputs (`GuessResult`, `BoardSnapshot`,
//! `RoundSummary`, `Feedback`) or drives it (`drive_sequence`, `GameSession`).

pub mod guess;
pub mod engine;
pub mod sequence;
pub mod snapshot;
pub mod feedback;
pub mod summary;
pub mod session;

pub use guess::{Guess, GuessHistory, GuessRecord, GuessResult, RoundOutcome};
pub use engine::{RoundEngine, Selection};
pub use sequence::{drive_sequence, ImmediateTimer, SequenceEvent, SequenceStep, TimedStep, Timer, TokioTimer};
pub use snapshot::BoardSnapshot;
pub use feedback::{Cue, Feedback};
pub use summary::RoundSummary;
pub use session::GameSession;
