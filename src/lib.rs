//! # rust-connections
//!
//! Round engine for a daily word grouping puzzle: sixteen words hide four
//! categories of four, found by guessing under a mistake budget.
//!
//! ## Design Principles
//!
//! 1. **One owner**: A `RoundEngine` holds all round state. Callers mutate it
//!    only through its operations; there is no global game object.
//!
//! 2. **Derived views**: The selection is computed from the board on every
//!    read, never stored twice.
//!
//! 3. **Silent preconditions**: Input that arrives at the wrong time (after
//!    the round ended, with three words selected) is ignored, not an error.
//!
//! 4. **Explicit sequencing**: End-of-round reveals are queued steps with
//!    delays, driven either all at once or through a `Timer`.
//!
//! ## Modules
//!
//! - `core`: Word identity, board tiles, RNG, configuration
//! - `puzzle`: Validated puzzles and the providers that fetch them
//! - `round`: The round engine, timed sequences, session, summaries

pub mod core;
pub mod puzzle;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    BoardRng, BoardRngState,
    EngineConfig, ProviderConfig,
    Level, Word, WordId,
};

pub use crate::puzzle::{
    Category, Puzzle, PuzzleError,
    DatedPuzzle, PuzzleProvider, ProviderError,
    MemoryProvider, SheetProvider,
};

pub use crate::round::{
    RoundEngine, RoundOutcome, Selection,
    Guess, GuessHistory, GuessRecord, GuessResult,
    SequenceEvent, SequenceStep, Timer, TokioTimer, ImmediateTimer, drive_sequence,
    BoardSnapshot, Feedback, Cue, RoundSummary, GameSession,
};
