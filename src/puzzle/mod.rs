//! Puzzle data and the providers that supply it.
//!
//! - `definition`: `Category` and the validated `Puzzle`
//! - `provider`: the `PuzzleProvider` contract, date resolution, errors
//! - `memory`: fixed in-memory provider
//! - `sheet`: provider over spreadsheet value rows

pub mod definition;
pub mod provider;
pub mod memory;
pub mod sheet;

pub use definition::{Category, Puzzle, PuzzleError};
pub use provider::{parse_date, resolve_date, DatedPuzzle, ProviderError, PuzzleProvider};
pub use memory::MemoryProvider;
pub use sheet::SheetProvider;
