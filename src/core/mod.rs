//! Core types: word identity, board tiles, RNG, configuration.
//!
//! Everything here is puzzle-agnostic. The puzzle and round modules build on
//! these types without redefining them.

pub mod word;
pub mod rng;
pub mod config;

pub use word::{Level, Word, WordId, CATEGORY_COUNT, WORDS_PER_CATEGORY};
pub use rng::{BoardRng, BoardRngState};
pub use config::{EngineConfig, ProviderConfig};
