//! Deterministic random number generation for board ordering.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal and shuffles
//! - **Context streams**: The initial deal and later shuffles draw from
//!   independent streams, so extra shuffles never change the next deal
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use rust_connections::core::BoardRng;
//!
//! let mut a = BoardRng::new(7);
//! let mut b = BoardRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG used to permute the board.
#[derive(Clone, Debug)]
pub struct BoardRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BoardRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a freshly drawn seed.
    ///
    /// The seed is kept so the board can still be replayed from `state()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> BoardRngState {
        BoardRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &BoardRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of how many
/// shuffles have happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRngState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut BoardRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = BoardRng::new(42);
        let mut rng2 = BoardRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = BoardRng::new(1);
        let mut rng2 = BoardRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = BoardRng::new(42);
        let mut deal = rng.for_context("deal");
        let mut shuffle = rng.for_context("shuffle");

        assert_ne!(shuffled(&mut deal), shuffled(&mut shuffle));
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = BoardRng::new(42).for_context("deal");
        let mut ctx2 = BoardRng::new(42).for_context("deal");

        assert_eq!(shuffled(&mut ctx1), shuffled(&mut ctx2));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = BoardRng::new(42);
        let mut data = shuffled(&mut rng);

        assert_ne!(data, (0..16).collect::<Vec<_>>());
        data.sort_unstable();
        assert_eq!(data, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = BoardRng::new(42);
        let _ = shuffled(&mut rng);

        let state = rng.state();
        let expected = shuffled(&mut rng);

        let mut restored = BoardRng::from_state(&state);
        assert_eq!(shuffled(&mut restored), expected);
    }

    #[test]
    fn test_state_serde() {
        let state = BoardRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: BoardRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
