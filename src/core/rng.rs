//! Deterministic random number generation for battle resolution.
//!
//! ## Key Features
//!
//! - **Injectable**: battles draw through the `FlipSource` trait, never from
//!   a global generator
//! - **Deterministic**: same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: independent sequences for different purposes
//!
//! ## Usage
//!
//! ```
//! use rust_duel::core::{FlipSource, GameRng};
//!
//! let mut rng = GameRng::new(42);
//! let draw = rng.next_unit();
//! assert!((0.0..1.0).contains(&draw));
//!
//! // Dealing and battling use separate streams
//! let mut deal_rng = rng.for_context("deal");
//! let mut again = GameRng::new(42).for_context("deal");
//! assert_eq!(deal_rng.next_unit(), again.next_unit());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Source of uniform random draws in `[0, 1)`.
///
/// The battle machine draws exactly two values per resolved round,
/// player first, then enemy.
pub trait FlipSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Deterministic seedable RNG.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// Useful for separating randomness domains (e.g. dealing vs battles).
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl FlipSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted flip source that cycles through a fixed sequence.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
///
/// ```
/// use rust_duel::core::{FixedFlips, FlipSource};
///
/// // 0.0 is below any positive probability: always face-up.
/// let mut flips = FixedFlips::new(vec![0.0, 0.99]);
/// assert_eq!(flips.next_unit(), 0.0);
/// assert_eq!(flips.next_unit(), 0.99);
/// assert_eq!(flips.next_unit(), 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FixedFlips {
    script: Vec<f64>,
    cursor: usize,
}

impl FixedFlips {
    /// Largest value strictly below 1.0.
    const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

    /// Create from a script of draws.
    #[must_use]
    pub fn new(script: Vec<f64>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Both sides face-up against any positive probability.
    #[must_use]
    pub fn all_up() -> Self {
        Self::new(vec![0.0])
    }

    /// Both sides face-down against any probability below 1.
    #[must_use]
    pub fn all_down() -> Self {
        Self::new(vec![Self::MAX_UNIT])
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl FlipSource for FixedFlips {
    fn next_unit(&mut self) -> f64 {
        if self.script.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value.clamp(0.0, Self::MAX_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_unit(), rng2.next_unit());
        }
    }

    #[test]
    fn test_unit_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_unit()).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_unit()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("deal");
        let mut ctx2 = rng.for_context("battle");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.next_unit()).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.next_unit()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng.shuffle(&mut data);
        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.next_unit();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.next_unit()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.next_unit()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_fixed_flips_cycle_and_clamp() {
        let mut flips = FixedFlips::new(vec![0.25, 2.0, -1.0]);
        assert_eq!(flips.next_unit(), 0.25);
        assert!(flips.next_unit() < 1.0);
        assert_eq!(flips.next_unit(), 0.0);
        assert_eq!(flips.next_unit(), 0.25);
        assert_eq!(flips.drawn(), 4);
    }

    #[test]
    fn test_fixed_flips_empty() {
        let mut flips = FixedFlips::default();
        assert_eq!(flips.next_unit(), 0.0);
    }
}
