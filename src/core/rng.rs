//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Injectable**: Combat code only sees the [`RandomSource`] trait
//! - **Serializable**: O(1) state capture and restore
//! - **Scriptable**: [`ScriptedRolls`] replays a fixed sequence for tests
//!
//! ## Usage
//!
//! ```
//! use grimoire_duel::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness for combat.
///
/// The engine draws exactly one `next_f64` per damage computation (the
/// critical-hit roll), so a substituted source fully determines outcomes.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Seeded RNG used by default.
///
/// Uses ChaCha8 for speed while keeping a reproducible, checkpointable stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
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
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range_usize(0..len)
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
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// A fixed, cycling sequence of rolls.
///
/// `next_f64` walks the roll list and wraps around; `next_index` reduces the
/// same values onto `0..len`. An empty list always rolls `0.999`, which never
/// crits for wisdom below 100.
///
/// ```
/// use grimoire_duel::core::{RandomSource, ScriptedRolls};
///
/// let mut rolls = ScriptedRolls::new([0.1, 0.9]);
/// assert_eq!(rolls.next_f64(), 0.1);
/// assert_eq!(rolls.next_f64(), 0.9);
/// assert_eq!(rolls.next_f64(), 0.1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    cursor: usize,
    drawn: usize,
}

impl ScriptedRolls {
    /// Create a source that replays `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            cursor: 0,
            drawn: 0,
        }
    }

    /// A source that never produces a critical hit.
    #[must_use]
    pub fn never_critical() -> Self {
        Self::new([0.999])
    }

    /// A source that always produces a critical hit for any wisdom above 0.
    #[must_use]
    pub fn always_critical() -> Self {
        Self::new([0.0])
    }

    /// How many values have been drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRolls {
    fn next_f64(&mut self) -> f64 {
        self.drawn += 1;
        if self.rolls.is_empty() {
            return 0.999;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }

    fn next_index(&mut self, len: usize) -> usize {
        let roll = self.next_f64().clamp(0.0, 0.999_999);
        ((roll * len as f64) as usize).min(len.saturating_sub(1))
    }
}
