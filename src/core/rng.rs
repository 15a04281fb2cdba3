//! Randomness for pitch resolution and CPU decisions.
//!
//! Every draw the engine makes goes through [`RandomSource`]. The default
//! source is [`GameRng`], a seeded ChaCha8 stream whose position can be
//! checkpointed next to a saved `GameState` and resumed later.
//!
//! ```
//! use rust_baseball::core::{GameRng, RandomSource};
//!
//! let mut first = GameRng::new(42);
//! let mut replay = GameRng::new(42);
//! assert_eq!(first.next_f64(), replay.next_f64());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Uniform randomness consumed by the sampler and the CPU models.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// `true` with probability `p`, clamped to `[0, 1]`. One draw.
    fn gen_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p.clamp(0.0, 1.0)
    }
}

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Checkpoint the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a checkpointed stream exactly where it left off.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.stream.gen::<f64>()
    }
}

/// Serializable position of a [`GameRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha word position.
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<u64> {
        (0..n).map(|_| rng.next_f64().to_bits()).collect()
    }

    #[test]
    fn test_same_seed_same_stream() {
        assert_eq!(draws(&mut GameRng::new(9), 50), draws(&mut GameRng::new(9), 50));
        assert_ne!(draws(&mut GameRng::new(9), 10), draws(&mut GameRng::new(10), 10));
    }

    #[test]
    fn test_draws_in_unit_interval() {
        let mut rng = GameRng::new(7);
        assert!((0..1000).all(|_| (0.0..1.0).contains(&rng.next_f64())));
    }

    #[test]
    fn test_gen_bool_clamps() {
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            assert!(!rng.gen_bool(-0.5));
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
            assert!(rng.gen_bool(2.0));
        }
    }

    #[test]
    fn test_checkpoint_resumes_mid_game() {
        let mut rng = GameRng::new(2024);
        draws(&mut rng, 137);

        let checkpoint = rng.state();
        let json = serde_json::to_string(&checkpoint).unwrap();
        let expected = draws(&mut rng, 20);

        let restored: GameRngState = serde_json::from_str(&json).unwrap();
        let mut resumed = GameRng::from_state(&restored);
        assert_eq!(resumed.seed(), 2024);
        assert_eq!(draws(&mut resumed, 20), expected);
    }
}
