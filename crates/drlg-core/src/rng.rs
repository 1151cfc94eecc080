//! Random number generation for the level generator
//!
//! Wraps the ported engine LCG (drlg-rng) so generated levels reproduce the
//! original's draw-for-draw random stream. The cursor position of this one
//! stream is part of what makes a level reproducible from its seed; callers
//! must not interleave unrelated draws during a generation session.

use drlg_rng::GameLcg;
use serde::{Deserialize, Serialize};

/// Game random number generator used throughout level generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    lcg: GameLcg,
    seed: u32,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            lcg: GameLcg::new(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Equivalent to the engine's `GenerateRnd(v)` - returns 0..v-1
    ///
    /// Returns 0 if v is not positive.
    #[inline]
    pub fn generate_rnd(&mut self, v: i32) -> i32 {
        self.lcg.generate_rnd(v)
    }

    /// Advance the stream without using the value (the original called
    /// `AdvanceRndSeed` before every wall probe; the discarded draws are
    /// load-bearing for stream compatibility).
    #[inline]
    pub fn advance(&mut self) {
        let _ = self.lcg.advance();
    }

    /// Total number of raw draws consumed so far
    pub fn call_count(&self) -> u64 {
        self.lcg.call_count()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rnd_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.generate_rnd(10);
            assert!((0..10).contains(&n));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);
        for _ in 0..100 {
            assert_eq!(rng1.generate_rnd(100), rng2.generate_rnd(100));
        }
    }

    #[test]
    fn test_advance_moves_stream() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);
        rng1.advance();
        rng1.advance();
        rng2.generate_rnd(6);
        rng2.generate_rnd(6);
        // both consumed two raw words, so the streams line up again
        assert_eq!(rng1.generate_rnd(1000), rng2.generate_rnd(1000));
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.generate_rnd(0), 0);
        assert_eq!(rng.generate_rnd(-3), 0);
    }
}
