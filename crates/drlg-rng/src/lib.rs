//! Borland-style linear congruential generator - Rust port
//!
//! This is a faithful port of the pseudo-random number generator used by the
//! original 1996 engine (the Borland C/C++ runtime LCG). The entire level
//! generator is deterministic given a seed precisely because every bounded
//! draw goes through this one sequential stream; the multiplier, increment,
//! and the quirky absolute-value / high-bit-bounding behavior are preserved
//! bit for bit.

use serde::{Deserialize, Serialize};

/// LCG multiplier (Borland runtime).
const MULTIPLIER: u32 = 0x015A_4E35;
/// LCG increment.
const INCREMENT: u32 = 1;

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name (e.g. "advance", "generate_rnd")
    pub func: &'static str,
    /// Argument (e.g. modulus for generate_rnd)
    pub arg: i32,
    /// Result value
    pub result: i32,
    /// Raw state word produced by the step
    pub raw: u32,
}

/// The original engine's 32-bit LCG.
///
/// State advances as `state * 0x015A4E35 + 1` (mod 2^32). The full state is
/// serialized so a generation session can be captured and resumed mid-stream.
#[derive(Clone, Serialize, Deserialize)]
pub struct GameLcg {
    /// Current state word
    state: u32,
    /// Total number of state advances (for tracing)
    call_count: u64,
    /// If true, record all bounded draws into the trace log
    #[serde(skip)]
    tracing: bool,
    /// Trace log (only populated when tracing is true)
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for GameLcg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameLcg")
            .field("state", &self.state)
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl GameLcg {
    /// Create a new generator seeded with a 32-bit value.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Reseed in place (matches `SetRndSeed`).
    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Current raw state word.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the LCG and return the new raw state word.
    #[inline]
    pub fn generate_seed(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.call_count += 1;
        self.state
    }

    /// Advance and return the absolute value of the state as a signed word
    /// (matches `AdvanceRndSeed`).
    ///
    /// `i32::MIN` has no positive counterpart; the original relied on the
    /// two's-complement result, so `i32::MIN` maps to itself here.
    #[inline]
    pub fn advance(&mut self) -> i32 {
        let raw = self.generate_seed();
        let res = (raw as i32).wrapping_abs();
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func: "advance",
                arg: 0,
                result: res,
                raw,
            });
        }
        res
    }

    /// Returns a value in [0, v) - matches `GenerateRnd(v)`.
    ///
    /// `v <= 0` returns 0 without consuming the stream. Small moduli
    /// (`v <= 0x7FFF`) are bounded against the high 16 bits to correct for
    /// the LCG's weak low bits, exactly as the original did.
    pub fn generate_rnd(&mut self, v: i32) -> i32 {
        if v <= 0 {
            return 0;
        }
        let res = if v <= 0x7FFF {
            (self.advance() >> 16) % v
        } else {
            self.advance() % v
        };
        if self.tracing {
            // advance() already pushed its own entry; rewrite it as the
            // bounded draw so traces read at call granularity.
            if let Some(last) = self.trace.last_mut() {
                last.func = "generate_rnd";
                last.arg = v;
                last.result = res;
            }
        }
        res
    }

    /// Enable RNG tracing
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Disable RNG tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Get current RNG trace
    pub fn trace(&self) -> Vec<RngTraceEntry> {
        self.trace.clone()
    }

    /// Total number of state advances
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for GameLcg {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sequence_from_zero_seed() {
        let mut lcg = GameLcg::new(0);
        assert_eq!(lcg.generate_seed(), 1);
        assert_eq!(lcg.generate_seed(), 0x015A_4E36);
    }

    #[test]
    fn advance_is_absolute_value() {
        let mut lcg = GameLcg::new(0);
        assert_eq!(lcg.advance(), 1);
        assert_eq!(lcg.advance(), 22_695_478);
    }

    #[test]
    fn generate_rnd_uses_high_bits_for_small_moduli() {
        let mut lcg = GameLcg::new(0);
        // first raw word is 1, so the high 16 bits are all zero
        assert_eq!(lcg.generate_rnd(100), 0);
        // second raw word is 22695478; 22695478 >> 16 == 346
        assert_eq!(lcg.generate_rnd(100), 46);
    }

    #[test]
    fn generate_rnd_non_positive_modulus() {
        let mut lcg = GameLcg::new(42);
        let before = lcg.state();
        assert_eq!(lcg.generate_rnd(0), 0);
        assert_eq!(lcg.generate_rnd(-5), 0);
        // the stream must not move for degenerate moduli
        assert_eq!(lcg.state(), before);
    }

    #[test]
    fn reproducibility() {
        let mut a = GameLcg::new(0xDEAD_BEEF);
        let mut b = GameLcg::new(0xDEAD_BEEF);
        for _ in 0..1000 {
            assert_eq!(a.generate_rnd(24), b.generate_rnd(24));
        }
        assert_eq!(a.call_count(), 1000);
    }

    #[test]
    fn trace_records_bounded_draws() {
        let mut lcg = GameLcg::new(7);
        lcg.enable_tracing();
        lcg.generate_rnd(4);
        lcg.generate_rnd(100_000);
        let trace = lcg.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].func, "generate_rnd");
        assert_eq!(trace[0].arg, 4);
        assert_eq!(trace[1].arg, 100_000);
    }

    #[test]
    fn serde_roundtrip_preserves_stream() {
        let mut lcg = GameLcg::new(1234);
        for _ in 0..17 {
            lcg.advance();
        }
        let json = serde_json::to_string(&lcg).unwrap();
        let mut restored: GameLcg = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.generate_rnd(1000), lcg.generate_rnd(1000));
    }
}
