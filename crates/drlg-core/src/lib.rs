//! drlg-core: cathedral/crypt level generator
//!
//! This crate contains the dynamic random level generator for the
//! cathedral/crypt level family with no I/O dependencies. It is designed to
//! be pure and testable: one `generate` call owns all of its working state
//! and returns a committed level, so generation is deterministic for a given
//! request and can run isolated in tests.

pub mod dungeon;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
