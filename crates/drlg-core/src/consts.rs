//! Core generator constants

/// Coarse dungeon grid dimensions (one cell = one tile)
pub const DMAXX: usize = 40;
pub const DMAXY: usize = 40;

/// Doubled-resolution intermediate grid dimensions
pub const L5_DMAXX: usize = 80;
pub const L5_DMAXY: usize = 80;

/// Offset from grid coordinates to world coordinates; each grid cell covers
/// a 2x2 block of world tiles starting at this margin.
pub const WORLD_OFFSET: i32 = 16;

/// Cap on layout/stairs retries per generation request. The original looped
/// until success; a pathological seed now fails loudly instead of hanging.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;
