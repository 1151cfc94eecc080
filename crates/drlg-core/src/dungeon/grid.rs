//! Grid storage for a generation session
//!
//! Fixed-size tile grid plus the 2D bitsets tracking protected and chamber
//! cells (port of the original's `Bitset2d<DMAXX, DMAXY>`).

use serde::{Deserialize, Serialize};

use crate::{DMAXX, DMAXY};

/// A tile-grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a grid coordinate to world coordinates; each grid cell covers
    /// a 2x2 world block starting at the world margin.
    pub const fn mega_to_world(self) -> Point {
        Point {
            x: 2 * self.x + crate::WORLD_OFFSET,
            y: 2 * self.y + crate::WORLD_OFFSET,
        }
    }
}

/// An offset between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Displacement {
    pub x: i32,
    pub y: i32,
}

impl Displacement {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::ops::Add<Displacement> for Point {
    type Output = Point;

    fn add(self, rhs: Displacement) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Diagonal screen directions. Tile space is rotated 45 degrees from screen
/// space, so these map to the four cardinal grid offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const fn displacement(self) -> Displacement {
        match self {
            Direction::NorthWest => Displacement { x: -1, y: 0 },
            Direction::NorthEast => Displacement { x: 0, y: -1 },
            Direction::SouthWest => Displacement { x: 0, y: 1 },
            Direction::SouthEast => Displacement { x: 1, y: 0 },
        }
    }
}

impl core::ops::Add<Direction> for Point {
    type Output = Point;

    fn add(self, rhs: Direction) -> Point {
        self + rhs.displacement()
    }
}

/// A rectangle in grid coordinates (origin + size). Used to report where a
/// special room was stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub position: Point,
    pub width: i32,
    pub height: i32,
}

/// The coarse working tile grid, indexed `(x, y)`.
///
/// Cells hold raw tile IDs from the closed vocabulary in
/// [`tile`](super::tile). Fixed dimensions; never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonGrid {
    pub tiles: [[u8; DMAXY]; DMAXX],
}

// Manual serde for the grid; serde has no impls for 40-element arrays.
// Serialized as a flat row of columns.
impl Serialize for DungeonGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(DMAXX * DMAXY))?;
        for column in &self.tiles {
            for tile in column {
                seq.serialize_element(tile)?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for DungeonGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let flat = Vec::<u8>::deserialize(deserializer)?;
        if flat.len() != DMAXX * DMAXY {
            return Err(serde::de::Error::invalid_length(
                flat.len(),
                &"a DMAXX * DMAXY tile grid",
            ));
        }
        let mut grid = DungeonGrid::new();
        for (i, tile) in flat.into_iter().enumerate() {
            grid.tiles[i / DMAXY][i % DMAXY] = tile;
        }
        Ok(grid)
    }
}

impl DungeonGrid {
    pub fn new() -> Self {
        Self {
            tiles: [[0; DMAXY]; DMAXX],
        }
    }

    /// Set every cell to `tile`.
    pub fn fill(&mut self, tile: u8) {
        for column in &mut self.tiles {
            column.fill(tile);
        }
    }

    pub const fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < DMAXX as i32 && y >= 0 && y < DMAXY as i32
    }

    /// Bounds-checked read, for neighbor probes that may walk off the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if Self::in_bounds(x, y) {
            Some(self.tiles[x as usize][y as usize])
        } else {
            None
        }
    }

    pub fn get_point(&self, p: Point) -> Option<u8> {
        self.get(p.x, p.y)
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: u8) -> usize {
        self.tiles
            .iter()
            .flat_map(|column| column.iter())
            .filter(|&&t| t == tile)
            .count()
    }
}

impl Default for DungeonGrid {
    fn default() -> Self {
        Self::new()
    }
}

const BITSET_WORDS: usize = (DMAXX * DMAXY).div_ceil(64);

/// A bitset over the coarse grid dimensions.
///
/// Bits are only ever set during a generation attempt; the whole set resets
/// between retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitset2d {
    bits: [u64; BITSET_WORDS],
}

impl Bitset2d {
    pub fn new() -> Self {
        Self {
            bits: [0; BITSET_WORDS],
        }
    }

    #[inline]
    fn index(x: usize, y: usize) -> (usize, u64) {
        debug_assert!(x < DMAXX && y < DMAXY);
        let bit = x * DMAXY + y;
        (bit / 64, 1u64 << (bit % 64))
    }

    pub fn set(&mut self, x: usize, y: usize) {
        let (word, mask) = Self::index(x, y);
        self.bits[word] |= mask;
    }

    pub fn test(&self, x: usize, y: usize) -> bool {
        let (word, mask) = Self::index(x, y);
        self.bits[word] & mask != 0
    }

    /// Clear every bit.
    pub fn reset(&mut self) {
        self.bits = [0; BITSET_WORDS];
    }
}

impl Default for Bitset2d {
    fn default() -> Self {
        Self::new()
    }
}
