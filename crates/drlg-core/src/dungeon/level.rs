//! Generation session state and committed level output
//!
//! The original kept the working grid, the flag bitsets, and the layout
//! choices in file-scope globals; here they are fields of an explicit
//! [`GenerationSession`] passed through every stage, so sessions are
//! test-isolated and nothing hides between runs.

use serde::{Deserialize, Serialize};

use crate::{GameRng, DMAXX, DMAXY, L5_DMAXX, L5_DMAXY};

use super::grid::{Bitset2d, DungeonGrid, GridRect, Point};

/// All mutable state owned by one generation request.
pub struct GenerationSession {
    /// Coarse working tile grid
    pub dungeon: DungeonGrid,
    /// Doubled-resolution intermediate grid used by the block-to-tile pass
    pub l5: Box<[[u8; L5_DMAXY]; L5_DMAXX]>,
    /// Cells later passes must never overwrite
    pub protected: Bitset2d,
    /// Cells inside one of the three anchor chambers (no wall growth)
    pub chamber: Bitset2d,
    /// The single sequential random stream for the whole request
    pub rng: GameRng,
    /// Vertical (true) or horizontal layout
    pub vertical_layout: bool,
    /// Which of the three anchor chambers exist
    pub has_chamber1: bool,
    pub has_chamber2: bool,
    pub has_chamber3: bool,
    /// Where a themed special room or quest set-piece was stamped
    pub set_piece: Option<GridRect>,
    /// Spawn point for the entry context, in world coordinates
    pub view_position: Option<Point>,
    /// Poison-water entrance position (world coordinates), when placed
    pub pwater_position: Option<Point>,
}

impl GenerationSession {
    pub fn new(rng: GameRng) -> Self {
        Self {
            dungeon: DungeonGrid::new(),
            l5: Box::new([[0; L5_DMAXY]; L5_DMAXX]),
            protected: Bitset2d::new(),
            chamber: Bitset2d::new(),
            rng,
            vertical_layout: false,
            has_chamber1: false,
            has_chamber2: false,
            has_chamber3: false,
            set_piece: None,
            view_position: None,
            pwater_position: None,
        }
    }

    /// Reset the working grid and both flag sets for a fresh attempt
    /// (the original's `InitDungeonFlags`).
    pub fn reset_attempt(&mut self) {
        self.dungeon.fill(0);
        self.protected.reset();
        self.chamber.reset();
    }
}

/// Sentinel coordinates the crypt theme reports to quest logic, found by
/// scanning the committed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptMarkers {
    /// Hidden-boss trigger cell (world coordinates)
    pub uber_trigger: Option<Point>,
    /// Lever/cornerstone cell (world coordinates)
    pub cornerstone: Option<Point>,
}

/// A successfully generated, committed level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonLevel {
    /// The committed tile grid
    pub tiles: DungeonGrid,
    /// Spawn point for the request's entry context (world coordinates)
    pub view_position: Point,
    /// Where a themed special room or quest set-piece was stamped, if any
    pub set_piece: Option<GridRect>,
    /// Crypt-theme sentinel coordinates (empty markers for the cathedral)
    pub crypt_markers: CryptMarkers,
    /// Poison-water entrance position (world coordinates), when placed
    pub pwater_position: Option<Point>,
    /// Seed the level was generated from
    pub seed: u32,
    /// Number of full generation attempts consumed
    pub attempts: u32,
}

impl DungeonLevel {
    /// Count of cells holding `tile` (scan helper for quest/trigger logic).
    pub fn count(&self, tile: u8) -> usize {
        self.tiles.count(tile)
    }

    /// First cell holding `tile`, scanning columns outer / rows inner as the
    /// original's sentinel scans did.
    pub fn find(&self, tile: u8) -> Option<Point> {
        for j in 0..DMAXY {
            for i in 0..DMAXX {
                if self.tiles.tiles[i][j] == tile {
                    return Some(Point::new(i as i32, j as i32));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_attempt_clears_state() {
        let mut session = GenerationSession::new(GameRng::new(1));
        session.dungeon.tiles[5][5] = 13;
        session.protected.set(5, 5);
        session.chamber.set(6, 6);
        session.reset_attempt();
        assert_eq!(session.dungeon.count(0), DMAXX * DMAXY);
        assert!(!session.protected.test(5, 5));
        assert!(!session.chamber.test(6, 6));
    }
}
