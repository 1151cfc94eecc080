//! Cathedral and crypt level synthesis
//!
//! The passes run in a fixed order over one [`GenerationSession`]: room
//! layout, block-to-tile conversion, chamber filling, tile fixes, wall
//! growth, stairs, then theme decoration. [`generation::generate`] drives
//! the whole pipeline.

mod chambers;
mod convert;
mod decorate;
mod fixes;
mod generation;
mod grid;
mod level;
mod miniset;
mod rooms;
mod setpiece;
mod shadows;
mod stairs;
mod tile;
mod walls;

pub use chambers::{fill_chambers, ChamberSetRoom};
pub use convert::{make_dmt, make_dungeon};
pub use decorate::{decorate_cathedral, decorate_crypt, fill_floor, substitute_tiles};
pub use fixes::{fix_corner_tiles, fix_crypt_dirt_tiles, fix_dirt_tiles, fix_tiles_patterns};
pub use generation::{
    generate, EntryContext, GenerationError, LevelRequest, LevelTheme, QuestFlags,
};
pub use grid::{Bitset2d, Direction, Displacement, DungeonGrid, GridRect, Point};
pub use level::{CryptMarkers, DungeonLevel, GenerationSession};
pub use miniset::{place_miniset, place_miniset_random, place_miniset_random_1x1, Miniset};
pub use rooms::{find_area, first_room};
pub use setpiece::{set_set_piece_room, SetPieceError, SetPieceOverlay};
pub use shadows::{apply_crypt_shadow_patterns, apply_shadow_patterns};
pub use stairs::place_stairs;
pub use tile::{base_kind, is_fence_family, undecorated, CathedralTile, CryptTile, Tile};
pub use walls::add_wall;
