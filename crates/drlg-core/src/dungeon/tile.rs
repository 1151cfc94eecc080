//! Tile vocabulary for the cathedral/crypt tileset
//!
//! Tile IDs are small integers drawn from a closed, authored vocabulary; the
//! grid stores raw `u8` values (decoration passes synthesize IDs by table
//! scan) and the enums here name them. The two lookup tables relate every
//! tile to its base kind (shadow matching) and its undecorated equivalence
//! class (randomized substitution); both are preserved bit-exact from the
//! original data since they encode authored level-design intent.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Core cathedral tile kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    VWall = 1,
    HWall = 2,
    Corner = 3,
    DWall = 4,
    DArch = 5,
    VWallEnd = 6,
    HWallEnd = 7,
    HArchEnd = 8,
    VArchEnd = 9,
    HArchVWall = 10,
    VArch = 11,
    HArch = 12,
    Floor = 13,
    HWallVArch = 14,
    Pillar = 15,
    Pillar1 = 16,
    Pillar2 = 17,
    Dirt = 22,
    DirtCorner = 21,
    VDoor = 25,
    HDoor = 26,
    HFenceVWall = 27,
    HDoorVDoor = 28,
    DFence = 29,
    VDoorEnd = 30,
    HDoorEnd = 31,
    VFenceEnd = 32,
    VFence = 35,
    HFence = 36,
    HWallVFence = 37,
    HArchVFence = 38,
    HArchVDoor = 39,
    EntranceStairs = 64,
}

/// Cathedral shadow variants with fence-specific forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum CathedralTile {
    HWallShadow = 148,
    HArchShadow = 149,
    HArchShadow2 = 153,
    HWallShadow2 = 154,
}

/// Crypt tile kinds (decorated wall/floor/pillar variants and shadows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum CryptTile {
    VWall5 = 89,
    VWall6 = 90,
    VWall7 = 91,
    HWall5 = 92,
    HWall6 = 93,
    HWall7 = 94,
    VArch5 = 95,
    HArch5 = 96,
    Floor6 = 97,
    Floor7 = 98,
    Floor8 = 99,
    Floor9 = 100,
    Floor10 = 101,
    VWall2 = 112,
    HWall2 = 113,
    Corner2 = 114,
    DWall2 = 115,
    DArch2 = 116,
    VWallEnd2 = 117,
    HWallEnd2 = 118,
    HArchEnd2 = 119,
    VArchEnd2 = 120,
    HArchVWall2 = 121,
    VArch2 = 122,
    HArch2 = 123,
    Floor2 = 124,
    HWallVArch2 = 125,
    Pillar3 = 126,
    Pillar4 = 127,
    Pillar5 = 128,
    VWall3 = 129,
    HWall3 = 130,
    Corner3 = 131,
    DWall3 = 132,
    DArch3 = 133,
    VWallEnd3 = 134,
    HWallEnd3 = 135,
    HArchEnd3 = 136,
    VArchEnd3 = 137,
    HArchVWall3 = 138,
    VArch3 = 139,
    HArch3 = 140,
    Floor3 = 141,
    HWallVArch3 = 142,
    Pillar6 = 143,
    Pillar7 = 144,
    Pillar8 = 145,
    VWall4 = 146,
    HWall4 = 147,
    Corner4 = 148,
    DWall4 = 149,
    DArch4 = 150,
    VWallEnd4 = 151,
    HWallEnd4 = 152,
    HArchEnd4 = 153,
    VArchEnd4 = 154,
    HArchVWall4 = 155,
    VArch4 = 156,
    HArch4 = 157,
    Floor4 = 158,
    HWallVArch4 = 159,
    Pillar9 = 160,
    Pillar10 = 161,
    Pillar11 = 162,
    Floor11 = 163,
    Floor12 = 164,
    Floor13 = 165,
    Floor14 = 166,
    PillarHalf = 167,
    VWall8 = 173,
    VWall9 = 174,
    VWall10 = 175,
    VWall11 = 176,
    VWall12 = 177,
    VWall13 = 178,
    HWall8 = 179,
    HWall9 = 180,
    HWall10 = 181,
    HWall11 = 182,
    HWall12 = 183,
    HWall13 = 184,
    VArch6 = 185,
    VArch7 = 186,
    HArch6 = 187,
    HArch7 = 188,
    Floor15 = 189,
    Floor16 = 190,
    Floor17 = 191,
    Pillar12 = 192,
    Floor18 = 193,
    Floor19 = 194,
    Floor20 = 195,
    Floor21 = 196,
    Floor22 = 197,
    Floor23 = 198,
    VDemon = 199,
    HDemon = 200,
    VSuccubus = 201,
    HSuccubus = 202,
    Shadow1 = 203,
    Shadow2 = 204,
    Shadow3 = 205,
    Shadow4 = 206,
    Shadow5 = 207,
    Shadow6 = 208,
    Shadow7 = 209,
    Shadow8 = 210,
    Shadow9 = 211,
    Shadow10 = 212,
    Shadow11 = 213,
    Shadow12 = 214,
    Shadow13 = 215,
    Shadow14 = 216,
    Shadow15 = 217,
}

macro_rules! tile_eq {
    ($ty:ty) => {
        impl PartialEq<$ty> for u8 {
            fn eq(&self, other: &$ty) -> bool {
                *self == *other as u8
            }
        }

        impl PartialEq<u8> for $ty {
            fn eq(&self, other: &u8) -> bool {
                *self as u8 == *other
            }
        }
    };
}

tile_eq!(Tile);
tile_eq!(CathedralTile);
tile_eq!(CryptTile);

/// Maps tile IDs to their corresponding base tile kind.
pub const BASE_TYPES: [u8; 207] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9,
    10, 11, 12, 13, 14, 15, 16, 17, 0, 0,
    0, 0, 0, 0, 0, 1, 2, 10, 4, 5,
    6, 7, 8, 9, 10, 11, 12, 14, 5, 14,
    10, 4, 14, 4, 5, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    2, 3, 4, 1, 6, 7, 16, 17, 2, 1,
    1, 2, 2, 1, 1, 2, 2, 2, 2, 2,
    1, 1, 11, 1, 13, 13, 13, 1, 2, 1,
    2, 1, 2, 1, 2, 2, 2, 2, 12, 0,
    0, 11, 1, 11, 1, 13, 0, 0, 0, 0,
    0, 0, 0, 13, 13, 13, 13, 13, 13, 13,
    13, 13, 13, 13, 13, 13, 1, 11, 2, 12,
    13, 13, 13, 12, 2, 1, 2, 2, 4, 14,
    4, 10, 13, 13, 4, 4, 1, 1, 4, 2,
    2, 13, 13, 13, 13, 25, 26, 28, 30, 31,
    41, 43, 40, 41, 42, 43, 25, 41, 43, 28,
    28, 1, 2, 25, 26, 22, 22, 25, 26, 0,
    0, 0, 0, 0, 0, 0, 0,
];

/// Maps tile IDs to their corresponding undecorated tile ID (0 = the tile
/// takes no part in randomized substitution).
pub const UNDECORATED: [u8; 207] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9,
    10, 11, 12, 13, 14, 15, 16, 17, 0, 0,
    0, 0, 0, 0, 0, 25, 26, 0, 28, 0,
    30, 31, 0, 0, 0, 0, 0, 0, 0, 0,
    40, 41, 42, 43, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 79,
    80, 0, 82, 0, 0, 0, 0, 0, 0, 79,
    0, 80, 0, 0, 79, 80, 0, 2, 2, 2,
    1, 1, 11, 25, 13, 13, 13, 1, 2, 1,
    2, 1, 2, 1, 2, 2, 2, 2, 12, 0,
    0, 11, 1, 11, 1, 13, 0, 0, 0, 0,
    0, 0, 0, 13, 13, 13, 13, 13, 13, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0,
];

/// Base tile kind of `tile` (shadow matching). Indexing past the table is a
/// static-data contract violation and panics.
#[inline]
pub fn base_kind(tile: u8) -> u8 {
    BASE_TYPES[tile as usize]
}

/// Undecorated equivalence class of `tile` (randomized substitution).
#[inline]
pub fn undecorated(tile: u8) -> u8 {
    UNDECORATED[tile as usize]
}

/// The fence family checked by the shadow corrective sweep.
pub fn is_fence_family(tile: u8) -> bool {
    tile == Tile::DFence
        || tile == Tile::VFenceEnd
        || tile == Tile::VFence
        || tile == Tile::HWallVFence
        || tile == Tile::HArchVFence
        || tile == Tile::HArchVDoor
}
