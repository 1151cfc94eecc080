//! Block-to-tile conversion
//!
//! Expands the 40x40 room mask onto the 80x80 intermediate grid, then reads
//! 2x2 neighborhoods at odd offsets back into 40x40 tile ids through a
//! 16-entry lookup. The offset sampling is what turns solid room blocks
//! into walls around floors.

use crate::{DMAXX, DMAXY};

use super::level::GenerationSession;

/// Tile id for each 2x2 neighborhood bit pattern. Bit 0 is the sampled
/// cell itself, bit 1 its south-east neighbor, bit 2 south-west, bit 3 the
/// diagonal.
const CONV_TBL: [u8; 16] = [22, 13, 1, 13, 2, 13, 13, 13, 4, 13, 1, 13, 2, 13, 16, 13];

/// Double every room cell onto the 80x80 grid.
pub fn make_dungeon(session: &mut GenerationSession) {
    for j in 0..DMAXY {
        for i in 0..DMAXX {
            let tile = session.dungeon.tiles[i][j];
            let i2 = i * 2;
            let j2 = j * 2;
            session.l5[i2][j2] = tile;
            session.l5[i2][j2 + 1] = tile;
            session.l5[i2 + 1][j2] = tile;
            session.l5[i2 + 1][j2 + 1] = tile;
        }
    }
}

/// Resample the 80x80 grid back down to tiles. Sampling starts at (1,1)
/// and steps by 2, so each output tile sees the seam between four doubled
/// blocks.
pub fn make_dmt(session: &mut GenerationSession) {
    session.dungeon.fill(22);

    let mut dmty = 1;
    let mut j = 0;
    while dmty <= 77 {
        let mut dmtx = 1;
        let mut i = 0;
        while dmtx <= 77 {
            let val = 8 * session.l5[dmtx + 1][dmty + 1]
                + 4 * session.l5[dmtx][dmty + 1]
                + 2 * session.l5[dmtx + 1][dmty]
                + session.l5[dmtx][dmty];
            session.dungeon.tiles[i][j] = CONV_TBL[val as usize];
            i += 1;
            dmtx += 2;
        }
        j += 1;
        dmty += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    #[test]
    fn test_empty_mask_converts_to_dirt() {
        let mut session = GenerationSession::new(GameRng::new(0));
        make_dungeon(&mut session);
        make_dmt(&mut session);
        assert_eq!(session.dungeon.count(22), DMAXX * DMAXY);
    }

    #[test]
    fn test_room_interior_becomes_floor_with_wall_frame() {
        let mut session = GenerationSession::new(GameRng::new(0));
        for x in 10..20 {
            for y in 10..20 {
                session.dungeon.tiles[x][y] = 1;
            }
        }
        make_dungeon(&mut session);
        make_dmt(&mut session);

        // interior is floor; the offset sampling shifts the frame one tile
        // towards the origin
        for x in 10..20 {
            for y in 10..20 {
                assert_eq!(session.dungeon.tiles[x][y], 13, "({x},{y})");
            }
        }
        for y in 10..20 {
            assert_eq!(session.dungeon.tiles[9][y], 1);
        }
        for x in 10..20 {
            assert_eq!(session.dungeon.tiles[x][9], 2);
        }
        assert_eq!(session.dungeon.tiles[9][9], 4);
    }

    #[test]
    fn test_conversion_covers_all_patterns() {
        // every lookup entry is one of the five structural tiles
        for &tile in CONV_TBL.iter() {
            assert!(matches!(tile, 1 | 2 | 4 | 13 | 16 | 22));
        }
    }
}
