//! Tile correction sweeps
//!
//! The wall pass leaves seams where runs meet rooms and dirt. These sweeps
//! rewrite local two-tile patterns into the proper join tiles. Rule order
//! is significant: each sweep reads its own writes, and the second sweep
//! depends on tiles introduced by the first.

use super::level::GenerationSession;
use crate::{DMAXX, DMAXY};

pub fn fix_tiles_patterns(session: &mut GenerationSession) {
    let d = &mut session.dungeon.tiles;

    for j in 0..DMAXY {
        for i in 0..DMAXX {
            if i + 1 < DMAXX {
                if d[i][j] == 2 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 23;
                }
                if d[i][j] == 13 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 18;
                }
                if d[i][j] == 13 && d[i + 1][j] == 2 {
                    d[i + 1][j] = 7;
                }
                if d[i][j] == 6 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 24;
                }
            }
            if j + 1 < DMAXY {
                if d[i][j] == 1 && d[i][j + 1] == 22 {
                    d[i][j + 1] = 24;
                }
                if d[i][j] == 13 && d[i][j + 1] == 1 {
                    d[i][j + 1] = 6;
                }
                if d[i][j] == 13 && d[i][j + 1] == 22 {
                    d[i][j + 1] = 19;
                }
            }
        }
    }

    for j in 0..DMAXY {
        for i in 0..DMAXX {
            if i + 1 < DMAXX {
                if d[i][j] == 13 && d[i + 1][j] == 19 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 13 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 20;
                }
                if d[i][j] == 7 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 23;
                }
                if d[i][j] == 13 && d[i + 1][j] == 24 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 19 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 20;
                }
                if d[i][j] == 2 && d[i + 1][j] == 19 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 19 && d[i + 1][j] == 1 {
                    d[i + 1][j] = 6;
                }
                if d[i][j] == 7 && d[i + 1][j] == 19 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 2 && d[i + 1][j] == 1 {
                    d[i + 1][j] = 6;
                }
                if d[i][j] == 3 && d[i + 1][j] == 22 {
                    d[i + 1][j] = 24;
                }
                if d[i][j] == 21 && d[i + 1][j] == 1 {
                    d[i + 1][j] = 6;
                }
                if d[i][j] == 7 && d[i + 1][j] == 1 {
                    d[i + 1][j] = 6;
                }
                if d[i][j] == 7 && d[i + 1][j] == 24 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 4 && d[i + 1][j] == 16 {
                    d[i + 1][j] = 17;
                }
                if d[i][j] == 7 && d[i + 1][j] == 13 {
                    d[i + 1][j] = 17;
                }
                if d[i][j] == 2 && d[i + 1][j] == 24 {
                    d[i + 1][j] = 21;
                }
                if d[i][j] == 2 && d[i + 1][j] == 13 {
                    d[i + 1][j] = 17;
                }
            }
            if i > 0 {
                if d[i][j] == 23 && d[i - 1][j] == 22 {
                    d[i - 1][j] = 19;
                }
                if d[i][j] == 19 && d[i - 1][j] == 23 {
                    d[i - 1][j] = 21;
                }
                if d[i][j] == 6 && d[i - 1][j] == 22 {
                    d[i - 1][j] = 24;
                }
                if d[i][j] == 6 && d[i - 1][j] == 23 {
                    d[i - 1][j] = 21;
                }
            }
            if j + 1 < DMAXY {
                if d[i][j] == 1 && d[i][j + 1] == 2 {
                    d[i][j + 1] = 7;
                }
                if d[i][j] == 6 && d[i][j + 1] == 18 {
                    d[i][j + 1] = 21;
                }
                if d[i][j] == 18 && d[i][j + 1] == 2 {
                    d[i][j + 1] = 7;
                }
                if d[i][j] == 6 && d[i][j + 1] == 2 {
                    d[i][j + 1] = 7;
                }
                if d[i][j] == 21 && d[i][j + 1] == 2 {
                    d[i][j + 1] = 7;
                }
                if d[i][j] == 6 && d[i][j + 1] == 22 {
                    d[i][j + 1] = 24;
                }
                if d[i][j] == 6 && d[i][j + 1] == 13 {
                    d[i][j + 1] = 16;
                }
                if d[i][j] == 1 && d[i][j + 1] == 13 {
                    d[i][j + 1] = 16;
                }
                if d[i][j] == 13 && d[i][j + 1] == 16 {
                    d[i][j + 1] = 17;
                }
            }
            if j > 0 {
                // the first pair shares a pattern; only the first write
                // ever fires, kept for rewrite-order fidelity
                if d[i][j] == 6 && d[i][j - 1] == 22 {
                    d[i][j - 1] = 7;
                }
                if d[i][j] == 6 && d[i][j - 1] == 22 {
                    d[i][j - 1] = 24;
                }
                if d[i][j] == 7 && d[i][j - 1] == 24 {
                    d[i][j - 1] = 21;
                }
                if d[i][j] == 18 && d[i][j - 1] == 24 {
                    d[i][j - 1] = 21;
                }
            }
        }
    }

    for j in 0..DMAXY {
        for i in 0..DMAXX {
            if j + 1 < DMAXY && d[i][j] == 4 && d[i][j + 1] == 2 {
                d[i][j + 1] = 7;
            }
            if i + 1 < DMAXX && d[i][j] == 2 && d[i + 1][j] == 19 {
                d[i + 1][j] = 21;
            }
            if j + 1 < DMAXY && d[i][j] == 18 && d[i][j + 1] == 22 {
                d[i][j + 1] = 20;
            }
        }
    }
}

/// Replace dirt-edge tiles that lack a continuing neighbor with their
/// sealed variants.
pub fn fix_dirt_tiles(session: &mut GenerationSession) {
    let d = &mut session.dungeon.tiles;
    for j in 0..DMAXY - 1 {
        for i in 0..DMAXX - 1 {
            if d[i][j] == 21 && d[i + 1][j] != 19 {
                d[i][j] = 202;
            }
            if d[i][j] == 19 && d[i + 1][j] != 19 {
                d[i][j] = 200;
            }
            if d[i][j] == 24 && d[i + 1][j] != 19 {
                d[i][j] = 205;
            }
            if d[i][j] == 18 && d[i][j + 1] != 18 {
                d[i][j] = 199;
            }
            if d[i][j] == 21 && d[i][j + 1] != 18 {
                d[i][j] = 202;
            }
            if d[i][j] == 23 && d[i][j + 1] != 18 {
                d[i][j] = 204;
            }
        }
    }
}

/// Crypt tilesets map every dirt-edge tile to a dedicated id instead.
pub fn fix_crypt_dirt_tiles(session: &mut GenerationSession) {
    let d = &mut session.dungeon.tiles;
    for j in 0..DMAXY - 1 {
        for i in 0..DMAXX - 1 {
            if d[i][j] == 19 {
                d[i][j] = 83;
            }
            if d[i][j] == 21 {
                d[i][j] = 85;
            }
            if d[i][j] == 23 {
                d[i][j] = 87;
            }
            if d[i][j] == 24 {
                d[i][j] = 88;
            }
            if d[i][j] == 18 {
                d[i][j] = 82;
            }
        }
    }
}

pub fn fix_corner_tiles(session: &mut GenerationSession) {
    for j in 1..DMAXY - 1 {
        for i in 1..DMAXX - 1 {
            let d = &mut session.dungeon.tiles;
            if !session.protected.test(i, j)
                && d[i][j] == 17
                && d[i - 1][j] == 13
                && d[i][j - 1] == 1
            {
                d[i][j] = 16;
            }
            if d[i][j] == 202 && d[i + 1][j] == 13 && d[i][j + 1] == 1 {
                d[i][j] = 8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    fn dirt_session() -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(0));
        session.dungeon.fill(22);
        session
    }

    #[test]
    fn test_floor_next_to_dirt_becomes_edge() {
        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 13;
        fix_tiles_patterns(&mut session);
        // first sweep turns the east and south dirt neighbors into edges
        assert_eq!(session.dungeon.tiles[11][10], 18);
        assert_eq!(session.dungeon.tiles[10][11], 19);
    }

    #[test]
    fn test_wall_end_gets_cap() {
        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 13;
        session.dungeon.tiles[11][10] = 2;
        fix_tiles_patterns(&mut session);
        // a horizontal wall east of floor is rewritten to a wall end
        assert_eq!(session.dungeon.tiles[11][10], 7);
    }

    #[test]
    fn test_dirt_sweep_seals_isolated_edges() {
        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 19;
        fix_dirt_tiles(&mut session);
        assert_eq!(session.dungeon.tiles[10][10], 200);

        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 19;
        session.dungeon.tiles[11][10] = 19;
        fix_dirt_tiles(&mut session);
        // a continuing east edge keeps the tile; the run's last tile seals
        assert_eq!(session.dungeon.tiles[10][10], 19);
        assert_eq!(session.dungeon.tiles[11][10], 200);
    }

    #[test]
    fn test_crypt_dirt_sweep_remaps_all_edges() {
        let mut session = dirt_session();
        session.dungeon.tiles[5][5] = 19;
        session.dungeon.tiles[6][5] = 21;
        session.dungeon.tiles[7][5] = 23;
        session.dungeon.tiles[8][5] = 24;
        session.dungeon.tiles[9][5] = 18;
        fix_crypt_dirt_tiles(&mut session);
        assert_eq!(session.dungeon.tiles[5][5], 83);
        assert_eq!(session.dungeon.tiles[6][5], 85);
        assert_eq!(session.dungeon.tiles[7][5], 87);
        assert_eq!(session.dungeon.tiles[8][5], 88);
        assert_eq!(session.dungeon.tiles[9][5], 82);
        // the last row and column are left alone
        let mut session = dirt_session();
        session.dungeon.tiles[DMAXX - 1][5] = 19;
        fix_crypt_dirt_tiles(&mut session);
        assert_eq!(session.dungeon.tiles[DMAXX - 1][5], 19);
    }

    #[test]
    fn test_corner_fix_respects_protection() {
        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 17;
        session.dungeon.tiles[9][10] = 13;
        session.dungeon.tiles[10][9] = 1;
        fix_corner_tiles(&mut session);
        assert_eq!(session.dungeon.tiles[10][10], 16);

        let mut session = dirt_session();
        session.dungeon.tiles[10][10] = 17;
        session.dungeon.tiles[9][10] = 13;
        session.dungeon.tiles[10][9] = 1;
        session.protected.set(10, 10);
        fix_corner_tiles(&mut session);
        assert_eq!(session.dungeon.tiles[10][10], 17);
    }
}
