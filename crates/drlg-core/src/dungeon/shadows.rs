//! Shadow passes
//!
//! Arches, pillars and wall ends cast baked shadows onto the floor tiles
//! south-west of them. The cathedral variant is table driven over 2x2
//! neighborhoods of base kinds; the crypt variant keys directly off the
//! decorated tile ids.

use super::level::GenerationSession;
use super::tile::{base_kind, is_fence_family};
use crate::{DMAXX, DMAXY};

/// One shadow rule: when the 2x2 neighborhood of base kinds around a
/// trigger tile matches (`0` entries are wildcards), the three cells
/// north-west, north and west of the trigger are rewritten.
struct ShadowPattern {
    trigger: u8,
    s1: u8,
    s2: u8,
    s3: u8,
    nv1: u8,
    nv2: u8,
    nv3: u8,
}

const fn sp(trigger: u8, s1: u8, s2: u8, s3: u8, nv1: u8, nv2: u8, nv3: u8) -> ShadowPattern {
    ShadowPattern {
        trigger,
        s1,
        s2,
        s3,
        nv1,
        nv2,
        nv3,
    }
}

const SHADOW_PATTERNS: [ShadowPattern; 37] = [
    sp(7, 13, 0, 13, 144, 0, 142),
    sp(16, 13, 0, 13, 144, 0, 142),
    sp(15, 13, 0, 13, 145, 0, 142),
    sp(5, 13, 13, 13, 152, 140, 139),
    sp(5, 13, 1, 13, 143, 146, 139),
    sp(5, 13, 13, 2, 143, 140, 148),
    sp(5, 0, 1, 2, 0, 146, 148),
    sp(5, 13, 11, 13, 143, 147, 139),
    sp(5, 13, 13, 12, 143, 140, 149),
    sp(5, 13, 11, 12, 150, 147, 149),
    sp(5, 13, 1, 12, 143, 146, 149),
    sp(5, 13, 11, 2, 143, 147, 148),
    sp(9, 13, 13, 13, 144, 140, 142),
    sp(9, 13, 1, 13, 144, 146, 142),
    sp(9, 13, 11, 13, 151, 147, 142),
    sp(8, 13, 0, 13, 144, 0, 139),
    sp(8, 13, 0, 12, 143, 0, 149),
    sp(8, 0, 0, 2, 0, 0, 148),
    sp(11, 0, 0, 13, 0, 0, 139),
    sp(11, 13, 0, 13, 139, 0, 139),
    sp(11, 2, 0, 13, 148, 0, 139),
    sp(11, 12, 0, 13, 149, 0, 139),
    sp(11, 13, 11, 12, 139, 0, 149),
    sp(14, 0, 0, 13, 0, 0, 139),
    sp(14, 13, 0, 13, 139, 0, 139),
    sp(14, 2, 0, 13, 148, 0, 139),
    sp(14, 12, 0, 13, 149, 0, 139),
    sp(14, 13, 11, 12, 139, 0, 149),
    sp(10, 0, 13, 0, 0, 140, 0),
    sp(10, 13, 13, 0, 140, 140, 0),
    sp(10, 0, 1, 0, 0, 146, 0),
    sp(10, 13, 11, 0, 140, 147, 0),
    sp(12, 0, 13, 0, 0, 140, 0),
    sp(12, 13, 13, 0, 140, 140, 0),
    sp(12, 0, 1, 0, 0, 146, 0),
    sp(12, 13, 11, 0, 140, 147, 0),
    sp(3, 13, 11, 12, 150, 0, 0),
];

pub fn apply_shadow_patterns(session: &mut GenerationSession) {
    for y in 1..DMAXY {
        for x in 1..DMAXX {
            let trigger = base_kind(session.dungeon.tiles[x][y]);
            let west = base_kind(session.dungeon.tiles[x - 1][y]);
            let north = base_kind(session.dungeon.tiles[x][y - 1]);
            let northwest = base_kind(session.dungeon.tiles[x - 1][y - 1]);

            for shadow in SHADOW_PATTERNS.iter() {
                if shadow.trigger != trigger {
                    continue;
                }
                if shadow.s1 != 0 && shadow.s1 != northwest {
                    continue;
                }
                if shadow.s2 != 0 && shadow.s2 != north {
                    continue;
                }
                if shadow.s3 != 0 && shadow.s3 != west {
                    continue;
                }

                if shadow.nv1 != 0 && !session.protected.test(x - 1, y - 1) {
                    session.dungeon.tiles[x - 1][y - 1] = shadow.nv1;
                }
                if shadow.nv2 != 0 && !session.protected.test(x, y - 1) {
                    session.dungeon.tiles[x][y - 1] = shadow.nv2;
                }
                if shadow.nv3 != 0 && !session.protected.test(x - 1, y) {
                    session.dungeon.tiles[x - 1][y] = shadow.nv3;
                }
            }
        }
    }

    // shadows cast onto a fence column use the see-through variants
    for y in 1..DMAXY {
        for x in 1..DMAXX {
            if session.protected.test(x - 1, y) {
                continue;
            }
            let east = session.dungeon.tiles[x][y];
            match session.dungeon.tiles[x - 1][y] {
                139 => {
                    if is_fence_family(east) {
                        session.dungeon.tiles[x - 1][y] = 141;
                    }
                }
                149 => {
                    if is_fence_family(east) {
                        session.dungeon.tiles[x - 1][y] = 153;
                    }
                }
                148 => {
                    if is_fence_family(east) {
                        session.dungeon.tiles[x - 1][y] = 154;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Crypt shadows key off the decorated ids directly; only plain floor is
/// overwritten, so earlier decoration survives.
pub fn apply_crypt_shadow_patterns(session: &mut GenerationSession) {
    for j in 1..DMAXY {
        for i in 1..DMAXX {
            let d = &mut session.dungeon.tiles;
            let (west, northwest, north) = match d[i][j] {
                5 | 116 | 133 => (203, 204, 205),
                7 | 118 | 135 | 152 | 15 | 17 | 126 | 128 | 160 => (206, 207, 0),
                8 | 119 | 136 | 153 | 14 | 125 | 142 | 159 | 11 | 156 | 95 | 185 | 186 => {
                    (203, 204, 0)
                }
                9 | 120 | 154 => (206, 207, 205),
                12 | 123 | 10 | 121 | 138 | 155 => (0, 0, 205),
                96 | 187 => (0, 0, 208),
                122 => (211, 212, 0),
                137 => (213, 214, 205),
                139 => (215, 216, 0),
                140 | 157 => (0, 0, 217),
                143 | 145 => (213, 214, 0),
                150 => (203, 204, 217),
                162 | 192 | 167 => (209, 210, 0),
                _ => continue,
            };
            if west != 0 && d[i - 1][j] == 13 {
                d[i - 1][j] = west;
            }
            if northwest != 0 && d[i - 1][j - 1] == 13 {
                d[i - 1][j - 1] = northwest;
            }
            if north != 0 && d[i][j - 1] == 13 {
                d[i][j - 1] = north;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    fn floor_session() -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(0));
        session.dungeon.fill(13);
        session
    }

    #[test]
    fn test_arch_casts_full_shadow() {
        let mut session = floor_session();
        session.dungeon.tiles[10][10] = 5;
        apply_shadow_patterns(&mut session);
        // trigger 5 over all-floor neighbors rewrites all three cells
        assert_eq!(session.dungeon.tiles[9][9], 152);
        assert_eq!(session.dungeon.tiles[10][9], 140);
        assert_eq!(session.dungeon.tiles[9][10], 139);
    }

    #[test]
    fn test_protected_cells_keep_their_tiles() {
        let mut session = floor_session();
        session.dungeon.tiles[10][10] = 5;
        session.protected.set(9, 10);
        apply_shadow_patterns(&mut session);
        assert_eq!(session.dungeon.tiles[9][10], 13);
        assert_eq!(session.dungeon.tiles[9][9], 152);
    }

    #[test]
    fn test_shadow_onto_fence_uses_transparent_variant() {
        let mut session = floor_session();
        session.dungeon.tiles[9][10] = 139;
        session.dungeon.tiles[10][10] = 35;
        apply_shadow_patterns(&mut session);
        assert_eq!(session.dungeon.tiles[9][10], 141);
    }

    #[test]
    fn test_crypt_shadows_only_overwrite_floor() {
        let mut session = floor_session();
        session.dungeon.tiles[10][10] = 5;
        session.dungeon.tiles[9][10] = 101;
        apply_crypt_shadow_patterns(&mut session);
        assert_eq!(session.dungeon.tiles[9][10], 101);
        assert_eq!(session.dungeon.tiles[9][9], 204);
        assert_eq!(session.dungeon.tiles[10][9], 205);
    }

    #[test]
    fn test_crypt_pillar_shadow() {
        let mut session = floor_session();
        session.dungeon.tiles[10][10] = 167;
        apply_crypt_shadow_patterns(&mut session);
        assert_eq!(session.dungeon.tiles[9][10], 209);
        assert_eq!(session.dungeon.tiles[9][9], 210);
    }
}
