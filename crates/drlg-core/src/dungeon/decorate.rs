//! Theme decoration passes
//!
//! After the structural grid is final, these passes swap undecorated tiles
//! for cosmetic variants. The cathedral run is a single randomized
//! substitution plus shadows and lamps; the crypt run layers several
//! weathering families whose mix shifts with depth.

use super::level::GenerationSession;
use super::miniset::{
    place_miniset, place_miniset_random, place_miniset_random_1x1, CRYPT_FLOOR_LAVA, CRYPT_PILLAR1,
    CRYPT_PILLAR2, CRYPT_PILLAR3, CRYPT_PILLAR4, CRYPT_PILLAR5, CRYPT_STAR, HWALL_SECTION, LAMPS,
    VWALL_SECTION,
};
use super::shadows::{apply_crypt_shadow_patterns, apply_shadow_patterns};
use super::tile::{undecorated, UNDECORATED};
use crate::{DMAXX, DMAXY};

/// Randomized variant substitution. Each tile has a 1-in-4 chance to be
/// redrawn as a uniformly chosen member of its undecorated class; the
/// choice walks the class table cyclically.
pub fn substitute_tiles(session: &mut GenerationSession) {
    for y in 0..DMAXY {
        for x in 0..DMAXX {
            if session.rng.generate_rnd(4) != 0 {
                continue;
            }
            let c = undecorated(session.dungeon.tiles[x][y]);
            if c == 0 || session.protected.test(x, y) {
                continue;
            }
            let mut rv = session.rng.generate_rnd(16);
            let mut i: i32 = -1;
            while rv >= 0 {
                i += 1;
                if i as usize == UNDECORATED.len() {
                    i = 0;
                }
                if c == UNDECORATED[i as usize] {
                    rv -= 1;
                }
            }
            let mut tile = i as u8;

            // two-tile motifs need their second half placed as well, or a
            // downgrade to the single-tile variant
            if tile == 89 && y > 0 {
                if undecorated(session.dungeon.tiles[x][y - 1]) != 79
                    || session.protected.test(x, y - 1)
                {
                    tile = 79;
                } else {
                    session.dungeon.tiles[x][y - 1] = 90;
                }
            }
            if tile == 91 && x + 1 < DMAXX {
                if undecorated(session.dungeon.tiles[x + 1][y]) != 80
                    || session.protected.test(x + 1, y)
                {
                    tile = 80;
                } else {
                    session.dungeon.tiles[x + 1][y] = 92;
                }
            }
            session.dungeon.tiles[x][y] = tile;
        }
    }
}

/// Break up unprotected floor with the two worn variants.
pub fn fill_floor(session: &mut GenerationSession) {
    for j in 0..DMAXY {
        for i in 0..DMAXX {
            if !session.protected.test(i, j) && session.dungeon.tiles[i][j] == 13 {
                let rv = session.rng.generate_rnd(3);
                if rv == 1 {
                    session.dungeon.tiles[i][j] = 162;
                }
                if rv == 2 {
                    session.dungeon.tiles[i][j] = 163;
                }
            }
        }
    }
}

fn run_1x1_sweeps(session: &mut GenerationSession, pairs: &[(u8, u8)], rndper: i32) {
    for &(search, replace) in pairs {
        place_miniset_random_1x1(session, search, replace, rndper);
    }
}

fn crypt_statues(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(
        session,
        &[(1, 199), (1, 201), (2, 200), (2, 202)],
        rndper,
    );
}

fn crypt_cracked(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(
        session,
        &[
            (1, 112),
            (2, 113),
            (3, 114),
            (4, 115),
            (5, 116),
            (6, 117),
            (7, 118),
            (8, 119),
            (9, 120),
            (10, 121),
            (11, 122),
            (12, 123),
            (13, 124),
            (14, 125),
            (15, 126),
            (16, 127),
            (17, 128),
        ],
        rndper,
    );
}

fn crypt_broken(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(
        session,
        &[
            (1, 129),
            (2, 130),
            (3, 131),
            (4, 132),
            (5, 133),
            (6, 134),
            (7, 135),
            (8, 136),
            (9, 137),
            (10, 138),
            (11, 139),
            (12, 140),
            (13, 141),
            (14, 142),
            (15, 143),
            (16, 144),
            (17, 145),
        ],
        rndper,
    );
}

fn crypt_leaking(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(
        session,
        &[
            (1, 146),
            (2, 147),
            (3, 148),
            (4, 149),
            (5, 150),
            (6, 151),
            (7, 152),
            (8, 153),
            (9, 154),
            (10, 155),
            (11, 156),
            (12, 157),
            (13, 158),
            (14, 159),
            (15, 160),
            (16, 161),
            (17, 162),
        ],
        rndper,
    );
}

fn crypt_substitutions1(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(
        session,
        &[
            (11, 185),
            (12, 187),
            (11, 186),
            (12, 188),
            (89, 173),
            (89, 174),
            (90, 175),
            (90, 176),
            (91, 177),
            (91, 178),
            (92, 179),
            (92, 180),
            (92, 181),
            (92, 182),
            (92, 183),
            (92, 184),
            (98, 189),
            (98, 190),
            (97, 191),
            (15, 192),
            (99, 193),
            (99, 194),
            (100, 195),
            (101, 196),
            (101, 197),
            (101, 198),
        ],
        rndper,
    );
}

fn crypt_substitutions2(session: &mut GenerationSession, rndper: i32) {
    place_miniset_random(session, &CRYPT_PILLAR1, rndper);
    place_miniset_random(session, &CRYPT_PILLAR2, rndper);
    place_miniset_random(session, &CRYPT_PILLAR3, rndper);
    place_miniset_random(session, &CRYPT_PILLAR4, rndper);
    place_miniset_random(session, &CRYPT_PILLAR5, rndper);
    place_miniset_random(session, &CRYPT_STAR, rndper);
    run_1x1_sweeps(
        session,
        &[(13, 163), (13, 164), (13, 165), (13, 166)],
        rndper,
    );
}

fn crypt_floor(session: &mut GenerationSession, rndper: i32) {
    run_1x1_sweeps(session, &[(13, 97), (13, 98), (13, 99), (13, 100)], rndper);
}

/// Cathedral decoration: variant substitution, shadows, a handful of
/// candlesticks, then worn floor.
pub fn decorate_cathedral(session: &mut GenerationSession) {
    substitute_tiles(session);
    apply_shadow_patterns(session);

    let numt = session.rng.generate_rnd(5) + 5;
    for _ in 0..numt {
        place_miniset(session, &LAMPS);
    }

    fill_floor(session);
}

/// Crypt decoration. The weathering mix shifts towards heavier decay on
/// deeper levels.
pub fn decorate_crypt(session: &mut GenerationSession, level: u8) {
    crypt_statues(session, 10);
    place_miniset_random_1x1(session, 11, 95, 95);
    place_miniset_random_1x1(session, 12, 96, 95);
    place_miniset_random(session, &VWALL_SECTION, 100);
    place_miniset_random(session, &HWALL_SECTION, 100);
    place_miniset_random(session, &CRYPT_FLOOR_LAVA, 60);
    apply_crypt_shadow_patterns(session);
    match level {
        21 => {
            crypt_cracked(session, 30);
            crypt_broken(session, 15);
            crypt_leaking(session, 5);
            apply_crypt_shadow_patterns(session);
            crypt_floor(session, 10);
            crypt_substitutions1(session, 5);
            crypt_substitutions2(session, 20);
        }
        22 => {
            crypt_floor(session, 10);
            crypt_substitutions1(session, 10);
            crypt_substitutions2(session, 20);
            crypt_cracked(session, 30);
            crypt_broken(session, 20);
            crypt_leaking(session, 10);
            apply_crypt_shadow_patterns(session);
        }
        23 => {
            crypt_floor(session, 10);
            crypt_substitutions1(session, 15);
            crypt_substitutions2(session, 30);
            crypt_cracked(session, 30);
            crypt_broken(session, 20);
            crypt_leaking(session, 15);
            apply_crypt_shadow_patterns(session);
        }
        _ => {
            crypt_floor(session, 10);
            crypt_substitutions1(session, 20);
            crypt_substitutions2(session, 30);
            crypt_cracked(session, 30);
            crypt_broken(session, 20);
            crypt_leaking(session, 20);
            apply_crypt_shadow_patterns(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    fn floor_session(seed: u32) -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(seed));
        session.dungeon.fill(13);
        session
    }

    #[test]
    fn test_substitution_stays_within_class() {
        let mut session = floor_session(123);
        substitute_tiles(&mut session);
        for col in session.dungeon.tiles.iter() {
            for &tile in col.iter() {
                assert_eq!(undecorated(tile), 13, "tile {tile} left the floor class");
            }
        }
    }

    #[test]
    fn test_substitution_skips_protected() {
        let mut session = floor_session(123);
        for x in 0..DMAXX {
            for y in 0..DMAXY {
                session.protected.set(x, y);
            }
        }
        substitute_tiles(&mut session);
        assert_eq!(session.dungeon.count(13), DMAXX * DMAXY);
    }

    #[test]
    fn test_fill_floor_uses_worn_variants_only() {
        let mut session = floor_session(7);
        fill_floor(&mut session);
        for col in session.dungeon.tiles.iter() {
            for &tile in col.iter() {
                assert!(matches!(tile, 13 | 162 | 163));
            }
        }
        // with 1600 three-way draws both variants show up
        assert!(session.dungeon.count(162) > 0);
        assert!(session.dungeon.count(163) > 0);
    }

    #[test]
    fn test_cathedral_decoration_places_lamps() {
        let mut session = floor_session(99);
        decorate_cathedral(&mut session);
        assert!(session.dungeon.count(128) >= 5);
    }

    #[test]
    fn test_wall_section_sweep_rewrites_runs() {
        let mut session = floor_session(5);
        for y in 10..13 {
            session.dungeon.tiles[10][y] = 1;
        }
        place_miniset_random(&mut session, &VWALL_SECTION, 100);
        assert_eq!(session.dungeon.tiles[10][10], 91);
        assert_eq!(session.dungeon.tiles[10][11], 90);
        assert_eq!(session.dungeon.tiles[10][12], 89);
    }

    #[test]
    fn test_crypt_decoration_varies_with_depth() {
        let mut shallow = floor_session(5);
        decorate_crypt(&mut shallow, 21);
        let mut deep = floor_session(5);
        decorate_crypt(&mut deep, 24);
        assert_ne!(shallow.dungeon, deep.dungeon);
        // worn floor variants land on both schedules
        let worn: usize = (97..=100).map(|t| deep.dungeon.count(t)).sum();
        assert!(worn > 0);
    }
}
