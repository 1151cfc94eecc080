//! Authored tile patterns (minisets) and their placement
//!
//! A miniset is an immutable authored stamp: a search grid of required
//! existing tiles (0 = wildcard) and a replace grid of tiles to write
//! (0 = leave unchanged). Minisets serve both fixed stamps (stairs, themed
//! rooms) and the randomized single-tile substitution sweeps. All patterns
//! here are preserved bit-exact from the original data.

use crate::{DMAXX, DMAXY};

use super::grid::{Direction, Point};
use super::level::GenerationSession;

/// An authored search/replace stamp. `search`/`replace` are row-major
/// (`[y][x]`); an empty search grid matches unconditionally.
#[derive(Debug, Clone, Copy)]
pub struct Miniset<'a> {
    pub width: usize,
    pub height: usize,
    pub search: &'a [&'a [u8]],
    pub replace: &'a [&'a [u8]],
}

impl Miniset<'_> {
    /// Does the search grid match the dungeon at `origin`? Protected cells
    /// never match, so stamps cannot land on quest pieces or placed doors.
    pub fn matches(&self, session: &GenerationSession, origin: Point) -> bool {
        self.matches_with(session, origin, true)
    }

    pub fn matches_with(
        &self,
        session: &GenerationSession,
        origin: Point,
        check_protected: bool,
    ) -> bool {
        for yy in 0..self.height {
            for xx in 0..self.width {
                let x = origin.x + xx as i32;
                let y = origin.y + yy as i32;
                let Some(tile) = session.dungeon.get(x, y) else {
                    return false;
                };
                if let Some(row) = self.search.get(yy) {
                    let want = row[xx];
                    if want != 0 && tile != want {
                        return false;
                    }
                }
                if check_protected && session.protected.test(x as usize, y as usize) {
                    return false;
                }
            }
        }
        true
    }

    /// Stamp the replace grid at `origin`; zero entries leave the cell
    /// unchanged. With `protect`, stamped cells are marked protected.
    pub fn place(&self, session: &mut GenerationSession, origin: Point, protect: bool) {
        for yy in 0..self.height {
            for xx in 0..self.width {
                let replace = self.replace[yy][xx];
                if replace == 0 {
                    continue;
                }
                let x = (origin.x + xx as i32) as usize;
                let y = (origin.y + yy as i32) as usize;
                session.dungeon.tiles[x][y] = replace;
                if protect {
                    session.protected.set(x, y);
                }
            }
        }
    }
}

/// Stamp `miniset` at a position chosen uniformly among all matching
/// locations. Returns the chosen origin, or `None` (grid untouched) when
/// nothing matches.
pub fn place_miniset(session: &mut GenerationSession, miniset: &Miniset) -> Option<Point> {
    let mut candidates = Vec::new();
    for sy in 0..DMAXY - miniset.height {
        for sx in 0..DMAXX - miniset.width {
            let origin = Point::new(sx as i32, sy as i32);
            if miniset.matches(session, origin) {
                candidates.push(origin);
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }
    let pick = session.rng.generate_rnd(candidates.len() as i32) as usize;
    let origin = candidates[pick];
    miniset.place(session, origin, false);
    Some(origin)
}

/// Guard for the randomized sweeps: crypt dirt-range tiles (84..=100) may
/// not land next to one another.
fn can_replace_tile(session: &GenerationSession, replace: u8, tile: Point) -> bool {
    if !(84..=100).contains(&replace) {
        return true;
    }

    // Quirk preserved from the original: the second point should have been
    // the probed neighbor, but the same north-west point was passed for the
    // upper-bound half of every comparison. Fixing it breaks seed
    // compatibility.
    let comparison = |p1: Point, p2: Point| -> bool {
        match (session.dungeon.get_point(p1), session.dungeon.get_point(p2)) {
            (Some(t1), Some(t2)) => t1 >= 84 && t2 <= 100,
            _ => false,
        }
    };
    let nw = tile + Direction::NorthWest;
    if comparison(nw, nw)
        || comparison(tile + Direction::SouthEast, nw)
        || comparison(tile + Direction::SouthWest, nw)
        || comparison(tile + Direction::NorthEast, nw)
    {
        return false;
    }

    true
}

/// Percentage-threshold sweep: every matching location independently gets a
/// `rndper`% chance to receive the stamp.
pub fn place_miniset_random(session: &mut GenerationSession, miniset: &Miniset, rndper: i32) {
    for sy in 0..DMAXY - miniset.height {
        for sx in 0..DMAXX - miniset.width {
            let origin = Point::new(sx as i32, sy as i32);
            if !miniset.matches_with(session, origin, false) {
                continue;
            }
            if !can_replace_tile(session, miniset.replace[0][0], origin) {
                continue;
            }
            if session.rng.generate_rnd(100) >= rndper {
                continue;
            }
            miniset.place(session, origin, false);
        }
    }
}

/// Single-tile randomized substitution, the workhorse of the theme passes.
pub fn place_miniset_random_1x1(
    session: &mut GenerationSession,
    search: u8,
    replace: u8,
    rndper: i32,
) {
    let search_row: [u8; 1] = [search];
    let replace_row: [u8; 1] = [replace];
    let search_rows: [&[u8]; 1] = [&search_row];
    let replace_rows: [&[u8]; 1] = [&replace_row];
    let miniset = Miniset {
        width: 1,
        height: 1,
        search: &search_rows,
        replace: &replace_rows,
    };
    place_miniset_random(session, &miniset, rndper);
}

/// Miniset: stairs up on a corner wall.
pub const STAIRS_UP: Miniset<'static> = Miniset {
    width: 4,
    height: 4,
    search: &[
        &[13, 13, 13, 13],
        &[2, 2, 2, 2],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[0, 66, 6, 0],
        &[63, 64, 65, 0],
        &[0, 67, 68, 0],
        &[0, 0, 0, 0],
    ],
};

pub const L5_STAIRS_UP_HF: Miniset<'static> = Miniset {
    width: 4,
    height: 5,
    search: &[
        &[22, 22, 22, 22],
        &[22, 22, 22, 22],
        &[2, 2, 2, 2],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[0, 54, 23, 0],
        &[0, 53, 18, 0],
        &[55, 56, 57, 0],
        &[58, 59, 60, 0],
        &[0, 0, 0, 0],
    ],
};

/// Miniset: stairs up.
pub const L5_STAIRS_UP: Miniset<'static> = Miniset {
    width: 4,
    height: 4,
    search: &[
        &[22, 22, 22, 22],
        &[2, 2, 2, 2],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[0, 66, 23, 0],
        &[63, 64, 65, 0],
        &[0, 67, 68, 0],
        &[0, 0, 0, 0],
    ],
};

/// Miniset: stairs down.
pub const STAIRS_DOWN: Miniset<'static> = Miniset {
    width: 4,
    height: 3,
    search: &[
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[62, 57, 58, 0],
        &[61, 59, 60, 0],
        &[0, 0, 0, 0],
    ],
};

pub const L5_STAIRS_DOWN: Miniset<'static> = Miniset {
    width: 4,
    height: 5,
    search: &[
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[0, 0, 52, 0],
        &[0, 48, 51, 0],
        &[0, 47, 50, 0],
        &[45, 46, 49, 0],
        &[0, 0, 0, 0],
    ],
};

pub const L5_STAIRS_TOWN: Miniset<'static> = Miniset {
    width: 4,
    height: 5,
    search: &[
        &[22, 22, 22, 22],
        &[22, 22, 22, 22],
        &[2, 2, 2, 2],
        &[13, 13, 13, 13],
        &[13, 13, 13, 13],
    ],
    replace: &[
        &[0, 62, 23, 0],
        &[0, 61, 18, 0],
        &[63, 64, 65, 0],
        &[66, 67, 68, 0],
        &[0, 0, 0, 0],
    ],
};

/// Miniset: candlestick.
pub const LAMPS: Miniset<'static> = Miniset {
    width: 2,
    height: 2,
    search: &[
        &[13, 0],
        &[13, 13],
    ],
    replace: &[
        &[129, 0],
        &[130, 128],
    ],
};

/// Miniset: poisoned water supply entrance.
pub const PWATER_ENTRY: Miniset<'static> = Miniset {
    width: 6,
    height: 6,
    search: &[
        &[13, 13, 13, 13, 13, 13],
        &[13, 13, 13, 13, 13, 13],
        &[13, 13, 13, 13, 13, 13],
        &[13, 13, 13, 13, 13, 13],
        &[13, 13, 13, 13, 13, 13],
        &[13, 13, 13, 13, 13, 13],
    ],
    replace: &[
        &[0, 0, 0, 0, 0, 0],
        &[0, 202, 200, 200, 84, 0],
        &[0, 199, 203, 203, 83, 0],
        &[0, 85, 206, 80, 81, 0],
        &[0, 0, 134, 135, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ],
};

pub const VWALL_SECTION: Miniset<'static> = Miniset {
    width: 1,
    height: 3,
    search: &[&[1], &[1], &[1]],
    replace: &[&[91], &[90], &[89]],
};

pub const HWALL_SECTION: Miniset<'static> = Miniset {
    width: 3,
    height: 1,
    search: &[&[2, 2, 2]],
    replace: &[&[94, 93, 92]],
};

pub const CRYPT_FLOOR_LAVA: Miniset<'static> = Miniset {
    width: 3,
    height: 3,
    search: &[
        &[13, 13, 13],
        &[13, 13, 13],
        &[13, 13, 13],
    ],
    replace: &[
        &[0, 0, 0],
        &[0, 101, 0],
        &[0, 0, 0],
    ],
};

macro_rules! crypt_centerpiece {
    ($name:ident, $tile:expr) => {
        pub const $name: Miniset<'static> = Miniset {
            width: 3,
            height: 3,
            search: &[
                &[13, 13, 13],
                &[13, 13, 13],
                &[13, 13, 13],
            ],
            replace: &[
                &[0, 0, 0],
                &[0, $tile, 0],
                &[0, 0, 0],
            ],
        };
    };
}

crypt_centerpiece!(CRYPT_PILLAR1, 167);
crypt_centerpiece!(CRYPT_PILLAR2, 168);
crypt_centerpiece!(CRYPT_PILLAR3, 169);
crypt_centerpiece!(CRYPT_PILLAR4, 170);
crypt_centerpiece!(CRYPT_PILLAR5, 171);
crypt_centerpiece!(CRYPT_STAR, 172);

pub const UBER_ROOM_PATTERN: Miniset<'static> = Miniset {
    width: 4,
    height: 6,
    search: &[],
    replace: &[
        &[115, 130, 6, 13],
        &[129, 108, 1, 13],
        &[1, 107, 103, 13],
        &[146, 106, 102, 13],
        &[129, 168, 1, 13],
        &[7, 2, 3, 13],
    ],
};

pub const CORNERSTONE_ROOM_PATTERN: Miniset<'static> = Miniset {
    width: 5,
    height: 5,
    search: &[],
    replace: &[
        &[4, 2, 2, 2, 6],
        &[1, 111, 172, 13, 1],
        &[1, 172, 13, 13, 25],
        &[1, 13, 13, 13, 1],
        &[7, 2, 2, 2, 3],
    ],
};
