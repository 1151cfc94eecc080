//! Room layout pass
//!
//! Seeds the 40x40 grid with the chamber spine (up to three fixed 10x10
//! chambers joined by a corridor) and grows a tree of even-sized rooms off
//! it. Rooms are marked with the wall sentinel tile 1; everything else stays
//! 0 until block conversion.

use crate::{DMAXX, DMAXY};

use super::grid::DungeonGrid;
use super::level::GenerationSession;

const CHAMBER_SIZE: i32 = 10;

fn map_room(session: &mut GenerationSession, x: i32, y: i32, width: i32, height: i32) {
    for j in 0..height {
        for i in 0..width {
            if DungeonGrid::in_bounds(x + i, y + j) {
                session.dungeon.tiles[(x + i) as usize][(y + j) as usize] = 1;
            }
        }
    }
}

fn check_room(session: &GenerationSession, x: i32, y: i32, width: i32, height: i32) -> bool {
    for j in 0..height {
        for i in 0..width {
            match session.dungeon.get(x + i, y + j) {
                Some(0) => {}
                _ => return false,
            }
        }
    }
    true
}

/// Grow child rooms off the rectangle at (`x`, `y`). `horizontal` children
/// extend sideways, otherwise up and down; each recursion level flips the
/// preferred direction with a 1-in-4 override.
fn generate_room(session: &mut GenerationSession, x: i32, y: i32, w: i32, h: i32, horizontal: bool) {
    let dir_prob = session.rng.generate_rnd(4);
    let mut num = 0;

    if horizontal == (dir_prob == 0) {
        let mut cw;
        let mut ch;
        let mut cx1;
        let mut cy1;
        let mut ran;
        loop {
            cw = (session.rng.generate_rnd(5) + 2) & !1;
            ch = (session.rng.generate_rnd(5) + 2) & !1;
            cx1 = x - cw;
            cy1 = h / 2 + y - ch / 2;
            // Quirk preserved: the width and height arguments are swapped
            // here, so the free-space probe checks the wrong rectangle. The
            // min() clamps below keep the write in bounds regardless.
            ran = check_room(session, cx1 - 1, cy1 - 1, ch + 2, cw + 1);
            num += 1;
            if ran || num >= 20 {
                break;
            }
        }

        if ran {
            map_room(
                session,
                cx1,
                cy1,
                (DMAXX as i32 - cx1).min(cw),
                (DMAXX as i32 - cy1).min(ch),
            );
        }
        let cx2 = x + w;
        let ran2 = check_room(session, cx2, cy1 - 1, cw + 1, ch + 2);
        if ran2 {
            map_room(session, cx2, cy1, cw, ch);
        }
        if ran {
            generate_room(session, cx1, cy1, cw, ch, true);
        }
        if ran2 {
            generate_room(session, cx2, cy1, cw, ch, true);
        }
        return;
    }

    let mut width;
    let mut height;
    let mut rx;
    let mut ry;
    let mut ran;
    loop {
        width = (session.rng.generate_rnd(5) + 2) & !1;
        height = (session.rng.generate_rnd(5) + 2) & !1;
        rx = w / 2 + x - width / 2;
        ry = y - height;
        ran = check_room(session, rx - 1, ry - 1, width + 2, height + 1);
        num += 1;
        if ran || num >= 20 {
            break;
        }
    }

    if ran {
        map_room(session, rx, ry, width, height);
    }
    let ry2 = y + h;
    let ran2 = check_room(session, rx - 1, ry2, width + 2, height + 1);
    if ran2 {
        map_room(session, rx, ry2, width, height);
    }
    if ran {
        generate_room(session, rx, ry, width, height, false);
    }
    if ran2 {
        generate_room(session, rx, ry2, width, height, false);
    }
}

/// Lay the chamber spine and grow the room tree. Draws the layout
/// orientation and the three chamber presence flags; at least one of the
/// outer chambers missing forces the middle one in.
pub fn first_room(session: &mut GenerationSession) {
    session.vertical_layout = session.rng.generate_rnd(2) == 0;
    session.has_chamber1 = session.rng.generate_rnd(2) != 0;
    session.has_chamber2 = session.rng.generate_rnd(2) != 0;
    session.has_chamber3 = session.rng.generate_rnd(2) != 0;

    if !session.has_chamber1 || !session.has_chamber3 {
        session.has_chamber2 = true;
    }

    if session.vertical_layout {
        let mut ys = 1;
        let mut ye = DMAXY as i32 - 1;

        if session.has_chamber1 {
            map_room(session, 15, 1, CHAMBER_SIZE, CHAMBER_SIZE);
        } else {
            ys = 18;
        }
        if session.has_chamber2 {
            map_room(session, 15, 15, CHAMBER_SIZE, CHAMBER_SIZE);
        }
        if session.has_chamber3 {
            map_room(session, 15, 29, CHAMBER_SIZE, CHAMBER_SIZE);
        } else {
            ye = 22;
        }

        for y in ys..ye {
            for x in 17..=22 {
                session.dungeon.tiles[x][y as usize] = 1;
            }
        }

        if session.has_chamber1 {
            generate_room(session, 15, 1, CHAMBER_SIZE, CHAMBER_SIZE, false);
        }
        if session.has_chamber2 {
            generate_room(session, 15, 15, CHAMBER_SIZE, CHAMBER_SIZE, false);
        }
        if session.has_chamber3 {
            generate_room(session, 15, 29, CHAMBER_SIZE, CHAMBER_SIZE, false);
        }
    } else {
        let mut xs = 1;
        let mut xe = DMAXX as i32 - 1;

        if session.has_chamber1 {
            map_room(session, 1, 15, CHAMBER_SIZE, CHAMBER_SIZE);
        } else {
            xs = 18;
        }
        if session.has_chamber2 {
            map_room(session, 15, 15, CHAMBER_SIZE, CHAMBER_SIZE);
        }
        if session.has_chamber3 {
            map_room(session, 29, 15, CHAMBER_SIZE, CHAMBER_SIZE);
        } else {
            xe = 22;
        }

        for x in xs..xe {
            for y in 17..=22 {
                session.dungeon.tiles[x as usize][y] = 1;
            }
        }

        if session.has_chamber1 {
            generate_room(session, 1, 15, CHAMBER_SIZE, CHAMBER_SIZE, true);
        }
        if session.has_chamber2 {
            generate_room(session, 15, 15, CHAMBER_SIZE, CHAMBER_SIZE, true);
        }
        if session.has_chamber3 {
            generate_room(session, 29, 15, CHAMBER_SIZE, CHAMBER_SIZE, true);
        }
    }
}

/// Count of cells claimed by rooms so far.
pub fn find_area(session: &GenerationSession) -> usize {
    session.dungeon.count(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    #[test]
    fn test_first_room_lays_corridor_spine() {
        let mut session = GenerationSession::new(GameRng::new(42));
        first_room(&mut session);
        // the middle rows/columns of the spine are always room cells
        if session.vertical_layout {
            for y in 18..22 {
                for x in 17..=22 {
                    assert_eq!(session.dungeon.tiles[x][y], 1);
                }
            }
        } else {
            for x in 18..22 {
                for y in 17..=22 {
                    assert_eq!(session.dungeon.tiles[x][y], 1);
                }
            }
        }
    }

    #[test]
    fn test_missing_outer_chamber_forces_middle() {
        for seed in 0..64u32 {
            let mut session = GenerationSession::new(GameRng::new(seed));
            first_room(&mut session);
            if !session.has_chamber1 || !session.has_chamber3 {
                assert!(session.has_chamber2);
            }
        }
    }

    #[test]
    fn test_rooms_only_mark_wall_sentinel() {
        let mut session = GenerationSession::new(GameRng::new(9));
        first_room(&mut session);
        for col in session.dungeon.tiles.iter() {
            for &tile in col.iter() {
                assert!(tile == 0 || tile == 1);
            }
        }
    }

    #[test]
    fn test_area_counts_room_cells() {
        let mut session = GenerationSession::new(GameRng::new(9));
        assert_eq!(find_area(&session), 0);
        first_room(&mut session);
        let counted = session
            .dungeon
            .tiles
            .iter()
            .flatten()
            .filter(|&&t| t == 1)
            .count();
        assert_eq!(find_area(&session), counted);
        // the spine alone guarantees a non-trivial area
        assert!(find_area(&session) >= 24);
    }
}
