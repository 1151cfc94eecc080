//! Wall growth pass
//!
//! Scans the grid for wall seeds (corners, wall ends, plain walls) and
//! grows straight wall runs across open floor until they hit another
//! structural tile. Each run becomes wall, arch or fence with one breach;
//! a door breach is protected so later sweeps cannot erase it.

use super::level::GenerationSession;
use crate::{DMAXX, DMAXY};

/// Probe east of (`i`, `j`) for a run of clear floor ending at a wall
/// terminator. Returns the run length, or `None` when no wall fits.
fn horizontal_wall_ok(session: &GenerationSession, i: i32, j: i32) -> Option<i32> {
    let mut x = 1;
    while session.dungeon.get(i + x, j) == Some(13) {
        if session.dungeon.get(i + x, j - 1) != Some(13)
            || session.dungeon.get(i + x, j + 1) != Some(13)
            || session.protected.test((i + x) as usize, j as usize)
            || session.chamber.test((i + x) as usize, j as usize)
        {
            break;
        }
        x += 1;
    }

    let terminator = session.dungeon.get(i + x, j)?;
    let mut wallok = matches!(terminator, 3..=7 | 16..=24);
    if terminator == 22 {
        wallok = false;
    }
    if x == 1 {
        wallok = false;
    }

    wallok.then_some(x)
}

/// South-probing counterpart of [`horizontal_wall_ok`].
fn vertical_wall_ok(session: &GenerationSession, i: i32, j: i32) -> Option<i32> {
    let mut y = 1;
    while session.dungeon.get(i, j + y) == Some(13) {
        if session.dungeon.get(i - 1, j + y) != Some(13)
            || session.dungeon.get(i + 1, j + y) != Some(13)
            || session.protected.test(i as usize, (j + y) as usize)
            || session.chamber.test(i as usize, (j + y) as usize)
        {
            break;
        }
        y += 1;
    }

    let terminator = session.dungeon.get(i, j + y)?;
    let mut wallok = matches!(terminator, 3..=7 | 16..=24);
    if terminator == 22 {
        wallok = false;
    }
    if y == 1 {
        wallok = false;
    }

    wallok.then_some(y)
}

/// Lay a horizontal run of `dx` tiles starting at (`i`, `j`). The seed tile
/// becomes `p` (adjusted when the run is arch or fence), and one interior
/// tile is breached with a door or arch.
fn horizontal_wall(session: &mut GenerationSession, i: i32, j: i32, p: u8, dx: i32) {
    let mut p = p;
    let mut dt = 2u8;
    let mut wt = 26u8;

    match session.rng.generate_rnd(4) {
        2 => {
            // arch run
            dt = 12;
            wt = 12;
            if p == 2 {
                p = 12;
            } else if p == 4 {
                p = 10;
            }
        }
        3 => {
            // fence run
            dt = 36;
            if p == 2 {
                p = 36;
            } else if p == 4 {
                p = 27;
            }
        }
        _ => {}
    }

    if session.rng.generate_rnd(6) == 5 {
        wt = 12;
    }

    session.dungeon.tiles[i as usize][j as usize] = p;
    for xx in 1..dx {
        session.dungeon.tiles[(i + xx) as usize][j as usize] = dt;
    }

    let xx = session.rng.generate_rnd(dx - 1) + 1;
    session.dungeon.tiles[(i + xx) as usize][j as usize] = wt;
    if wt == 26 {
        session.protected.set((i + xx) as usize, j as usize);
    }
}

/// Vertical counterpart of [`horizontal_wall`].
fn vertical_wall(session: &mut GenerationSession, i: i32, j: i32, p: u8, dy: i32) {
    let mut p = p;
    let mut dt = 1u8;
    let mut wt = 25u8;

    match session.rng.generate_rnd(4) {
        2 => {
            dt = 11;
            wt = 11;
            if p == 1 {
                p = 11;
            } else if p == 4 {
                p = 14;
            }
        }
        3 => {
            dt = 35;
            if p == 1 {
                p = 35;
            } else if p == 4 {
                p = 37;
            }
        }
        _ => {}
    }

    if session.rng.generate_rnd(6) == 5 {
        wt = 11;
    }

    session.dungeon.tiles[i as usize][j as usize] = p;
    for yy in 1..dy {
        session.dungeon.tiles[i as usize][(j + yy) as usize] = dt;
    }

    let yy = session.rng.generate_rnd(dy - 1) + 1;
    session.dungeon.tiles[i as usize][(j + yy) as usize] = wt;
    if wt == 25 {
        session.protected.set(i as usize, (j + yy) as usize);
    }
}

/// Grow interior walls from every unprotected seed tile. One random draw is
/// burned before each probe to keep the stream layout of the original
/// generator.
pub fn add_wall(session: &mut GenerationSession) {
    for j in 0..DMAXY as i32 {
        for i in 0..DMAXX as i32 {
            if session.protected.test(i as usize, j as usize)
                || session.chamber.test(i as usize, j as usize)
            {
                continue;
            }
            if session.dungeon.tiles[i as usize][j as usize] == 3 {
                session.rng.advance();
                if let Some(x) = horizontal_wall_ok(session, i, j) {
                    horizontal_wall(session, i, j, 2, x);
                }
            }
            if session.dungeon.tiles[i as usize][j as usize] == 3 {
                session.rng.advance();
                if let Some(y) = vertical_wall_ok(session, i, j) {
                    vertical_wall(session, i, j, 1, y);
                }
            }
            if session.dungeon.tiles[i as usize][j as usize] == 6 {
                session.rng.advance();
                if let Some(x) = horizontal_wall_ok(session, i, j) {
                    horizontal_wall(session, i, j, 4, x);
                }
            }
            if session.dungeon.tiles[i as usize][j as usize] == 7 {
                session.rng.advance();
                if let Some(y) = vertical_wall_ok(session, i, j) {
                    vertical_wall(session, i, j, 4, y);
                }
            }
            if session.dungeon.tiles[i as usize][j as usize] == 2 {
                session.rng.advance();
                if let Some(x) = horizontal_wall_ok(session, i, j) {
                    horizontal_wall(session, i, j, 2, x);
                }
            }
            if session.dungeon.tiles[i as usize][j as usize] == 1 {
                session.rng.advance();
                if let Some(y) = vertical_wall_ok(session, i, j) {
                    vertical_wall(session, i, j, 1, y);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    // corridor of floor flanked by floor rows, terminated by a corner
    fn open_run_session() -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(0));
        session.dungeon.fill(13);
        session
    }

    #[test]
    fn test_probe_requires_clear_flanks() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[15][10] = 3;
        assert_eq!(horizontal_wall_ok(&session, 10, 10), Some(5));
        // a blocked flank stops the run before a terminator is found
        session.dungeon.tiles[12][9] = 22;
        assert_eq!(horizontal_wall_ok(&session, 10, 10), None);
    }

    #[test]
    fn test_probe_rejects_dirt_terminator() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[15][10] = 22;
        assert_eq!(horizontal_wall_ok(&session, 10, 10), None);
    }

    #[test]
    fn test_probe_rejects_adjacent_terminator() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[11][10] = 3;
        assert_eq!(horizontal_wall_ok(&session, 10, 10), None);
    }

    #[test]
    fn test_probe_stops_at_protected_cell() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[15][10] = 3;
        session.protected.set(12, 10);
        assert_eq!(horizontal_wall_ok(&session, 10, 10), None);
    }

    #[test]
    fn test_vertical_probe_symmetry() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[10][16] = 7;
        assert_eq!(vertical_wall_ok(&session, 10, 10), Some(6));
    }

    #[test]
    fn test_wall_run_fills_interior_with_one_breach() {
        let mut session = open_run_session();
        horizontal_wall(&mut session, 10, 10, 2, 6);
        let run: Vec<u8> = (11..16).map(|x| session.dungeon.tiles[x][10]).collect();
        // exactly one breach tile differs from the run fill
        let fill = *run
            .iter()
            .filter(|&&t| matches!(t, 2 | 12 | 36))
            .next()
            .unwrap();
        let breaches = run.iter().filter(|&&t| t != fill).count();
        assert!(breaches <= 1);
        // a door breach is protected
        for (offset, &tile) in run.iter().enumerate() {
            if tile == 26 {
                assert!(session.protected.test(11 + offset, 10));
            }
        }
    }

    #[test]
    fn test_add_wall_leaves_protected_seeds_alone() {
        let mut session = open_run_session();
        session.dungeon.tiles[10][10] = 3;
        session.dungeon.tiles[15][10] = 3;
        for x in 0..DMAXX {
            for y in 0..DMAXY {
                session.protected.set(x, y);
            }
        }
        let before = session.dungeon.clone();
        add_wall(&mut session);
        assert_eq!(session.dungeon, before);
    }
}
