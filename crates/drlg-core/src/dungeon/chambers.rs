//! Chamber filler pass
//!
//! Rewrites the up-to-three fixed chambers as pillared halls, carves the
//! arched corridors that join them, and drops the per-level set piece into
//! one of the surviving chambers.

use super::grid::{GridRect, Point};
use super::level::GenerationSession;
use super::miniset::{CORNERSTONE_ROOM_PATTERN, UBER_ROOM_PATTERN};
use super::setpiece::{set_set_piece_room, SetPieceOverlay};

/// Rewrite one 12x12 chamber frame. The flags select which of the four
/// edges opens into a neighboring chamber with an arch run.
fn generate_chamber(
    session: &mut GenerationSession,
    sx: usize,
    sy: usize,
    topflag: bool,
    bottomflag: bool,
    leftflag: bool,
    rightflag: bool,
) {
    let d = &mut session.dungeon.tiles;
    if topflag {
        d[sx + 2][sy] = 12;
        d[sx + 3][sy] = 12;
        d[sx + 4][sy] = 3;
        d[sx + 7][sy] = 9;
        d[sx + 8][sy] = 12;
        d[sx + 9][sy] = 2;
    }
    if bottomflag {
        let sy = sy + 11;
        d[sx + 2][sy] = 10;
        d[sx + 3][sy] = 12;
        d[sx + 4][sy] = 8;
        d[sx + 7][sy] = 5;
        d[sx + 8][sy] = 12;
        if d[sx + 9][sy] != 4 {
            d[sx + 9][sy] = 21;
        }
    }
    if leftflag {
        d[sx][sy + 2] = 11;
        d[sx][sy + 3] = 11;
        d[sx][sy + 4] = 3;
        d[sx][sy + 7] = 8;
        d[sx][sy + 8] = 11;
        d[sx][sy + 9] = 1;
    }
    if rightflag {
        let sx = sx + 11;
        d[sx][sy + 2] = 14;
        d[sx][sy + 3] = 11;
        d[sx][sy + 4] = 9;
        d[sx][sy + 7] = 5;
        d[sx][sy + 8] = 11;
        if d[sx][sy + 9] != 4 {
            d[sx][sy + 9] = 21;
        }
    }

    for j in 1..11 {
        for i in 1..11 {
            session.dungeon.tiles[i + sx][j + sy] = 13;
            session.chamber.set(i + sx, j + sy);
        }
    }

    session.dungeon.tiles[sx + 4][sy + 4] = 15;
    session.dungeon.tiles[sx + 7][sy + 4] = 15;
    session.dungeon.tiles[sx + 4][sy + 7] = 15;
    session.dungeon.tiles[sx + 7][sy + 7] = 15;
}

/// Carve the double arch run of a corridor segment between two chambers.
fn generate_hall(session: &mut GenerationSession, x1: usize, y1: usize, x2: usize, y2: usize) {
    if y1 == y2 {
        for i in x1..x2 {
            session.dungeon.tiles[i][y1] = 12;
            session.dungeon.tiles[i][y1 + 3] = 12;
        }
        return;
    }

    for i in y1..y2 {
        session.dungeon.tiles[x1][i] = 11;
        session.dungeon.tiles[x1 + 3][i] = 11;
    }
}

/// Pick one of the present chambers, preferring a fair draw among them, and
/// return its set-piece anchor position.
fn select_chamber(session: &mut GenerationSession) -> Point {
    let chamber = if !session.has_chamber1 {
        if session.rng.generate_rnd(2) != 0 {
            3
        } else {
            2
        }
    } else if !session.has_chamber2 {
        if session.rng.generate_rnd(2) != 0 {
            1
        } else {
            3
        }
    } else if !session.has_chamber3 {
        if session.rng.generate_rnd(2) != 0 {
            1
        } else {
            2
        }
    } else {
        session.rng.generate_rnd(3) + 1
    };

    match chamber {
        1 => {
            if session.vertical_layout {
                Point::new(16, 2)
            } else {
                Point::new(2, 16)
            }
        }
        3 => {
            if session.vertical_layout {
                Point::new(16, 30)
            } else {
                Point::new(30, 16)
            }
        }
        _ => Point::new(16, 16),
    }
}

fn set_vault_room(session: &mut GenerationSession) {
    let position = select_chamber(session);
    session.set_piece = Some(GridRect {
        position,
        width: UBER_ROOM_PATTERN.width as i32,
        height: UBER_ROOM_PATTERN.height as i32,
    });
    UBER_ROOM_PATTERN.place(session, position, true);
}

fn set_corner_room(session: &mut GenerationSession) {
    let position = select_chamber(session);
    session.set_piece = Some(GridRect {
        position,
        width: CORNERSTONE_ROOM_PATTERN.width as i32,
        height: CORNERSTONE_ROOM_PATTERN.height as i32,
    });
    CORNERSTONE_ROOM_PATTERN.place(session, position, true);
}

/// Chamber set-room selection for [`fill_chambers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChamberSetRoom<'a> {
    /// No themed room this level.
    #[default]
    None,
    /// Sealed vault room (deepest crypt level).
    Vault,
    /// Cornerstone room (first crypt level).
    Cornerstone,
    /// Quest set piece stamped over one chamber.
    SetPiece(&'a SetPieceOverlay),
}

pub fn fill_chambers(session: &mut GenerationSession, set_room: ChamberSetRoom) {
    if !session.vertical_layout {
        if session.has_chamber1 {
            generate_chamber(session, 0, 14, false, false, false, true);
        }

        if !session.has_chamber3 {
            generate_chamber(session, 14, 14, false, false, true, false);
        } else if !session.has_chamber1 {
            generate_chamber(session, 14, 14, false, false, false, true);
        } else if session.has_chamber1 && session.has_chamber2 && session.has_chamber3 {
            generate_chamber(session, 14, 14, false, false, true, true);
        }

        if session.has_chamber3 {
            generate_chamber(session, 28, 14, false, false, true, false);
        }
        if session.has_chamber1 && session.has_chamber2 {
            generate_hall(session, 12, 18, 14, 18);
        }
        if session.has_chamber2 && session.has_chamber3 {
            generate_hall(session, 26, 18, 28, 18);
        }
        if !session.has_chamber2 {
            generate_hall(session, 12, 18, 28, 18);
        }
    } else {
        if session.has_chamber1 {
            generate_chamber(session, 14, 0, false, true, false, false);
        }

        if !session.has_chamber3 {
            generate_chamber(session, 14, 14, true, false, false, false);
        } else if !session.has_chamber1 {
            generate_chamber(session, 14, 14, false, true, false, false);
        } else if session.has_chamber1 && session.has_chamber2 && session.has_chamber3 {
            generate_chamber(session, 14, 14, true, true, false, false);
        }

        if session.has_chamber3 {
            generate_chamber(session, 14, 28, true, false, false, false);
        }
        if session.has_chamber1 && session.has_chamber2 {
            generate_hall(session, 18, 12, 18, 14);
        }
        if session.has_chamber2 && session.has_chamber3 {
            generate_hall(session, 18, 26, 18, 28);
        }
        if !session.has_chamber2 {
            generate_hall(session, 18, 12, 18, 28);
        }
    }

    match set_room {
        ChamberSetRoom::None => {}
        ChamberSetRoom::Vault => set_vault_room(session),
        ChamberSetRoom::Cornerstone => set_corner_room(session),
        ChamberSetRoom::SetPiece(overlay) => {
            let position = select_chamber(session);
            set_set_piece_room(session, overlay, position, 13);
        }
    }
}
