//! Stairs placement
//!
//! The last gate of an attempt: both staircases (and the poison water
//! entrance when its quest is active) must find room on the finished
//! grid, otherwise the whole layout is thrown away and regenerated. The
//! entry context decides which placed feature becomes the player's view
//! position, in world coordinates.

use super::generation::{EntryContext, LevelRequest, LevelTheme, QuestFlags};
use super::grid::Displacement;
use super::level::GenerationSession;
use super::miniset::{
    place_miniset, L5_STAIRS_DOWN, L5_STAIRS_TOWN, L5_STAIRS_UP, L5_STAIRS_UP_HF, PWATER_ENTRY,
    STAIRS_DOWN, STAIRS_UP,
};

fn place_cathedral_stairs(session: &mut GenerationSession, request: &LevelRequest) -> bool {
    let mut success = true;

    if request.quests.contains(QuestFlags::POISON_WATER) {
        match place_miniset(session, &PWATER_ENTRY) {
            None => success = false,
            Some(position) => {
                let quest_position = position.mega_to_world() + Displacement::new(5, 7);
                session.pwater_position = Some(quest_position);
                if request.entry == EntryContext::ReturnLevel {
                    session.view_position = Some(quest_position);
                }
            }
        }
    }

    let up = if request.original_cathedral {
        &L5_STAIRS_UP
    } else {
        &STAIRS_UP
    };
    match place_miniset(session, up) {
        None => {
            // the legacy layout has no alternate stairs-up art to fall
            // back on
            if request.original_cathedral {
                return false;
            }
            success = false;
        }
        Some(position) => {
            if request.entry == EntryContext::Main {
                session.view_position = Some(position.mega_to_world() + Displacement::new(3, 4));
            }
        }
    }

    if request.quests.contains(QuestFlags::BANNER) {
        // the banner set piece carries its own stairs down
        if request.entry == EntryContext::Previous {
            if let Some(piece) = session.set_piece {
                session.view_position =
                    Some(piece.position.mega_to_world() + Displacement::new(4, 12));
            }
        }
    } else {
        match place_miniset(session, &STAIRS_DOWN) {
            None => success = false,
            Some(position) => {
                if request.entry == EntryContext::Previous {
                    session.view_position =
                        Some(position.mega_to_world() + Displacement::new(3, 3));
                }
            }
        }
    }

    success
}

fn place_crypt_stairs(session: &mut GenerationSession, request: &LevelRequest) -> bool {
    let mut success = true;

    let up = if request.level != 21 {
        &L5_STAIRS_UP_HF
    } else {
        &L5_STAIRS_TOWN
    };
    match place_miniset(session, up) {
        None => success = false,
        Some(position) => {
            if matches!(
                request.entry,
                EntryContext::Main | EntryContext::TownWarpDown
            ) {
                session.view_position = Some(position.mega_to_world() + Displacement::new(3, 5));
            }
        }
    }

    // the deepest level has no way further down
    if request.level != 24 {
        match place_miniset(session, &L5_STAIRS_DOWN) {
            None => success = false,
            Some(position) => {
                if request.entry == EntryContext::Previous {
                    session.view_position =
                        Some(position.mega_to_world() + Displacement::new(3, 7));
                }
            }
        }
    }

    success
}

/// Place all stairways for the attempt. Returns false when the layout
/// cannot host them and must be regenerated.
pub fn place_stairs(session: &mut GenerationSession, request: &LevelRequest) -> bool {
    match request.theme {
        LevelTheme::Crypt => place_crypt_stairs(session, request),
        LevelTheme::Cathedral => place_cathedral_stairs(session, request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::grid::Point;
    use crate::GameRng;

    // open floor with one horizontal wall row so the stairs-up patterns
    // have a seam to attach to
    fn cathedral_session(seed: u32) -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(seed));
        session.dungeon.fill(13);
        for x in 0..crate::DMAXX {
            session.dungeon.tiles[x][2] = 2;
        }
        session
    }

    // crypt stairs-up additionally needs two dirt rows above the wall
    fn crypt_session(seed: u32) -> GenerationSession {
        let mut session = GenerationSession::new(GameRng::new(seed));
        session.dungeon.fill(13);
        for x in 0..crate::DMAXX {
            session.dungeon.tiles[x][8] = 22;
            session.dungeon.tiles[x][9] = 22;
            session.dungeon.tiles[x][10] = 2;
        }
        session
    }

    fn request(theme: LevelTheme, level: u8, entry: EntryContext) -> LevelRequest {
        LevelRequest {
            seed: 0,
            theme,
            level,
            entry,
            quests: QuestFlags::empty(),
            multiplayer: false,
            original_cathedral: false,
            set_piece: None,
        }
    }

    #[test]
    fn test_cathedral_stairs_set_main_view() {
        let mut session = cathedral_session(3);
        let req = request(LevelTheme::Cathedral, 1, EntryContext::Main);
        assert!(place_stairs(&mut session, &req));
        let view = session.view_position.expect("main entry sets the view");
        // world coordinates are inside the 112x112 playfield
        assert!(view.x >= 16 && view.y >= 16);
        assert!(session.dungeon.count(63) >= 1);
    }

    #[test]
    fn test_cathedral_stairs_fail_without_room() {
        let mut session = GenerationSession::new(GameRng::new(3));
        session.dungeon.fill(22);
        let req = request(LevelTheme::Cathedral, 1, EntryContext::Main);
        assert!(!place_stairs(&mut session, &req));
    }

    #[test]
    fn test_original_cathedral_failure_is_fatal_before_stairs_down() {
        let mut session = GenerationSession::new(GameRng::new(3));
        session.dungeon.fill(22);
        let mut req = request(LevelTheme::Cathedral, 1, EntryContext::Main);
        req.original_cathedral = true;
        let calls_before = session.rng.call_count();
        assert!(!place_stairs(&mut session, &req));
        // no stairs-down draw happened after the fatal stairs-up miss
        assert_eq!(session.rng.call_count(), calls_before);
    }

    #[test]
    fn test_poison_water_records_quest_position() {
        let mut session = cathedral_session(3);
        let mut req = request(LevelTheme::Cathedral, 1, EntryContext::ReturnLevel);
        req.quests = QuestFlags::POISON_WATER;
        assert!(place_stairs(&mut session, &req));
        let quest = session.pwater_position.expect("quest position recorded");
        assert_eq!(session.view_position, Some(quest));
        assert!(session.dungeon.count(80) >= 1);
    }

    #[test]
    fn test_crypt_level_24_places_no_stairs_down() {
        let mut session = crypt_session(9);
        let req = request(LevelTheme::Crypt, 24, EntryContext::Main);
        assert!(place_stairs(&mut session, &req));
        // stairs-down tiles never appear on the last level
        assert_eq!(session.dungeon.count(45), 0);
        assert_eq!(session.dungeon.count(52), 0);
    }

    #[test]
    fn test_crypt_previous_entry_views_stairs_down() {
        let mut session = crypt_session(9);
        let req = request(LevelTheme::Crypt, 22, EntryContext::Previous);
        assert!(place_stairs(&mut session, &req));
        let view = session.view_position.expect("previous entry sets the view");
        assert_eq!((view.x - 16) % 2, 1);
    }

    #[test]
    fn test_town_stairs_on_first_crypt_level() {
        let mut session = crypt_session(9);
        let req = request(LevelTheme::Crypt, 21, EntryContext::TownWarpDown);
        assert!(place_stairs(&mut session, &req));
        // town portal stairs use their own tile set
        assert!(session.dungeon.count(62) >= 1);
    }

    #[test]
    fn test_view_position_uses_world_offset() {
        assert_eq!(
            Point::new(0, 0).mega_to_world() + Displacement::new(3, 4),
            Point::new(19, 20)
        );
    }
}
