//! Quest set-piece overlays
//!
//! A set piece is a rectangular tile overlay stamped over one chamber
//! before wall growth, reserving space for a quest room. The binary format
//! is a little-endian u16 stream: width, height, then a row-major tile
//! layer where zero means "floor of the surrounding chamber".

use thiserror::Error;

use super::grid::{GridRect, Point};
use super::level::GenerationSession;
use crate::{DMAXX, DMAXY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetPieceError {
    #[error("overlay data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("overlay data is not an even number of bytes")]
    OddLength,
    #[error("overlay size {width}x{height} does not fit the dungeon grid")]
    Oversized { width: u16, height: u16 },
}

/// A parsed set-piece overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPieceOverlay {
    width: u16,
    height: u16,
    tiles: Vec<u8>,
}

impl SetPieceOverlay {
    /// Parse the little-endian u16 stream of a `.DUN` overlay.
    pub fn parse(data: &[u8]) -> Result<Self, SetPieceError> {
        if data.len() % 2 != 0 {
            return Err(SetPieceError::OddLength);
        }
        if data.len() < 4 {
            return Err(SetPieceError::Truncated {
                expected: 4,
                actual: data.len(),
            });
        }
        let width = u16::from_le_bytes([data[0], data[1]]);
        let height = u16::from_le_bytes([data[2], data[3]]);
        if usize::from(width) > DMAXX || usize::from(height) > DMAXY {
            return Err(SetPieceError::Oversized { width, height });
        }
        let expected = 4 + 2 * usize::from(width) * usize::from(height);
        if data.len() < expected {
            return Err(SetPieceError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        // only the low byte of each layer entry is a tile id
        let tiles = data[4..expected]
            .chunks_exact(2)
            .map(|pair| pair[0])
            .collect();
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Build an overlay directly from a row-major tile layer.
    pub fn from_tiles(width: u16, height: u16, tiles: Vec<u8>) -> Result<Self, SetPieceError> {
        if usize::from(width) > DMAXX || usize::from(height) > DMAXY {
            return Err(SetPieceError::Oversized { width, height });
        }
        let expected = usize::from(width) * usize::from(height);
        if tiles.len() != expected {
            return Err(SetPieceError::Truncated {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn tile(&self, i: usize, j: usize) -> u8 {
        self.tiles[j * usize::from(self.width) + i]
    }
}

/// Stamp `overlay` at `position` and record it as the level's set piece.
/// Nonzero entries land protected; zero entries become `floor_id`.
pub fn set_set_piece_room(
    session: &mut GenerationSession,
    overlay: &SetPieceOverlay,
    position: Point,
    floor_id: u8,
) {
    for j in 0..usize::from(overlay.height) {
        for i in 0..usize::from(overlay.width) {
            let x = position.x as usize + i;
            let y = position.y as usize + j;
            if x >= DMAXX || y >= DMAXY {
                continue;
            }
            let tile = overlay.tile(i, j);
            if tile != 0 {
                session.dungeon.tiles[x][y] = tile;
                session.protected.set(x, y);
            } else {
                session.dungeon.tiles[x][y] = floor_id;
            }
        }
    }
    session.set_piece = Some(GridRect {
        position,
        width: i32::from(overlay.width),
        height: i32::from(overlay.height),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    fn encode(width: u16, height: u16, tiles: &[u16]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        for t in tiles {
            data.extend_from_slice(&t.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_parse_reads_header_and_layer() {
        let data = encode(2, 3, &[1, 2, 3, 4, 5, 6]);
        let overlay = SetPieceOverlay::parse(&data).unwrap();
        assert_eq!(overlay.width(), 2);
        assert_eq!(overlay.height(), 3);
        assert_eq!(overlay.tile(1, 2), 6);
    }

    #[test]
    fn test_parse_rejects_truncated_layer() {
        let data = encode(4, 4, &[0; 3]);
        assert_eq!(
            SetPieceOverlay::parse(&data),
            Err(SetPieceError::Truncated {
                expected: 4 + 32,
                actual: 10
            })
        );
    }

    #[test]
    fn test_parse_rejects_odd_length() {
        assert_eq!(
            SetPieceOverlay::parse(&[0, 0, 1]),
            Err(SetPieceError::OddLength)
        );
    }

    #[test]
    fn test_parse_rejects_oversized() {
        let data = encode(41, 1, &[0; 41]);
        assert!(matches!(
            SetPieceOverlay::parse(&data),
            Err(SetPieceError::Oversized { width: 41, .. })
        ));
    }

    #[test]
    fn test_place_protects_nonzero_and_floors_zero() {
        let overlay = SetPieceOverlay::from_tiles(2, 2, vec![7, 0, 0, 9]).unwrap();
        let mut session = GenerationSession::new(GameRng::new(1));
        session.dungeon.fill(22);
        set_set_piece_room(&mut session, &overlay, Point::new(10, 20), 13);
        assert_eq!(session.dungeon.tiles[10][20], 7);
        assert!(session.protected.test(10, 20));
        assert_eq!(session.dungeon.tiles[11][20], 13);
        assert!(!session.protected.test(11, 20));
        assert_eq!(session.dungeon.tiles[11][21], 9);
        let piece = session.set_piece.unwrap();
        assert_eq!(piece.position, Point::new(10, 20));
        assert_eq!(piece.width, 2);
        assert_eq!(piece.height, 2);
    }
}
