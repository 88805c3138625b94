//! Face identifiers and the sticker layout of each face.
//!
//! Coordinates follow a right-handed frame with +y up, +z toward the
//! viewer and +x to the right. Cubies sit on the integer lattice
//! {-1, 0, 1}^3. Each face is read row-major as seen from outside the
//! cube: side faces with U at the top, U with B at the top, D with F at
//! the top.

use crate::color::FaceletColor;
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six faces in standard cube notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

/// Faces in scan and serialization order.
pub const FACE_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

/// Slot index of the fixed center sticker.
pub const CENTER: usize = 4;

impl Face {
    /// Position of this face in [`FACE_ORDER`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The face scanned after this one, if any.
    pub fn next(self) -> Option<Face> {
        FACE_ORDER.get(self.index() + 1).copied()
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::U => "up",
            Face::R => "right",
            Face::F => "front",
            Face::D => "down",
            Face::L => "left",
            Face::B => "back",
        }
    }

    /// Color of this face's center sticker.
    pub fn canonical_color(self) -> FaceletColor {
        match self {
            Face::U => FaceletColor::White,
            Face::R => FaceletColor::Red,
            Face::F => FaceletColor::Green,
            Face::D => FaceletColor::Yellow,
            Face::L => FaceletColor::Orange,
            Face::B => FaceletColor::Blue,
        }
    }

    /// The face whose center carries `color`.
    pub fn for_color(color: FaceletColor) -> Face {
        match color {
            FaceletColor::White => Face::U,
            FaceletColor::Red => Face::R,
            FaceletColor::Green => Face::F,
            FaceletColor::Yellow => Face::D,
            FaceletColor::Orange => Face::L,
            FaceletColor::Blue => Face::B,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> IVec3 {
        match self {
            Face::U => IVec3::Y,
            Face::R => IVec3::X,
            Face::F => IVec3::Z,
            Face::D => IVec3::NEG_Y,
            Face::L => IVec3::NEG_X,
            Face::B => IVec3::NEG_Z,
        }
    }

    pub fn from_normal(normal: IVec3) -> Option<Face> {
        FACE_ORDER.into_iter().find(|face| face.normal() == normal)
    }

    /// Scan-grid slot of the sticker on this face belonging to the cubie
    /// at `position`.
    ///
    /// Returns `None` if the cubie does not lie on this face.
    pub fn slot_of(self, position: IVec3) -> Option<usize> {
        let IVec3 { x, y, z } = position;
        if position.dot(self.normal()) != 1 || position.abs().max_element() > 1 {
            return None;
        }
        let (row, col) = match self {
            Face::U => (z + 1, x + 1),
            Face::R => (1 - y, 1 - z),
            Face::F => (1 - y, x + 1),
            Face::D => (1 - z, x + 1),
            Face::L => (1 - y, z + 1),
            Face::B => (1 - y, 1 - x),
        };
        Some((row * 3 + col) as usize)
    }

    /// Lattice position of the cubie carrying slot `slot` of this face.
    pub fn position_of(self, slot: usize) -> IVec3 {
        debug_assert!(slot < 9);
        let row = (slot / 3) as i32;
        let col = (slot % 3) as i32;
        match self {
            Face::U => IVec3::new(col - 1, 1, row - 1),
            Face::R => IVec3::new(1, 1 - row, 1 - col),
            Face::F => IVec3::new(col - 1, 1 - row, 1),
            Face::D => IVec3::new(col - 1, -1, 1 - row),
            Face::L => IVec3::new(-1, 1 - row, col - 1),
            Face::B => IVec3::new(1 - col, 1 - row, -1),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_and_position_are_inverse() {
        for face in FACE_ORDER {
            for slot in 0..9 {
                let position = face.position_of(slot);
                assert_eq!(face.slot_of(position), Some(slot), "{face}{slot}");
            }
        }
    }

    #[test]
    fn test_center_slot_is_face_center() {
        for face in FACE_ORDER {
            assert_eq!(face.position_of(CENTER), face.normal());
        }
    }

    #[test]
    fn test_corner_stickers_share_a_cubie() {
        // URF corner: U9, R1, F3 (1-based)
        let urf = IVec3::new(1, 1, 1);
        assert_eq!(Face::U.slot_of(urf), Some(8));
        assert_eq!(Face::R.slot_of(urf), Some(0));
        assert_eq!(Face::F.slot_of(urf), Some(2));

        // DBL corner: D7, L7, B9
        let dbl = IVec3::new(-1, -1, -1);
        assert_eq!(Face::D.slot_of(dbl), Some(6));
        assert_eq!(Face::L.slot_of(dbl), Some(6));
        assert_eq!(Face::B.slot_of(dbl), Some(8));
    }

    #[test]
    fn test_off_face_position_rejected() {
        assert_eq!(Face::U.slot_of(IVec3::new(0, 0, 1)), None);
        assert_eq!(Face::L.slot_of(IVec3::new(1, 0, 0)), None);
    }

    #[test]
    fn test_color_face_bijection() {
        for face in FACE_ORDER {
            assert_eq!(Face::for_color(face.canonical_color()), face);
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(Face::from_normal(face.normal()), Some(face));
        }
    }

    #[test]
    fn test_next_face() {
        assert_eq!(Face::U.next(), Some(Face::R));
        assert_eq!(Face::B.next(), None);
    }
}
