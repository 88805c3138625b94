//! The 6x9 facelet grid.

use super::face::{Face, CENTER, FACE_ORDER};
use super::string::FaceletString;
use crate::color::FaceletColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nine slots of one face, row-major. `None` is an unset slot.
pub type FaceSlots = [Option<FaceletColor>; 9];

/// Errors raised by the facelet store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaceletError {
    #[error("face {face} center is {found}, expected {expected}")]
    CenterMismatch {
        face: Face,
        expected: FaceletColor,
        found: FaceletColor,
    },
    #[error("slot index {0} out of range (0-8)")]
    SlotOutOfRange(usize),
    #[error("facelet state incomplete: {missing} of 54 slots unset")]
    Incomplete { missing: usize },
    #[error("facelet string must be 54 characters, got {0}")]
    InvalidLength(usize),
    #[error("invalid facelet character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },
}

/// Captured sticker colors for all six faces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StateRecord", into = "StateRecord")]
pub struct FaceletState {
    faces: [FaceSlots; 6],
}

impl FaceletState {
    /// Creates an empty state with every slot unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// A solved cube: every face filled with its canonical color.
    pub fn solved() -> Self {
        let mut state = Self::new();
        for face in FACE_ORDER {
            state.faces[face.index()] = [Some(face.canonical_color()); 9];
        }
        state
    }

    /// Sets one slot.
    pub fn set(&mut self, face: Face, slot: usize, color: FaceletColor) -> Result<(), FaceletError> {
        let slots = &mut self.faces[face.index()];
        let entry = slots.get_mut(slot).ok_or(FaceletError::SlotOutOfRange(slot))?;
        *entry = Some(color);
        Ok(())
    }

    pub fn get(&self, face: Face, slot: usize) -> Option<FaceletColor> {
        self.faces[face.index()].get(slot).copied().flatten()
    }

    pub fn face(&self, face: Face) -> &FaceSlots {
        &self.faces[face.index()]
    }

    pub(crate) fn face_mut(&mut self, face: Face) -> &mut FaceSlots {
        &mut self.faces[face.index()]
    }

    /// Number of unset slots across the whole cube.
    pub fn missing(&self) -> usize {
        self.faces.iter().flatten().filter(|slot| slot.is_none()).count()
    }

    /// True iff all 54 slots hold a color.
    pub fn is_complete(&self) -> bool {
        self.missing() == 0
    }

    /// True iff the center of `face` holds the face's canonical color.
    pub fn center_is_valid(&self, face: Face) -> bool {
        self.get(face, CENTER) == Some(face.canonical_color())
    }

    /// Stores a full face after checking its center.
    ///
    /// A mismatched center leaves the stored face untouched.
    pub fn commit_face(&mut self, face: Face, colors: [FaceletColor; 9]) -> Result<(), FaceletError> {
        let expected = face.canonical_color();
        let found = colors[CENTER];
        if found != expected {
            tracing::debug!(%face, %expected, %found, "Rejected face commit");
            return Err(FaceletError::CenterMismatch {
                face,
                expected,
                found,
            });
        }
        self.store_face(face, colors);
        Ok(())
    }

    /// Stores a full face whose center the caller has already checked.
    pub(crate) fn store_face(&mut self, face: Face, colors: [FaceletColor; 9]) {
        self.faces[face.index()] = colors.map(Some);
        tracing::debug!(%face, "Committed face");
    }

    /// Serializes a complete state into solver input.
    pub fn to_facelet_string(&self) -> Result<FaceletString, FaceletError> {
        let missing = self.missing();
        if missing > 0 {
            return Err(FaceletError::Incomplete { missing });
        }
        let text: String = self
            .faces
            .iter()
            .flatten()
            .flatten()
            .map(|&color| Face::for_color(color).letter())
            .collect();
        FaceletString::parse(&text)
    }
}

/// Serialized form: one array per face letter.
#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
struct StateRecord {
    U: FaceSlots,
    R: FaceSlots,
    F: FaceSlots,
    D: FaceSlots,
    L: FaceSlots,
    B: FaceSlots,
}

impl From<StateRecord> for FaceletState {
    fn from(record: StateRecord) -> Self {
        Self {
            faces: [record.U, record.R, record.F, record.D, record.L, record.B],
        }
    }
}

impl From<FaceletState> for StateRecord {
    fn from(state: FaceletState) -> Self {
        let [u, r, f, d, l, b] = state.faces;
        Self {
            U: u,
            R: r,
            F: f,
            D: d,
            L: l,
            B: b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_incomplete() {
        let state = FaceletState::new();
        assert!(!state.is_complete());
        assert_eq!(state.missing(), 54);
        assert!(matches!(
            state.to_facelet_string(),
            Err(FaceletError::Incomplete { missing: 54 })
        ));
    }

    #[test]
    fn test_solved_serializes() {
        let state = FaceletState::solved();
        assert!(state.is_complete());
        assert_eq!(
            state.to_facelet_string().unwrap().as_str(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
    }

    #[test]
    fn test_commit_rejects_wrong_center_without_mutation() {
        let mut state = FaceletState::new();
        state.set(Face::F, 0, FaceletColor::Red).unwrap();
        let before = state.clone();

        let result = state.commit_face(Face::F, [FaceletColor::White; 9]);
        assert!(matches!(
            result,
            Err(FaceletError::CenterMismatch {
                face: Face::F,
                expected: FaceletColor::Green,
                found: FaceletColor::White,
            })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_commit_accepts_matching_center() {
        let mut state = FaceletState::new();
        state.commit_face(Face::U, [FaceletColor::White; 9]).unwrap();
        assert!(state.center_is_valid(Face::U));
        assert!(!state.center_is_valid(Face::R));
        assert_eq!(state.missing(), 45);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut state = FaceletState::new();
        assert_eq!(
            state.set(Face::U, 9, FaceletColor::White),
            Err(FaceletError::SlotOutOfRange(9))
        );
    }

    #[test]
    fn test_json_uses_face_letters() {
        let json = serde_json::to_value(FaceletState::solved()).unwrap();
        assert_eq!(json["F"][4], "green");
        let back: FaceletState = serde_json::from_value(json).unwrap();
        assert_eq!(back, FaceletState::solved());
    }
}
