//! The 54-character solver input format.

use super::face::{Face, FACE_ORDER};
use super::state::{FaceletError, FaceletState};
use std::fmt;

/// Number of stickers on a cube.
pub const FACELET_COUNT: usize = 54;

/// A validated facelet string: faces in U,R,F,D,L,B order, nine letters
/// each, every letter naming the face whose center shares that color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceletString(String);

impl FaceletString {
    /// The string of a solved cube.
    pub const SOLVED: &'static str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    pub fn parse(text: &str) -> Result<Self, FaceletError> {
        let count = text.chars().count();
        if count != FACELET_COUNT {
            return Err(FaceletError::InvalidLength(count));
        }
        if let Some((position, found)) = text
            .chars()
            .enumerate()
            .find(|&(_, c)| Face::from_letter(c).is_none())
        {
            return Err(FaceletError::InvalidCharacter { position, found });
        }
        Ok(Self(text.to_owned()))
    }

    pub fn solved() -> Self {
        Self(Self::SOLVED.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_solved(&self) -> bool {
        self.0 == Self::SOLVED
    }

    /// Face letter at each position, in order.
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.0.chars().filter_map(Face::from_letter)
    }

    /// Builds a string from faces already in facelet order.
    ///
    /// Every letter is valid by construction; the caller supplies 54.
    pub(crate) fn from_faces(faces: impl IntoIterator<Item = Face>) -> Self {
        Self(faces.into_iter().map(Face::letter).collect())
    }

    /// Maps every letter back through the color table.
    pub fn to_state(&self) -> FaceletState {
        let letters: Vec<Face> = self.faces().collect();
        let mut state = FaceletState::new();
        for (face, chunk) in FACE_ORDER.into_iter().zip(letters.chunks(9)) {
            for (slot, letter) in state.face_mut(face).iter_mut().zip(chunk) {
                *slot = Some(letter.canonical_color());
            }
        }
        state
    }
}

impl fmt::Display for FaceletString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FaceletString {
    type Err = FaceletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
