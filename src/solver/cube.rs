//! Sticker-level cube model.
//!
//! Every sticker is tracked by the lattice position of its cubie and its
//! outward normal. A face turn rotates both; reading the model back into
//! a facelet string goes through [`Face::slot_of`], so the scan layout
//! and the turn geometry share one definition.

use super::moves::{Move, MoveSequence};
use crate::facelets::{Face, FaceletString, FACE_ORDER};
use glam::IVec3;

/// Rotates `v` a quarter turn clockwise as seen looking down `normal`.
fn rotate_clockwise(v: IVec3, normal: IVec3) -> IVec3 {
    normal * normal.dot(v) - normal.cross(v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sticker {
    position: IVec3,
    normal: IVec3,
    /// Face whose center color this sticker carries.
    label: Face,
}

/// A cube state that can be turned and serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeModel {
    stickers: Vec<Sticker>,
}

impl CubeModel {
    pub fn solved() -> Self {
        Self::from_facelets(&FaceletString::solved())
    }

    /// Builds a model with one sticker per facelet character.
    pub fn from_facelets(facelets: &FaceletString) -> Self {
        let stickers = facelets
            .faces()
            .enumerate()
            .map(|(i, label)| {
                let face = FACE_ORDER[i / 9];
                Sticker {
                    position: face.position_of(i % 9),
                    normal: face.normal(),
                    label,
                }
            })
            .collect();
        Self { stickers }
    }

    /// Applies one face turn.
    pub fn apply(&mut self, mv: Move) {
        let normal = mv.face.normal();
        for sticker in self.stickers.iter_mut().filter(|s| s.position.dot(normal) == 1) {
            for _ in 0..mv.turn.quarter_turns() {
                sticker.position = rotate_clockwise(sticker.position, normal);
                sticker.normal = rotate_clockwise(sticker.normal, normal);
            }
        }
    }

    pub fn apply_all(&mut self, moves: &MoveSequence) {
        for mv in moves.iter() {
            self.apply(mv);
        }
    }

    /// Serializes the current state.
    ///
    /// Turns permute stickers over the 54 surface slots, so sorting by
    /// slot yields exactly one letter per position.
    pub fn to_facelets(&self) -> FaceletString {
        let mut placed: Vec<(usize, Face)> = self
            .stickers
            .iter()
            .filter_map(|sticker| {
                let face = Face::from_normal(sticker.normal)?;
                let slot = face.slot_of(sticker.position)?;
                Some((face.index() * 9 + slot, sticker.label))
            })
            .collect();
        placed.sort_unstable_by_key(|&(index, _)| index);
        FaceletString::from_faces(placed.into_iter().map(|(_, label)| label))
    }

    pub fn is_solved(&self) -> bool {
        self.to_facelets().is_solved()
    }
}

impl Default for CubeModel {
    fn default() -> Self {
        Self::solved()
    }
}
