//! Reproducible random scrambles.

use super::cube::CubeModel;
use super::moves::{Move, MoveSequence, Turn};
use crate::facelets::{FaceletString, FACE_ORDER};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

const TURNS: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

/// A scramble and the cube state it produces from solved.
#[derive(Debug, Clone)]
pub struct Scramble {
    moves: MoveSequence,
    facelets: FaceletString,
}

impl Scramble {
    /// Draws `length` moves, never turning the same face twice in a row.
    pub fn random<R: RngCore>(rng: &mut R, length: usize) -> Self {
        let mut moves: Vec<Move> = Vec::with_capacity(length);
        while moves.len() < length {
            let face = FACE_ORDER[(rng.next_u32() % 6) as usize];
            if moves.last().is_some_and(|prev| prev.face == face) {
                continue;
            }
            let turn = TURNS[(rng.next_u32() % 3) as usize];
            moves.push(Move::new(face, turn));
        }
        Self::from_moves(moves.into())
    }

    /// Deterministic scramble for a seed.
    pub fn seeded(seed: u64, length: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng, length)
    }

    /// Scramble drawn from OS entropy.
    pub fn from_os_entropy(length: usize) -> Self {
        Self::random(&mut rand_core::OsRng, length)
    }

    pub fn from_moves(moves: MoveSequence) -> Self {
        let mut cube = CubeModel::solved();
        cube.apply_all(&moves);
        Self {
            facelets: cube.to_facelets(),
            moves,
        }
    }

    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    /// The scrambled cube.
    pub fn facelets(&self) -> &FaceletString {
        &self.facelets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let a = Scramble::seeded(7, 20);
        let b = Scramble::seeded(7, 20);
        assert_eq!(a.moves(), b.moves());
        assert_eq!(a.facelets(), b.facelets());
        assert_eq!(a.moves().len(), 20);
    }

    #[test]
    fn test_no_repeated_faces() {
        let scramble = Scramble::seeded(42, 50);
        let moves = scramble.moves().as_slice();
        assert!(moves.windows(2).all(|w| w[0].face != w[1].face));
    }

    #[test]
    fn test_inverse_restores_solved() {
        let scramble = Scramble::seeded(3, 25);
        let mut cube = CubeModel::from_facelets(scramble.facelets());
        assert!(!cube.is_solved());
        cube.apply_all(&scramble.moves().inverse());
        assert!(cube.is_solved());
    }

    #[test]
    fn test_os_entropy_scramble_has_requested_length() {
        let scramble = Scramble::from_os_entropy(12);
        assert_eq!(scramble.moves().len(), 12);
        let moves = scramble.moves().as_slice();
        assert!(moves.windows(2).all(|w| w[0].face != w[1].face));

        let mut cube = CubeModel::from_facelets(scramble.facelets());
        cube.apply_all(&scramble.moves().inverse());
        assert!(cube.is_solved());
    }
}
