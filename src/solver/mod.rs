//! Moves, the cube model, and the solver seam.
//!
//! Solving itself is delegated: anything implementing [`Solver`] turns a
//! facelet string into a move sequence. The crate ships two stand-ins,
//! [`ScriptedSolver`] for fixed answers and [`ScrambleSolver`], which
//! answers for a cube it scrambled itself.

mod cube;
mod moves;
mod scramble;

pub use cube::CubeModel;
pub use moves::{Move, MoveParseError, MoveSequence, Turn};
pub use scramble::Scramble;

use crate::facelets::{Face, FaceletString, CENTER, FACE_ORDER};
use thiserror::Error;

/// Errors reported by a solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("malformed facelet string: {0}")]
    Malformed(String),
    #[error("cube state is not solvable")]
    Unsolvable,
    #[error("solver backend failed: {0}")]
    Backend(String),
}

impl From<MoveParseError> for SolveError {
    fn from(err: MoveParseError) -> Self {
        SolveError::Backend(err.to_string())
    }
}

/// Computes a solution for a scanned cube.
pub trait Solver {
    fn solve(&self, facelets: &FaceletString) -> Result<MoveSequence, SolveError>;
}

/// Cheap plausibility checks every physical cube passes: nine stickers
/// per color and each center on its own face.
pub fn check_plausible(facelets: &FaceletString) -> Result<(), SolveError> {
    let mut counts = [0usize; 6];
    for face in facelets.faces() {
        counts[face.index()] += 1;
    }
    if let Some(face) = FACE_ORDER.into_iter().find(|f| counts[f.index()] != 9) {
        return Err(SolveError::Malformed(format!(
            "{} stickers of {}, expected 9",
            counts[face.index()],
            face
        )));
    }

    let letters: Vec<Face> = facelets.faces().collect();
    for face in FACE_ORDER {
        let center = letters[face.index() * 9 + CENTER];
        if center != face {
            return Err(SolveError::Malformed(format!(
                "center of {face} is {center}"
            )));
        }
    }
    Ok(())
}

/// Returns a fixed solution regardless of input, after plausibility checks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSolver {
    solution: MoveSequence,
}

impl ScriptedSolver {
    pub fn new(solution: MoveSequence) -> Self {
        Self { solution }
    }

    /// Parses a space-delimited solution.
    pub fn from_text(text: &str) -> Result<Self, MoveParseError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Solver for ScriptedSolver {
    fn solve(&self, facelets: &FaceletString) -> Result<MoveSequence, SolveError> {
        check_plausible(facelets)?;
        if facelets.is_solved() {
            return Ok(MoveSequence::default());
        }
        Ok(self.solution.clone())
    }
}

/// Solves exactly the cube produced by a known scramble, by undoing it.
///
/// Any other unsolved state is reported as unsolvable.
#[derive(Debug, Clone)]
pub struct ScrambleSolver {
    scramble: Scramble,
}

impl ScrambleSolver {
    pub fn new(scramble: Scramble) -> Self {
        Self { scramble }
    }
}

impl Solver for ScrambleSolver {
    fn solve(&self, facelets: &FaceletString) -> Result<MoveSequence, SolveError> {
        check_plausible(facelets)?;
        if facelets.is_solved() {
            return Ok(MoveSequence::default());
        }
        if facelets != self.scramble.facelets() {
            tracing::warn!(facelets = %facelets, "State does not match the known scramble");
            return Err(SolveError::Unsolvable);
        }
        let solution = self.scramble.moves().inverse();
        tracing::info!(moves = solution.len(), "Solved scramble");
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_cube_yields_empty_solution() {
        let solver = ScriptedSolver::from_text("R U").unwrap();
        let solution = solver.solve(&FaceletString::solved()).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_scramble_solver_undoes_scramble() {
        let scramble = Scramble::seeded(11, 15);
        let solver = ScrambleSolver::new(scramble.clone());

        let solution = solver.solve(scramble.facelets()).unwrap();
        let mut cube = CubeModel::from_facelets(scramble.facelets());
        cube.apply_all(&solution);
        assert!(cube.is_solved());
    }

    #[test]
    fn test_unknown_state_is_unsolvable() {
        let solver = ScrambleSolver::new(Scramble::seeded(1, 10));
        let other = Scramble::seeded(2, 10);
        assert_eq!(solver.solve(other.facelets()), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_wrong_sticker_counts_are_malformed() {
        let mut text = FaceletString::SOLVED.to_owned();
        text.replace_range(0..1, "R");
        let facelets = FaceletString::parse(&text).unwrap();
        assert!(matches!(
            ScriptedSolver::default().solve(&facelets),
            Err(SolveError::Malformed(_))
        ));
    }

    #[test]
    fn test_swapped_centers_are_malformed() {
        let mut text = FaceletString::SOLVED.to_owned();
        text.replace_range(4..5, "R");
        text.replace_range(13..14, "U");
        let facelets = FaceletString::parse(&text).unwrap();
        let err = check_plausible(&facelets).unwrap_err();
        assert_eq!(err, SolveError::Malformed("center of U is R".into()));
    }
}
