//! Face-turn tokens in standard notation.

use crate::facelets::Face;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for a token that is not `X`, `X'` or `X2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move token {token:?}")]
pub struct MoveParseError {
    pub token: String,
}

/// How far a face turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Quarter turn, clockwise looking at the face.
    Clockwise,
    /// Quarter turn, counter-clockwise looking at the face.
    CounterClockwise,
    Half,
}

impl Turn {
    /// Clockwise quarter turns equivalent to this turn.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// Turn angle in degrees, clockwise-positive as seen from the face.
    pub fn degrees(self) -> f32 {
        match self {
            Turn::Clockwise => 90.0,
            Turn::CounterClockwise => -90.0,
            Turn::Half => 180.0,
        }
    }

    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }
}

/// A single face turn such as `R`, `U'` or `F2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// The turn that undoes this one.
    pub fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || MoveParseError {
            token: token.to_owned(),
        };
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(err)?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => return Err(err()),
        };
        Ok(Move::new(face, turn))
    }
}

/// An ordered list of moves, written space-separated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Move> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    /// The sequence that undoes this one.
    pub fn inverse(&self) -> MoveSequence {
        Self(self.0.iter().rev().map(|m| m.inverse()).collect())
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl FromStr for MoveSequence {
    type Err = MoveParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}
