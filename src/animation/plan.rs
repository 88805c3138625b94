//! Geometry of a single face turn.

use crate::facelets::Face;
use crate::solver::Move;
use glam::Vec3;
use std::fmt;

/// Coordinate beyond which a cubie belongs to an outer layer.
pub const LAYER_THRESHOLD: f32 = 0.5;

/// Rotation axis of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Selects the nine cubies of one outer layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSelector {
    pub axis: Axis,
    /// +1 selects the positive side of the axis, -1 the negative side.
    pub side: f32,
}

impl LayerSelector {
    pub fn contains(&self, position: Vec3) -> bool {
        self.axis.component(position) * self.side > LAYER_THRESHOLD
    }
}

/// Axis, layer and angle for one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnPlan {
    pub mv: Move,
    pub axis: Axis,
    pub layer: LayerSelector,
    /// Clockwise-positive angle as seen from the turning face.
    pub degrees: f32,
}

impl TurnPlan {
    pub fn for_move(mv: Move) -> Self {
        let (axis, side) = match mv.face {
            Face::R => (Axis::X, 1.0),
            Face::L => (Axis::X, -1.0),
            Face::U => (Axis::Y, 1.0),
            Face::D => (Axis::Y, -1.0),
            Face::F => (Axis::Z, 1.0),
            Face::B => (Axis::Z, -1.0),
        };
        Self {
            mv,
            axis,
            layer: LayerSelector { axis, side },
            degrees: mv.turn.degrees(),
        }
    }

    /// Signed right-handed rotation about the positive axis, in radians.
    ///
    /// Clockwise as seen from a face is a negative rotation about its
    /// outward normal, which points down the negative axis for L, D and B.
    pub fn radians(&self) -> f32 {
        -self.degrees.to_radians() * self.layer.side
    }
}
