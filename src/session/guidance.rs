//! User-facing guidance produced by the scan workflow.
//!
//! Guidance is a normal outcome, not an error: a wrong center or a
//! half-filled grid simply tells the user what to fix.

use crate::color::FaceletColor;
use crate::facelets::Face;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guidance {
    /// Hold the given face up to the camera.
    PositionFace { face: Face },
    /// The center cell shows the expected color.
    CenterDetected { color: FaceletColor },
    /// The center cell shows the wrong color for the current face.
    CenterMismatch {
        face: Face,
        expected: FaceletColor,
        found: FaceletColor,
    },
    /// Some of the nine cells have no color yet.
    IncompleteView { missing: usize },
    /// Manual painting mode is on.
    ManualMode,
    AllFacesCaptured,
    FinishAllFaces,
    Confirmed,
}

impl Guidance {
    /// True for messages that block a transition.
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Guidance::CenterMismatch { .. } | Guidance::IncompleteView { .. } | Guidance::FinishAllFaces
        )
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guidance::PositionFace { face } => write!(
                f,
                "Position the {} face ({}) in the grid",
                face.canonical_color().name().to_uppercase(),
                face.name()
            ),
            Guidance::CenterDetected { color } => {
                write!(f, "Center {} detected", color.name().to_uppercase())
            }
            Guidance::CenterMismatch { expected, found, .. } => write!(
                f,
                "Center must be {} (seeing {})",
                expected.name().to_uppercase(),
                found.name().to_uppercase()
            ),
            Guidance::IncompleteView { missing } => {
                write!(f, "{missing} cell(s) still have no color")
            }
            Guidance::ManualMode => f.write_str("Manual mode: pick a color and tap cells to paint"),
            Guidance::AllFacesCaptured => f.write_str("All faces captured"),
            Guidance::FinishAllFaces => f.write_str("Finish all faces first"),
            Guidance::Confirmed => f.write_str("Cube confirmed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Guidance::PositionFace { face: Face::R }.to_string(),
            "Position the RED face (right) in the grid"
        );
        let mismatch = Guidance::CenterMismatch {
            face: Face::U,
            expected: FaceletColor::White,
            found: FaceletColor::Yellow,
        };
        assert_eq!(mismatch.to_string(), "Center must be WHITE (seeing YELLOW)");
        assert!(mismatch.is_problem());
        assert!(!Guidance::AllFacesCaptured.is_problem());
    }
}
