//! Facelet state store.
//!
//! Holds the 6x9 grid of captured sticker colors, checks completeness and
//! per-face centers, and serializes the grid into the 54-character string
//! a solver expects.

mod face;
mod state;
mod string;

pub use face::{Face, CENTER, FACE_ORDER};
pub use state::{FaceSlots, FaceletError, FaceletState};
pub use string::{FaceletString, FACELET_COUNT};
