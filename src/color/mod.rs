//! Sticker colors and the RGB classifier.
//!
//! Camera samples are mapped to one of the six canonical sticker colors
//! by a fixed, ordered set of channel thresholds.

mod classifier;
mod palette;

pub use classifier::classify;
pub use palette::{slot_hex, FaceletColor, Rgb, INTERIOR_HEX, UNSET_HEX};
