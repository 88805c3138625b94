//! Threshold-based sticker color classification.
//!
//! The rules are hand-tuned and overlap; they are evaluated in a fixed
//! order and the first match wins.

use super::palette::{FaceletColor, Rgb};

/// Classifies an RGB sample into a sticker color.
///
/// Returns `None` when no rule matches. Callers must leave their state
/// untouched on a miss.
pub fn classify(sample: Rgb) -> Option<FaceletColor> {
    let (r, g, b) = (sample.r, sample.g, sample.b);

    if sample.brightness() > 200.0 && sample.spread() < 30 {
        return Some(FaceletColor::White);
    }
    if r > 150 && g > 150 && b < 100 && r.abs_diff(g) < 50 {
        return Some(FaceletColor::Yellow);
    }
    if r > 150 && g < 100 && b < 100 {
        return Some(FaceletColor::Red);
    }
    if r > 150 && g > 80 && g < 150 && b < 80 {
        return Some(FaceletColor::Orange);
    }
    if g > 100 && r < 100 && b < 100 {
        return Some(FaceletColor::Green);
    }
    if b > 100 && r < 100 && g < 100 {
        return Some(FaceletColor::Blue);
    }

    None
}
