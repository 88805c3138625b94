//! Canonical sticker colors and RGB samples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color for a slot that has not been captured yet.
pub const UNSET_HEX: u32 = 0x333333;

/// Display color for cubie faces that point into the cube.
pub const INTERIOR_HEX: u32 = 0x111111;

/// One of the six sticker colors of a standard cube.
///
/// An unset slot is modelled as `Option<FaceletColor>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceletColor {
    White,
    Yellow,
    Red,
    Orange,
    Blue,
    Green,
}

impl FaceletColor {
    /// All colors, in classifier rule order.
    pub const ALL: [FaceletColor; 6] = [
        FaceletColor::White,
        FaceletColor::Yellow,
        FaceletColor::Red,
        FaceletColor::Orange,
        FaceletColor::Blue,
        FaceletColor::Green,
    ];

    /// Lowercase name, as shown to the user and stored in the handoff record.
    pub fn name(self) -> &'static str {
        match self {
            FaceletColor::White => "white",
            FaceletColor::Yellow => "yellow",
            FaceletColor::Red => "red",
            FaceletColor::Orange => "orange",
            FaceletColor::Blue => "blue",
            FaceletColor::Green => "green",
        }
    }

    /// Hex value used when painting stickers in a scene.
    pub fn display_hex(self) -> u32 {
        match self {
            FaceletColor::White => 0xFFFFFF,
            FaceletColor::Yellow => 0xFFD500,
            FaceletColor::Red => 0xFF0000,
            FaceletColor::Orange => 0xFF8C00,
            FaceletColor::Blue => 0x0000FF,
            FaceletColor::Green => 0x00FF00,
        }
    }

    /// A sample that the classifier maps back to this color.
    ///
    /// Used by the mock camera to paint synthetic sticker grids.
    pub fn reference_rgb(self) -> Rgb {
        match self {
            FaceletColor::White => Rgb::new(240, 240, 240),
            FaceletColor::Yellow => Rgb::new(230, 210, 20),
            FaceletColor::Red => Rgb::new(200, 30, 30),
            FaceletColor::Orange => Rgb::new(240, 120, 20),
            FaceletColor::Blue => Rgb::new(20, 40, 200),
            FaceletColor::Green => Rgb::new(20, 180, 60),
        }
    }
}

impl fmt::Display for FaceletColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display hex for an optional slot.
pub fn slot_hex(slot: Option<FaceletColor>) -> u32 {
    slot.map(FaceletColor::display_hex).unwrap_or(UNSET_HEX)
}

/// An 8-bit-per-channel color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels.
    pub fn brightness(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    /// Difference between the largest and smallest channel.
    pub fn spread(&self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_and_spread() {
        let sample = Rgb::new(210, 200, 190);
        assert!((sample.brightness() - 200.0).abs() < f64::EPSILON);
        assert_eq!(sample.spread(), 20);
    }

    #[test]
    fn test_slot_hex_unset() {
        assert_eq!(slot_hex(None), UNSET_HEX);
        assert_eq!(slot_hex(Some(FaceletColor::Orange)), 0xFF8C00);
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&FaceletColor::Orange).unwrap();
        assert_eq!(json, "\"orange\"");
    }
}
