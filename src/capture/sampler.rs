//! Maps the on-screen 3x3 scan grid to pixel sample points.

use super::{Frame, ScanConfig};
use crate::color::Rgb;

/// Pixel-space rectangle of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub left: f32,
    pub top: f32,
    pub side: f32,
}

impl CellRect {
    /// Center point of the cell.
    pub fn center(&self) -> (f32, f32) {
        (self.left + self.side / 2.0, self.top + self.side / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.side && y >= self.top && y < self.top + self.side
    }
}

/// Locates the nine scan cells in a frame of a given size.
#[derive(Debug, Clone, Default)]
pub struct GridSampler {
    region: ScanConfig,
}

impl GridSampler {
    pub fn new(region: ScanConfig) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &ScanConfig {
        &self.region
    }

    /// Rectangles of the nine cells, row-major, for a `width` x `height` frame.
    pub fn cells(&self, width: u32, height: u32) -> [CellRect; 9] {
        let grid_side = self.region.size * height as f32;
        let side = grid_side / 3.0;
        let left = self.region.center_x * width as f32 - grid_side / 2.0;
        let top = self.region.center_y * height as f32 - grid_side / 2.0;

        std::array::from_fn(|i| CellRect {
            left: left + (i % 3) as f32 * side,
            top: top + (i / 3) as f32 * side,
            side,
        })
    }

    /// Samples the center pixel of every cell.
    ///
    /// Cells whose center falls outside the frame yield `None`.
    pub fn sample(&self, frame: &Frame) -> [Option<Rgb>; 9] {
        let cells = self.cells(frame.width(), frame.height());
        cells.map(|cell| {
            let (x, y) = cell.center();
            if x < 0.0 || y < 0.0 {
                return None;
            }
            frame.rgb_at(x as u32, y as u32)
        })
    }
}
