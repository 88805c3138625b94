//! Frame type representing a captured RGB image with metadata.

use crate::color::Rgb;
use std::time::Instant;

/// Bytes per pixel (packed RGB).
pub const CHANNELS: usize = 3;

/// A single captured frame from the camera.
#[derive(Clone)]
pub struct Frame {
    /// Packed RGB pixel data, row-major.
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Capture timestamp.
    timestamp: Instant,
    /// Monotonic sequence number.
    sequence: u64,
}

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            pixels,
            width,
            height,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Creates a frame filled with one color.
    pub fn filled(width: u32, height: u32, fill: Rgb, sequence: u64) -> Self {
        let pixels = [fill.r, fill.g, fill.b].repeat((width as usize) * (height as usize));
        Self::new(pixels, width, height, sequence)
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count() * CHANNELS
    }

    /// Reads the pixel at `(x, y)`, or `None` outside the frame.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        let px = self.pixels.get(offset..offset + CHANNELS)?;
        Some(Rgb::new(px[0], px[1], px[2]))
    }

    /// Writes one pixel; out-of-frame writes are ignored.
    pub fn put_rgb(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        if let Some(px) = self.pixels.get_mut(offset..offset + CHANNELS) {
            px.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::filled(64, 48, Rgb::new(1, 2, 3), 1);

        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());
        assert_eq!(frame.rgb_at(63, 47), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_frame_invalid_size() {
        let frame = Frame::new(vec![0u8; 100], 640, 480, 1);
        assert!(!frame.is_valid());
        assert_eq!(frame.rgb_at(600, 400), None);
    }

    #[test]
    fn test_put_and_read_pixel() {
        let mut frame = Frame::filled(4, 4, Rgb::default(), 0);
        frame.put_rgb(2, 1, Rgb::new(9, 8, 7));
        frame.put_rgb(10, 10, Rgb::new(1, 1, 1));

        assert_eq!(frame.rgb_at(2, 1), Some(Rgb::new(9, 8, 7)));
        assert_eq!(frame.rgb_at(4, 0), None);
    }
}
