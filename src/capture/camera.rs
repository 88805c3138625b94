//! Camera abstraction for frame capture.
//!
//! Real camera access lives outside this crate; it plugs in through the
//! [`Camera`] trait. [`MockCamera`] renders synthetic frames of a cube
//! face held inside the scan grid.

use super::{CaptureConfig, Frame, GridSampler, ScanConfig};
use crate::color::{FaceletColor, Rgb};
use thiserror::Error;

/// Background behind the held cube face in synthetic frames.
const BACKDROP: Rgb = Rgb::new(24, 24, 32);

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera device not found: {0}")]
    DeviceNotFound(String),
    #[error("camera access denied by the user")]
    PermissionDenied,
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for camera implementations.
pub trait Camera {
    /// Opens and initializes the camera with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Captures a single frame.
    fn capture(&mut self) -> Result<Frame, CameraError>;

    /// Checks if the camera is currently open.
    fn is_open(&self) -> bool;

    /// Closes the camera and releases resources.
    fn close(&mut self);
}

/// Mock camera that renders whatever face is "held" in front of it.
#[derive(Debug, Default)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    sampler: GridSampler,
    held: [Option<FaceletColor>; 9],
    deny_access: bool,
    sequence: u64,
}

impl MockCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the held face into the given scan region.
    pub fn with_region(region: ScanConfig) -> Self {
        Self {
            sampler: GridSampler::new(region),
            ..Self::default()
        }
    }

    /// A camera whose permission prompt is always refused.
    pub fn denied() -> Self {
        Self {
            deny_access: true,
            ..Self::default()
        }
    }

    /// Places a face in front of the camera. `None` cells show backdrop.
    pub fn hold(&mut self, stickers: [Option<FaceletColor>; 9]) {
        self.held = stickers;
    }

    /// Places a fully colored face in front of the camera.
    pub fn hold_face(&mut self, stickers: [FaceletColor; 9]) {
        self.hold(stickers.map(Some));
    }
}

impl Camera for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        if self.deny_access {
            tracing::warn!("MockCamera refused access");
            return Err(CameraError::PermissionDenied);
        }
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        tracing::info!("MockCamera opened with config: {:?}", config);
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;

        self.sequence += 1;
        let mut frame = Frame::filled(config.width, config.height, BACKDROP, self.sequence);

        let cells = self.sampler.cells(config.width, config.height);
        for (cell, sticker) in cells.iter().zip(self.held) {
            let Some(color) = sticker else { continue };
            let fill = color.reference_rgb();
            let x0 = cell.left.max(0.0) as u32;
            let y0 = cell.top.max(0.0) as u32;
            let x1 = (cell.left + cell.side).max(0.0) as u32;
            let y1 = (cell.top + cell.side).max(0.0) as u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    frame.put_rgb(x, y, fill);
                }
            }
        }

        Ok(frame)
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::classify;

    fn small_config() -> CaptureConfig {
        CaptureConfig::with_dimensions(90, 60)
    }

    #[test]
    fn test_mock_camera_lifecycle() {
        let mut camera = MockCamera::new();

        assert!(!camera.is_open());

        camera.open(&small_config()).unwrap();
        assert!(camera.is_open());

        let frame = camera.capture().unwrap();
        assert!(frame.is_valid());
        assert_eq!(frame.sequence(), 1);

        let frame2 = camera.capture().unwrap();
        assert_eq!(frame2.sequence(), 2);

        camera.close();
        assert!(!camera.is_open());
    }

    #[test]
    fn test_capture_without_open() {
        let mut camera = MockCamera::new();
        assert!(matches!(
            camera.capture(),
            Err(CameraError::NotInitialized)
        ));
    }

    #[test]
    fn test_denied_camera_fails_to_open() {
        let mut camera = MockCamera::denied();
        assert!(matches!(
            camera.open(&small_config()),
            Err(CameraError::PermissionDenied)
        ));
        assert!(!camera.is_open());
    }

    #[test]
    fn test_held_face_is_visible_at_cell_centers() {
        let mut camera = MockCamera::new();
        camera.open(&small_config()).unwrap();
        let mut held = [None; 9];
        held[4] = Some(FaceletColor::Green);
        held[8] = Some(FaceletColor::Orange);
        camera.hold(held);

        let frame = camera.capture().unwrap();
        let samples = GridSampler::default().sample(&frame);

        assert_eq!(samples[4].and_then(classify), Some(FaceletColor::Green));
        assert_eq!(samples[8].and_then(classify), Some(FaceletColor::Orange));
        assert_eq!(samples[0].and_then(classify), None);
    }
}
