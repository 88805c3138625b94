//! Camera input and frame handling.
//!
//! This module provides the camera abstraction, RGB frames, capture and
//! scan configuration, and the sampler that locates the nine scan-grid
//! cells inside a frame.

mod camera;
mod config;
mod frame;
mod sampler;

pub use camera::{Camera, CameraError, MockCamera};
pub use config::{CaptureConfig, ConfigError, FileConfig, OutputConfig, PlaybackConfig, ScanConfig};
pub use frame::Frame;
pub use sampler::{CellRect, GridSampler};
