//! Capture, scan and playback configuration.
//!
//! Everything is loadable from a single TOML file; every section falls
//! back to its defaults when omitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for camera capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Camera device index or identifier.
    pub device_id: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 1280,
            height: 720,
            fps: 30,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Placement of the 3x3 scan grid inside the frame.
///
/// All values are fractions of the frame size, so the grid follows
/// the camera resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Horizontal center of the grid (0.0 left, 1.0 right).
    pub center_x: f32,
    /// Vertical center of the grid (0.0 top, 1.0 bottom).
    pub center_y: f32,
    /// Side length of the square grid as a fraction of the frame height.
    pub size: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            size: 0.6,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let inside = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !inside(self.center_x) || !inside(self.center_y) || !inside(self.size) || self.size == 0.0 {
            return Err(ConfigError::InvalidScanRegion);
        }
        Ok(())
    }
}

/// Timing of solution playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Duration of one turn at speed 1.0, in milliseconds.
    pub turn_duration_ms: u64,
    /// Pause between turns during auto-play at speed 1.0, in milliseconds.
    pub move_delay_ms: u64,
    /// Speed multiplier at startup.
    pub default_speed: f32,
    /// Speed steps offered by the speed control.
    pub speed_steps: Vec<f32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            turn_duration_ms: 500,
            move_delay_ms: 1000,
            default_speed: 1.0,
            speed_steps: vec![0.5, 1.0, 1.5, 2.0, 3.0],
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if self.turn_duration_ms == 0 {
            return Err(ConfigError::InvalidTurnDuration);
        }
        if !positive(self.default_speed) || !self.speed_steps.iter().copied().all(positive) {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    #[error("scan grid must lie within the frame")]
    InvalidScanRegion,
    #[error("turn duration must be non-zero")]
    InvalidTurnDuration,
    #[error("speed multipliers must be positive")]
    InvalidSpeed,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the confirmed scan is written for the playback step.
    pub handoff_path: PathBuf,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            handoff_path: PathBuf::from("cube-state.json"),
            metrics_port: 9090,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capture.validate()?;
        self.scan.validate()?;
        self.playback.validate()
    }
}
