//! Prometheus metrics for the scan and playback pipeline.
//!
//! # Metrics Exposed
//!
//! ## Capture
//! - `cube_scan_frames_observed_total` - Frames classified while scanning
//! - `cube_scan_classification_misses_total` - Cell samples with no color match
//! - `cube_scan_faces_captured_total` - Faces committed to the store
//! - `cube_scan_capture_rejections_total` - Rejected capture requests
//!
//! ## Playback
//! - `cube_scan_moves_played_total` - Completed turn animations
//! - `cube_scan_playback_cursor` - Current cursor
//! - `cube_scan_playback_moves` - Solution length
//! - `cube_scan_playback_speed` - Speed multiplier
//! - `cube_scan_playback_animating` - 1 while a turn is in flight
//!
//! # Example
//!
//! ```no_run
//! use cube_scan::metrics::{MetricsRegistry, MetricsSnapshot};
//! use cube_scan::session::CaptureSession;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let session = CaptureSession::default();
//!
//! registry.update(&MetricsSnapshot::from_components(Some(&session), None));
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsHandle, MetricsServer, MetricsServerConfig, ServerError};
