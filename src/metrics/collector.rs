//! Metrics collection and registry.

use crate::playback::Player;
use crate::session::CaptureSession;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of pipeline state for metrics update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Frames fed to the classifier.
    pub frames_observed: u64,
    /// Cell samples that matched no color.
    pub classification_misses: u64,
    /// Faces committed to the facelet store.
    pub faces_captured: u64,
    /// Capture requests turned away.
    pub capture_rejections: u64,
    /// Turn animations run to completion.
    pub moves_played: u64,
    /// Playback cursor position.
    pub cursor: usize,
    /// Length of the loaded solution.
    pub total_moves: usize,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Whether a turn is in flight.
    pub animating: bool,
}

/// Prometheus metrics registry for the scan and playback pipeline.
pub struct MetricsRegistry {
    registry: Registry,

    // Capture metrics
    frames_observed: IntCounter,
    classification_misses: IntCounter,
    faces_captured: IntCounter,
    capture_rejections: IntCounter,

    // Playback metrics
    moves_played: IntCounter,
    cursor: IntGauge,
    total_moves: IntGauge,
    speed: Gauge,
    animating: IntGauge,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let frames_observed = IntCounter::new(
            "cube_scan_frames_observed_total",
            "Camera frames classified during scanning",
        )?;
        let classification_misses = IntCounter::new(
            "cube_scan_classification_misses_total",
            "Cell samples that matched no sticker color",
        )?;
        let faces_captured = IntCounter::new(
            "cube_scan_faces_captured_total",
            "Faces committed to the facelet store",
        )?;
        let capture_rejections = IntCounter::new(
            "cube_scan_capture_rejections_total",
            "Capture requests rejected for an incomplete grid or wrong center",
        )?;

        let moves_played = IntCounter::new(
            "cube_scan_moves_played_total",
            "Turn animations run to completion",
        )?;
        let cursor = IntGauge::new("cube_scan_playback_cursor", "Current playback cursor")?;
        let total_moves = IntGauge::new(
            "cube_scan_playback_moves",
            "Number of moves in the loaded solution",
        )?;
        let speed = Gauge::new("cube_scan_playback_speed", "Playback speed multiplier")?;
        let animating = IntGauge::new(
            "cube_scan_playback_animating",
            "Whether a turn is in flight (1=yes, 0=no)",
        )?;

        registry.register(Box::new(frames_observed.clone()))?;
        registry.register(Box::new(classification_misses.clone()))?;
        registry.register(Box::new(faces_captured.clone()))?;
        registry.register(Box::new(capture_rejections.clone()))?;
        registry.register(Box::new(moves_played.clone()))?;
        registry.register(Box::new(cursor.clone()))?;
        registry.register(Box::new(total_moves.clone()))?;
        registry.register(Box::new(speed.clone()))?;
        registry.register(Box::new(animating.clone()))?;

        Ok(Self {
            registry,
            frames_observed,
            classification_misses,
            faces_captured,
            capture_rejections,
            moves_played,
            cursor,
            total_moves,
            speed,
            animating,
        })
    }

    /// Updates all metrics from a snapshot of pipeline state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward by the difference
        advance(&self.frames_observed, snapshot.frames_observed);
        advance(&self.classification_misses, snapshot.classification_misses);
        advance(&self.faces_captured, snapshot.faces_captured);
        advance(&self.capture_rejections, snapshot.capture_rejections);
        advance(&self.moves_played, snapshot.moves_played);

        self.cursor.set(snapshot.cursor as i64);
        self.total_moves.set(snapshot.total_moves as i64);
        self.speed.set(snapshot.speed);
        self.animating.set(i64::from(snapshot.animating));
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, total: u64) {
    let current = counter.get();
    if total > current {
        counter.inc_by(total - current);
    }
}

impl MetricsSnapshot {
    /// Creates a snapshot from whichever pipeline stages are running.
    pub fn from_components(session: Option<&CaptureSession>, player: Option<&Player>) -> Self {
        let mut snapshot = Self::default();
        if let Some(session) = session {
            let stats = session.stats();
            snapshot.frames_observed = stats.frames_observed;
            snapshot.classification_misses = stats.classification_misses;
            snapshot.faces_captured = stats.faces_captured;
            snapshot.capture_rejections = stats.capture_rejections;
        }
        if let Some(player) = player {
            let (cursor, total) = player.progress();
            snapshot.moves_played = player.turns_completed();
            snapshot.cursor = cursor;
            snapshot.total_moves = total;
            snapshot.speed = f64::from(player.speed());
            snapshot.animating = player.is_animating();
        }
        snapshot
    }
}
