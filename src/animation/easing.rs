/// Ease-out cubic: fast start, gentle stop.
///
/// `progress` is clamped to [0, 1].
pub fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}
