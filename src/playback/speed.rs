//! Discrete speed control.

/// Steps through a fixed ladder of speed multipliers.
#[derive(Debug, Clone)]
pub struct SpeedControl {
    steps: Vec<f32>,
    index: usize,
}

impl SpeedControl {
    /// Builds the ladder, starting at the step closest to `initial`.
    ///
    /// Non-positive steps are discarded; an empty ladder falls back to 1.0.
    pub fn new(steps: &[f32], initial: f32) -> Self {
        let mut steps: Vec<f32> = steps
            .iter()
            .copied()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        if steps.is_empty() {
            steps.push(1.0);
        }
        steps.sort_by(f32::total_cmp);
        steps.dedup();

        let index = steps
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - initial).abs().total_cmp(&(*b - initial).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0);
        Self { steps, index }
    }

    pub fn current(&self) -> f32 {
        self.steps[self.index]
    }

    pub fn faster(&mut self) -> f32 {
        self.index = (self.index + 1).min(self.steps.len() - 1);
        self.current()
    }

    pub fn slower(&mut self) -> f32 {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Label shown next to the control, e.g. `1.5x`.
    pub fn label(&self) -> String {
        format!("{}x", self.current())
    }
}
