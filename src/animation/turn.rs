//! Timed interpolation of one face turn.

use super::assembly::{Assembly, Cubie};
use super::easing::ease_out_cubic;
use super::plan::TurnPlan;
use super::scene::SceneSink;
use crate::solver::Move;
use glam::{Quat, Vec3};
use std::time::Duration;

/// Where an animation stands after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStatus {
    Running { progress: f32 },
    Complete,
}

/// Scales `base` by `1 / speed`.
///
/// `None` when `speed` is not a positive finite number or the scaled
/// duration cannot be represented.
pub fn scale_duration(base: Duration, speed: f32) -> Option<Duration> {
    if !speed.is_finite() || speed <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f32(base.as_secs_f32() / speed).ok()
}

/// Starts turn animations with a shared base duration.
#[derive(Debug, Clone)]
pub struct TurnAnimator {
    base_duration: Duration,
}

impl TurnAnimator {
    pub fn new(base_duration: Duration) -> Self {
        Self { base_duration }
    }

    /// Duration of one turn at speed 1.0.
    pub fn base_duration(&self) -> Duration {
        self.base_duration
    }

    /// Duration of one turn at `speed`, if representable.
    pub fn duration_at(&self, speed: f32) -> Option<Duration> {
        scale_duration(self.base_duration, speed)
    }

    /// Gathers the moving layer under a fresh pivot.
    pub fn start(&self, mv: Move, assembly: &Assembly, duration: Duration) -> TurnAnimation {
        let plan = TurnPlan::for_move(mv);
        let members = assembly.select(|p| plan.layer.contains(p));
        tracing::debug!(
            mv = %mv,
            axis = %plan.axis,
            degrees = plan.degrees,
            cubies = members.len(),
            ?duration,
            "Turn started"
        );
        TurnAnimation {
            plan,
            members,
            duration,
            elapsed: Duration::ZERO,
        }
    }
}

impl Default for TurnAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

/// One turn in flight.
///
/// Member cubies keep their committed transforms until [`finish`]; while
/// running they are drawn through the pivot rotation.
///
/// [`finish`]: TurnAnimation::finish
#[derive(Debug, Clone)]
pub struct TurnAnimation {
    plan: TurnPlan,
    members: Vec<usize>,
    duration: Duration,
    elapsed: Duration,
}

impl TurnAnimation {
    pub fn plan(&self) -> &TurnPlan {
        &self.plan
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current rotation of the pivot.
    pub fn pivot(&self) -> Quat {
        Quat::from_axis_angle(self.plan.axis.unit(), self.plan.radians() * ease_out_cubic(self.progress()))
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, dt: Duration) -> AnimationStatus {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.is_complete() {
            AnimationStatus::Complete
        } else {
            AnimationStatus::Running {
                progress: self.progress(),
            }
        }
    }

    /// Transform of a member cubie as currently drawn.
    pub fn world_transform(&self, cubie: &Cubie) -> (Vec3, Quat) {
        let pivot = self.pivot();
        (pivot * cubie.position(), pivot * cubie.rotation())
    }

    /// Pushes the in-flight transforms of the moving layer.
    pub fn render(&self, assembly: &Assembly, sink: &mut dyn SceneSink) {
        for cubie in self.members.iter().filter_map(|&id| assembly.cubie(id)) {
            let (position, rotation) = self.world_transform(cubie);
            sink.update_cubie(cubie.id(), position, rotation);
        }
    }

    /// Commits the full turn into the assembly and releases the pivot.
    pub fn finish(self, assembly: &mut Assembly, sink: &mut dyn SceneSink) {
        let full = Quat::from_axis_angle(self.plan.axis.unit(), self.plan.radians());
        assembly.bake(&self.members, full);
        for cubie in self.members.iter().filter_map(|&id| assembly.cubie(id)) {
            sink.update_cubie(cubie.id(), cubie.position(), cubie.rotation());
        }
        tracing::debug!(mv = %self.plan.mv, "Turn finished");
    }
}
