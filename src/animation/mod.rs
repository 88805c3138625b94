//! Turn animation.
//!
//! A [`TurnAnimator`] gathers the cubies of one outer layer under a
//! temporary pivot, interpolates the pivot with an ease-out cubic curve,
//! and on completion bakes the turn into the [`Assembly`]. Rendering goes
//! through the [`SceneSink`] trait.

mod assembly;
mod easing;
mod plan;
mod scene;
mod turn;

pub use assembly::{Assembly, Cubie};
pub use easing::ease_out_cubic;
pub use plan::{Axis, LayerSelector, TurnPlan, LAYER_THRESHOLD};
pub use scene::{LogScene, SceneSink};
pub use turn::{scale_duration, AnimationStatus, TurnAnimation, TurnAnimator};
