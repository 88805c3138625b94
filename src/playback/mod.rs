//! Solution playback.
//!
//! The [`Player`] owns an immutable move list and a cursor over it. Steps
//! forward and backward start turn animations; auto-play steps forward on
//! every tick once the previous turn and the inter-move delay are over.
//! Requests that arrive while a turn is in flight are dropped.

mod player;
mod speed;

pub use player::{PlayStatus, Player, PlaybackError, PlayerState, StepOutcome};
pub use speed::SpeedControl;
