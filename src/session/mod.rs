//! Capture session controller.
//!
//! Walks the user through scanning the faces in U, R, F, D, L, B order.
//! Each capture is checked for a full grid and the right center color
//! before it is stored; once all six faces are in, confirming produces
//! the [`Handoff`] record consumed by the playback step.
//!
//! ```text
//! Scanning(U) → Scanning(R) → … → Scanning(B) → AllCaptured → Confirmed
//! ```

mod controller;
mod guidance;
mod handoff;

pub use controller::{
    CaptureMode, CaptureOutcome, CaptureSession, Scanner, SessionError, SessionPhase, SessionStats,
};
pub use guidance::Guidance;
pub use handoff::{Handoff, HandoffError};
