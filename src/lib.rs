//! Cube Scan Library
//!
//! Captures the sticker colors of a physical 3x3 cube one face at a time,
//! validates them into a solver-ready facelet string, and plays a solution
//! back as animated layer turns on a 27-cubie model.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! capture → color → session → facelets ──→ solver
//!                                 │            │
//!                                 ↓            ↓
//!                             animation ← playback
//! ```
//!
//! # Design Principles
//!
//! - **Validate at capture**: a face is stored only with all nine cells set
//!   and the expected center color
//! - **One turn at a time**: playback requests during an animation are dropped
//! - **Exact lattice**: every finished turn snaps cubies back onto the grid
//! - **External seams**: camera, renderer and solver are traits
//!
//! # Example
//!
//! ```no_run
//! use cube_scan::{
//!     animation::{Assembly, LogScene},
//!     capture::{CaptureConfig, MockCamera, PlaybackConfig, ScanConfig},
//!     facelets::FACE_ORDER,
//!     playback::Player,
//!     session::Scanner,
//!     solver::{Scramble, ScrambleSolver, Solver},
//! };
//! use std::time::Duration;
//!
//! let scramble = Scramble::seeded(7, 20);
//! let state = scramble.facelets().to_state();
//!
//! let mut scanner = Scanner::start(
//!     MockCamera::new(),
//!     &CaptureConfig::default(),
//!     ScanConfig::default(),
//! )
//! .unwrap();
//! for face in FACE_ORDER {
//!     scanner.camera_mut().hold(*state.face(face));
//!     scanner.poll().unwrap();
//!     scanner.session_mut().capture();
//! }
//! let handoff = scanner.finish().confirm().unwrap();
//!
//! let facelets = handoff.validate().unwrap();
//! let solution = ScrambleSolver::new(scramble).solve(&facelets).unwrap();
//!
//! let assembly = Assembly::from_state(&handoff.state);
//! let mut player = Player::new(solution, assembly, &PlaybackConfig::default());
//! player.play();
//! let mut scene = LogScene::new();
//! while !player.is_finished() {
//!     player.tick(Duration::from_millis(16), &mut scene);
//! }
//! ```

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod animation;
pub mod capture;
pub mod color;
pub mod facelets;
pub mod metrics;
pub mod playback;
pub mod session;
pub mod solver;

// Re-export commonly used types at crate root
pub use animation::{Assembly, SceneSink, TurnAnimator};
pub use capture::{Camera, CaptureConfig, FileConfig, Frame, MockCamera};
pub use color::{classify, FaceletColor, Rgb};
pub use facelets::{Face, FaceletState, FaceletString};
pub use playback::Player;
pub use session::{CaptureSession, Guidance, Handoff, Scanner};
pub use solver::{CubeModel, Move, MoveSequence, Solver};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
