//! Per-face scan workflow.

use super::guidance::Guidance;
use super::handoff::Handoff;
use crate::capture::{Camera, CameraError, CaptureConfig, Frame, GridSampler, ScanConfig};
use crate::color::{classify, slot_hex, FaceletColor};
use crate::facelets::{Face, FaceSlots, FaceletState, CENTER, FACE_ORDER};
use thiserror::Error;

/// Errors that end or misuse a scan session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("camera unavailable: {0}")]
    Camera(#[from] CameraError),
    #[error("painting requires manual mode")]
    NotManualMode,
    #[error("no paint color selected")]
    NoColorSelected,
    #[error("cell index {0} out of range (0-8)")]
    CellOutOfRange(usize),
}

/// Where the workflow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Scanning(Face),
    AllCaptured,
    Confirmed,
}

/// How the nine view cells get their colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Every observed frame re-classifies the cells.
    #[default]
    Auto,
    /// Cells are painted by hand.
    Manual,
}

/// Result of pressing capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Face stored; scanning continues with `next`.
    Advanced { captured: Face, next: Face },
    /// Last face stored; ready to confirm.
    AllCaptured { captured: Face },
    /// Nothing stored; the guidance says why.
    Rejected(Guidance),
}

/// Running counters for the scan workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_observed: u64,
    pub classification_misses: u64,
    pub faces_captured: u64,
    pub capture_rejections: u64,
}

/// Drives the six-face scan and owns the facelet grid.
#[derive(Debug)]
pub struct CaptureSession {
    phase: SessionPhase,
    mode: CaptureMode,
    view: FaceSlots,
    selected: Option<FaceletColor>,
    state: FaceletState,
    sampler: GridSampler,
    guidance: Guidance,
    stats: SessionStats,
}

impl CaptureSession {
    pub fn new(scan: ScanConfig) -> Self {
        let first = FACE_ORDER[0];
        Self {
            phase: SessionPhase::Scanning(first),
            mode: CaptureMode::Auto,
            view: [None; 9],
            selected: None,
            state: FaceletState::new(),
            sampler: GridSampler::new(scan),
            guidance: Guidance::PositionFace { face: first },
            stats: SessionStats::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// The nine cells currently shown in the scan grid.
    pub fn view(&self) -> &FaceSlots {
        &self.view
    }

    pub fn state(&self) -> &FaceletState {
        &self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Latest instruction for the user.
    pub fn instruction(&self) -> &Guidance {
        &self.guidance
    }

    /// Face being scanned, if scanning.
    pub fn current_face(&self) -> Option<Face> {
        match self.phase {
            SessionPhase::Scanning(face) => Some(face),
            _ => None,
        }
    }

    pub fn set_mode(&mut self, mode: CaptureMode) {
        if self.mode != mode {
            tracing::debug!(?mode, "Capture mode changed");
        }
        self.mode = mode;
        if mode == CaptureMode::Manual {
            self.guidance = Guidance::ManualMode;
        }
    }

    /// Switches between auto and manual. Cells are kept.
    pub fn toggle_mode(&mut self) -> CaptureMode {
        let next = match self.mode {
            CaptureMode::Auto => CaptureMode::Manual,
            CaptureMode::Manual => CaptureMode::Auto,
        };
        self.set_mode(next);
        next
    }

    /// Re-classifies the view cells from a live frame (auto mode only).
    ///
    /// Cells whose sample matches no color keep their previous value.
    /// Returns center feedback when the center cell was classified.
    pub fn observe(&mut self, frame: &Frame) -> Option<Guidance> {
        if self.mode != CaptureMode::Auto {
            return None;
        }
        let face = self.current_face()?;
        self.stats.frames_observed += 1;

        let mut center = None;
        for (index, sample) in self.sampler.sample(frame).into_iter().enumerate() {
            match sample.and_then(classify) {
                Some(color) => {
                    self.view[index] = Some(color);
                    if index == CENTER {
                        center = Some(color);
                    }
                }
                None => {
                    self.stats.classification_misses += 1;
                    tracing::trace!(index, ?sample, "No color match");
                }
            }
        }

        let feedback = center_feedback(face, center?);
        self.guidance = feedback.clone();
        Some(feedback)
    }

    /// Chooses the color used by [`paint`](Self::paint).
    pub fn select_color(&mut self, color: FaceletColor) {
        self.selected = Some(color);
    }

    pub fn selected_color(&self) -> Option<FaceletColor> {
        self.selected
    }

    /// Paints the selected color onto one cell (manual mode only).
    pub fn paint(&mut self, index: usize) -> Result<Option<Guidance>, SessionError> {
        if self.mode != CaptureMode::Manual {
            return Err(SessionError::NotManualMode);
        }
        let color = self.selected.ok_or(SessionError::NoColorSelected)?;
        let cell = self
            .view
            .get_mut(index)
            .ok_or(SessionError::CellOutOfRange(index))?;
        *cell = Some(color);

        match (index, self.current_face()) {
            (CENTER, Some(face)) => {
                let feedback = center_feedback(face, color);
                self.guidance = feedback.clone();
                Ok(Some(feedback))
            }
            _ => Ok(None),
        }
    }

    /// Stores the current view as the current face.
    pub fn capture(&mut self) -> CaptureOutcome {
        let SessionPhase::Scanning(face) = self.phase else {
            return CaptureOutcome::Rejected(Guidance::AllFacesCaptured);
        };

        let filled: Vec<FaceletColor> = self.view.iter().flatten().copied().collect();
        let Ok(colors) = <[FaceletColor; 9]>::try_from(filled) else {
            let missing = self.view.iter().filter(|c| c.is_none()).count();
            return self.reject(Guidance::IncompleteView { missing });
        };

        let feedback = center_feedback(face, colors[CENTER]);
        if let Guidance::CenterMismatch { .. } = feedback {
            return self.reject(feedback);
        }
        self.state.store_face(face, colors);

        self.stats.faces_captured += 1;
        self.view = [None; 9];
        tracing::info!(%face, "Face captured");

        match face.next() {
            Some(next) => {
                self.phase = SessionPhase::Scanning(next);
                self.guidance = Guidance::PositionFace { face: next };
                CaptureOutcome::Advanced {
                    captured: face,
                    next,
                }
            }
            None => {
                self.phase = SessionPhase::AllCaptured;
                self.guidance = Guidance::AllFacesCaptured;
                tracing::info!("All faces captured");
                CaptureOutcome::AllCaptured { captured: face }
            }
        }
    }

    /// Finalizes the scan and produces the handoff record.
    pub fn confirm(&mut self) -> Result<Handoff, Guidance> {
        if self.phase == SessionPhase::Confirmed {
            return self.handoff().ok_or(Guidance::FinishAllFaces);
        }
        if self.phase != SessionPhase::AllCaptured {
            self.guidance = Guidance::FinishAllFaces;
            return Err(Guidance::FinishAllFaces);
        }
        match self.handoff() {
            Some(handoff) => {
                self.phase = SessionPhase::Confirmed;
                self.guidance = Guidance::Confirmed;
                tracing::info!(cube = %handoff.cube_string, "Scan confirmed");
                Ok(handoff)
            }
            None => {
                self.guidance = Guidance::FinishAllFaces;
                Err(Guidance::FinishAllFaces)
            }
        }
    }

    /// Center color of every face, in scan order, for the preview cube.
    pub fn preview(&self) -> [Option<FaceletColor>; 6] {
        FACE_ORDER.map(|face| self.state.get(face, CENTER))
    }

    /// Preview colors as display hex values.
    pub fn preview_hex(&self) -> [u32; 6] {
        self.preview().map(slot_hex)
    }

    fn handoff(&self) -> Option<Handoff> {
        let facelets = self.state.to_facelet_string().ok()?;
        Some(Handoff::new(self.state.clone(), &facelets))
    }

    fn reject(&mut self, guidance: Guidance) -> CaptureOutcome {
        self.stats.capture_rejections += 1;
        tracing::debug!(%guidance, "Capture rejected");
        self.guidance = guidance.clone();
        CaptureOutcome::Rejected(guidance)
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

fn center_feedback(face: Face, color: FaceletColor) -> Guidance {
    let expected = face.canonical_color();
    if color == expected {
        Guidance::CenterDetected { color }
    } else {
        Guidance::CenterMismatch {
            face,
            expected,
            found: color,
        }
    }
}

/// A capture session fed by a camera.
pub struct Scanner<C: Camera> {
    camera: C,
    session: CaptureSession,
}

impl<C: Camera> Scanner<C> {
    /// Opens the camera. Failure here ends the scan flow.
    pub fn start(
        mut camera: C,
        capture: &CaptureConfig,
        scan: ScanConfig,
    ) -> Result<Self, SessionError> {
        camera.open(capture).map_err(|e| {
            tracing::error!(error = %e, "Camera acquisition failed");
            e
        })?;
        Ok(Self {
            camera,
            session: CaptureSession::new(scan),
        })
    }

    /// Grabs one frame and feeds it to the session.
    pub fn poll(&mut self) -> Result<Option<Guidance>, SessionError> {
        let frame = self.camera.capture()?;
        Ok(self.session.observe(&frame))
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession {
        &mut self.session
    }

    /// Closes the camera and returns the session.
    pub fn finish(mut self) -> CaptureSession {
        self.camera.close();
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCamera;

    fn solid(face: Face) -> [FaceletColor; 9] {
        [face.canonical_color(); 9]
    }

    fn scanner() -> Scanner<MockCamera> {
        Scanner::start(
            MockCamera::new(),
            &CaptureConfig::with_dimensions(90, 60),
            ScanConfig::default(),
        )
        .unwrap()
    }

    fn show(scanner: &mut Scanner<MockCamera>, stickers: [FaceletColor; 9]) -> Option<Guidance> {
        scanner.camera_mut().hold_face(stickers);
        scanner.poll().unwrap()
    }

    #[test]
    fn test_white_face_captured_as_up() {
        let mut scanner = scanner();
        let feedback = show(&mut scanner, solid(Face::U));
        assert_eq!(
            feedback,
            Some(Guidance::CenterDetected {
                color: FaceletColor::White
            })
        );

        let outcome = scanner.session_mut().capture();
        assert_eq!(
            outcome,
            CaptureOutcome::Advanced {
                captured: Face::U,
                next: Face::R
            }
        );
        assert_eq!(scanner.session().phase(), SessionPhase::Scanning(Face::R));
        assert_eq!(scanner.session().view(), &[None; 9]);
    }

    #[test]
    fn test_wrong_center_blocks_and_keeps_state() {
        let mut scanner = scanner();
        show(&mut scanner, solid(Face::U));
        scanner.session_mut().capture();

        let feedback = show(&mut scanner, solid(Face::F));
        assert!(matches!(feedback, Some(Guidance::CenterMismatch { .. })));

        let before = scanner.session().state().clone();
        let outcome = scanner.session_mut().capture();
        assert_eq!(
            outcome,
            CaptureOutcome::Rejected(Guidance::CenterMismatch {
                face: Face::R,
                expected: FaceletColor::Red,
                found: FaceletColor::Green,
            })
        );
        assert_eq!(scanner.session().state(), &before);
        assert_eq!(scanner.session().phase(), SessionPhase::Scanning(Face::R));
        assert_eq!(scanner.session().stats().capture_rejections, 1);
    }

    #[test]
    fn test_incomplete_view_blocks_capture() {
        let mut session = CaptureSession::default();
        session.set_mode(CaptureMode::Manual);
        session.select_color(FaceletColor::White);
        session.paint(CENTER).unwrap();

        assert_eq!(
            session.capture(),
            CaptureOutcome::Rejected(Guidance::IncompleteView { missing: 8 })
        );
    }

    #[test]
    fn test_hand_painted_center_is_checked_before_storing() {
        let mut session = CaptureSession::default();
        session.set_mode(CaptureMode::Manual);
        session.select_color(FaceletColor::Yellow);
        for cell in 0..9 {
            session.paint(cell).unwrap();
        }

        assert_eq!(
            session.capture(),
            CaptureOutcome::Rejected(Guidance::CenterMismatch {
                face: Face::U,
                expected: FaceletColor::White,
                found: FaceletColor::Yellow,
            })
        );
        assert_eq!(session.state(), &FaceletState::new());
        assert_eq!(session.stats().faces_captured, 0);

        session.select_color(FaceletColor::White);
        session.paint(CENTER).unwrap();
        assert_eq!(
            session.capture(),
            CaptureOutcome::Advanced {
                captured: Face::U,
                next: Face::R
            }
        );
        assert_eq!(session.state().get(Face::U, 0), Some(FaceletColor::Yellow));
        assert!(session.state().center_is_valid(Face::U));
    }

    #[test]
    fn test_classification_miss_keeps_previous_cell() {
        let mut scanner = scanner();
        show(&mut scanner, solid(Face::U));

        let mut held = [None; 9];
        held[CENTER] = Some(FaceletColor::White);
        scanner.camera_mut().hold(held);
        scanner.poll().unwrap();

        assert_eq!(scanner.session().view(), &[Some(FaceletColor::White); 9]);
        assert_eq!(scanner.session().stats().classification_misses, 8);
    }

    #[test]
    fn test_manual_mode_ignores_frames_and_keeps_cells() {
        let mut scanner = scanner();
        show(&mut scanner, solid(Face::U));
        assert_eq!(scanner.session_mut().toggle_mode(), CaptureMode::Manual);

        let feedback = show(&mut scanner, solid(Face::D));
        assert_eq!(feedback, None);
        assert_eq!(scanner.session().view(), &[Some(FaceletColor::White); 9]);

        let session = scanner.session_mut();
        session.select_color(FaceletColor::Blue);
        assert_eq!(session.paint(0).unwrap(), None);
        assert_eq!(session.view()[0], Some(FaceletColor::Blue));
        assert_eq!(session.toggle_mode(), CaptureMode::Auto);
        assert_eq!(session.view()[0], Some(FaceletColor::Blue));
    }

    #[test]
    fn test_paint_errors() {
        let mut session = CaptureSession::default();
        assert!(matches!(session.paint(0), Err(SessionError::NotManualMode)));
        session.set_mode(CaptureMode::Manual);
        assert!(matches!(session.paint(0), Err(SessionError::NoColorSelected)));
        session.select_color(FaceletColor::Red);
        assert!(matches!(session.paint(9), Err(SessionError::CellOutOfRange(9))));
    }

    #[test]
    fn test_painting_center_gives_feedback() {
        let mut session = CaptureSession::default();
        session.set_mode(CaptureMode::Manual);
        session.select_color(FaceletColor::Red);
        let feedback = session.paint(CENTER).unwrap();
        assert!(matches!(feedback, Some(Guidance::CenterMismatch { .. })));
        assert_eq!(session.instruction(), feedback.as_ref().unwrap());
    }

    #[test]
    fn test_full_scan_and_confirm() {
        let mut scanner = scanner();
        assert_eq!(scanner.session_mut().confirm(), Err(Guidance::FinishAllFaces));

        for face in FACE_ORDER {
            show(&mut scanner, solid(face));
            scanner.session_mut().capture();
        }
        let mut session = scanner.finish();
        assert_eq!(session.phase(), SessionPhase::AllCaptured);
        assert_eq!(
            session.capture(),
            CaptureOutcome::Rejected(Guidance::AllFacesCaptured)
        );
        assert!(session.preview().iter().all(Option::is_some));

        let handoff = session.confirm().unwrap();
        assert_eq!(session.phase(), SessionPhase::Confirmed);
        assert_eq!(handoff.cube_string, crate::facelets::FaceletString::SOLVED);
        assert_eq!(session.stats().faces_captured, 6);
    }

    #[test]
    fn test_preview_tracks_captured_centers() {
        let mut session = CaptureSession::default();
        session.set_mode(CaptureMode::Manual);
        session.select_color(FaceletColor::White);
        for i in 0..9 {
            session.paint(i).unwrap();
        }
        session.capture();
        let preview = session.preview();
        assert_eq!(preview[0], Some(FaceletColor::White));
        assert_eq!(preview[1], None);
        assert_eq!(session.preview_hex()[1], crate::color::UNSET_HEX);
    }

    #[test]
    fn test_denied_camera_is_fatal() {
        let result = Scanner::start(
            MockCamera::denied(),
            &CaptureConfig::default(),
            ScanConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SessionError::Camera(CameraError::PermissionDenied))
        ));
    }
}
