//! Cursor-based playback of a solution.

use crate::animation::{
    scale_duration, AnimationStatus, Assembly, SceneSink, TurnAnimation, TurnAnimator,
};
use crate::capture::PlaybackConfig;
use crate::solver::{Move, MoveSequence};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by player controls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("speed must be a positive finite multiplier, got {0}")]
    InvalidSpeed(f32),
}

/// Whether a turn is in flight. At most one ever is.
#[derive(Debug, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Animating(TurnAnimation),
}

/// Result of a step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A turn animation started for this move.
    Started(Move),
    /// A turn is already in flight; the request was dropped.
    Busy,
    /// Cursor is already at the start or end.
    AtBoundary,
}

/// Result of the play/pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    Playing,
    Paused,
    /// Nothing left to play.
    Finished,
}

/// Plays a move sequence onto an assembly, one turn at a time.
#[derive(Debug)]
pub struct Player {
    moves: MoveSequence,
    cursor: usize,
    state: PlayerState,
    assembly: Assembly,
    animator: TurnAnimator,
    move_delay: Duration,
    speed: f32,
    /// Turn duration and inter-move delay at the current speed.
    turn_duration: Duration,
    scaled_delay: Duration,
    running: bool,
    finished: bool,
    /// Wait left before auto-play issues the next step.
    delay_remaining: Duration,
    turns_completed: u64,
}

impl Player {
    /// Builds an idle player at the configured speed.
    ///
    /// A configured speed that [`set_speed`](Self::set_speed) would reject
    /// is replaced by 1.0.
    pub fn new(moves: MoveSequence, assembly: Assembly, config: &PlaybackConfig) -> Self {
        let animator = TurnAnimator::new(Duration::from_millis(config.turn_duration_ms));
        let move_delay = Duration::from_millis(config.move_delay_ms);
        let mut player = Self {
            moves,
            cursor: 0,
            state: PlayerState::Idle,
            assembly,
            turn_duration: animator.base_duration(),
            animator,
            move_delay,
            speed: 1.0,
            scaled_delay: move_delay,
            running: false,
            finished: false,
            delay_remaining: Duration::ZERO,
            turns_completed: 0,
        };
        if let Err(err) = player.set_speed(config.default_speed) {
            tracing::warn!(error = %err, "Falling back to 1x playback speed");
        }
        player
    }

    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// (cursor, total moves)
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.moves.len())
    }

    /// The move at the cursor: next to play, or the one just undone.
    pub fn current_move(&self) -> Option<Move> {
        self.moves.get(self.cursor)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, PlayerState::Animating(_))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn turns_completed(&self) -> u64 {
        self.turns_completed
    }

    /// Changes the speed multiplier for turns started from now on.
    ///
    /// Rejects speeds that are not positive, or so small that the scaled
    /// durations overflow.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), PlaybackError> {
        let (Some(turn_duration), Some(scaled_delay)) = (
            self.animator.duration_at(speed),
            scale_duration(self.move_delay, speed),
        ) else {
            return Err(PlaybackError::InvalidSpeed(speed));
        };
        self.speed = speed;
        self.turn_duration = turn_duration;
        self.scaled_delay = scaled_delay;
        tracing::debug!(speed, "Playback speed changed");
        Ok(())
    }

    /// Starts the move at the cursor and advances the cursor.
    pub fn step_forward(&mut self) -> StepOutcome {
        if self.is_animating() {
            tracing::trace!(cursor = self.cursor, "Step forward dropped: turn in flight");
            return StepOutcome::Busy;
        }
        let Some(mv) = self.moves.get(self.cursor) else {
            return StepOutcome::AtBoundary;
        };
        self.begin(mv);
        self.cursor += 1;
        StepOutcome::Started(mv)
    }

    /// Moves the cursor back and undoes the move now under it.
    pub fn step_backward(&mut self) -> StepOutcome {
        if self.is_animating() {
            tracing::trace!(cursor = self.cursor, "Step backward dropped: turn in flight");
            return StepOutcome::Busy;
        }
        if self.cursor == 0 {
            return StepOutcome::AtBoundary;
        }
        self.cursor -= 1;
        let Some(mv) = self.moves.get(self.cursor) else {
            return StepOutcome::AtBoundary;
        };
        let inverse = mv.inverse();
        self.finished = false;
        self.begin(inverse);
        StepOutcome::Started(inverse)
    }

    /// Toggles auto-play.
    pub fn play(&mut self) -> PlayStatus {
        if self.running {
            self.pause();
            return PlayStatus::Paused;
        }
        if self.cursor >= self.moves.len() {
            self.finished = true;
            tracing::info!(total = self.moves.len(), "Playback finished");
            return PlayStatus::Finished;
        }
        self.running = true;
        self.finished = false;
        self.delay_remaining = Duration::ZERO;
        tracing::info!(cursor = self.cursor, speed = self.speed, "Playback started");
        PlayStatus::Playing
    }

    /// Stops scheduling further turns. A turn in flight still completes.
    pub fn pause(&mut self) {
        if self.running {
            tracing::info!(cursor = self.cursor, "Playback paused");
        }
        self.running = false;
    }

    /// Advances time by `dt`, pushing transforms to `sink`.
    pub fn tick(&mut self, dt: Duration, sink: &mut dyn SceneSink) {
        match std::mem::take(&mut self.state) {
            PlayerState::Animating(mut turn) => match turn.advance(dt) {
                AnimationStatus::Complete => {
                    turn.finish(&mut self.assembly, sink);
                    self.on_turn_complete();
                }
                AnimationStatus::Running { .. } => {
                    turn.render(&self.assembly, sink);
                    self.state = PlayerState::Animating(turn);
                }
            },
            PlayerState::Idle if self.running => {
                if self.delay_remaining > dt {
                    self.delay_remaining -= dt;
                } else {
                    self.delay_remaining = Duration::ZERO;
                    self.step_forward();
                }
            }
            PlayerState::Idle => {}
        }
    }

    /// Move list with the current move bracketed.
    pub fn display(&self) -> String {
        self.moves
            .iter()
            .enumerate()
            .map(|(i, mv)| {
                if i == self.cursor {
                    format!("[{mv}]")
                } else {
                    mv.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn begin(&mut self, mv: Move) {
        let turn = self.animator.start(mv, &self.assembly, self.turn_duration);
        self.state = PlayerState::Animating(turn);
    }

    fn on_turn_complete(&mut self) {
        self.turns_completed += 1;
        if !self.running {
            return;
        }
        if self.cursor >= self.moves.len() {
            self.running = false;
            self.finished = true;
            tracing::info!(total = self.moves.len(), "Playback finished");
        } else {
            self.delay_remaining = self.scaled_delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::LogScene;
    use crate::facelets::FaceletState;
    use crate::solver::CubeModel;

    const FRAME: Duration = Duration::from_millis(16);

    fn player(moves: &str) -> Player {
        Player::new(
            moves.parse().unwrap(),
            Assembly::from_state(&FaceletState::solved()),
            &PlaybackConfig::default(),
        )
    }

    fn settle(player: &mut Player, scene: &mut LogScene) {
        while player.is_animating() {
            player.tick(FRAME, scene);
        }
    }

    #[test]
    fn test_step_forward_while_animating_is_dropped() {
        let mut player = player("R U");
        assert!(matches!(player.step_forward(), StepOutcome::Started(_)));
        assert_eq!(player.cursor(), 1);

        assert_eq!(player.step_forward(), StepOutcome::Busy);
        assert_eq!(player.step_backward(), StepOutcome::Busy);
        assert_eq!(player.cursor(), 1);
    }

    #[test]
    fn test_forward_then_backward_restores_cursor_and_scene() {
        let mut scene = LogScene::new();
        let mut player = player("R U2 F'");
        player.step_forward();
        settle(&mut player, &mut scene);
        let cursor = player.cursor();

        for _ in 0..3 {
            let before = player.cursor();
            player.step_forward();
            settle(&mut player, &mut scene);
            let undone = player.step_backward();
            settle(&mut player, &mut scene);
            assert_eq!(player.cursor(), before);
            assert!(matches!(undone, StepOutcome::Started(_)));
        }
        assert_eq!(player.cursor(), cursor);

        player.step_backward();
        settle(&mut player, &mut scene);
        assert_eq!(player.cursor(), 0);
        assert!(player.assembly().is_home());
    }

    #[test]
    fn test_backward_displays_undone_move() {
        let mut scene = LogScene::new();
        let mut player = player("R U'");
        player.step_forward();
        settle(&mut player, &mut scene);
        player.step_forward();
        settle(&mut player, &mut scene);
        assert_eq!(player.current_move(), None);

        let outcome = player.step_backward();
        assert_eq!(outcome, StepOutcome::Started("U".parse().unwrap()));
        assert_eq!(player.current_move(), Some("U'".parse().unwrap()));
        assert_eq!(player.display(), "R [U']");
    }

    #[test]
    fn test_boundaries() {
        let mut player = player("R");
        assert_eq!(player.step_backward(), StepOutcome::AtBoundary);
        player.step_forward();
        let mut scene = LogScene::new();
        settle(&mut player, &mut scene);
        assert_eq!(player.step_forward(), StepOutcome::AtBoundary);
    }

    #[test]
    fn test_play_empty_sequence_finishes_immediately() {
        let mut player = player("");
        assert_eq!(player.play(), PlayStatus::Finished);
        assert!(player.is_finished());
        assert!(!player.is_running());
    }

    #[test]
    fn test_auto_play_runs_to_completion() {
        let mut scene = LogScene::new();
        let scramble = "R U R' F2 D";
        let mut model = CubeModel::solved();
        model.apply_all(&scramble.parse().unwrap());

        let mut player = Player::new(
            scramble.parse::<MoveSequence>().unwrap().inverse(),
            Assembly::from_state(&model.to_facelets().to_state()),
            &PlaybackConfig::default(),
        );
        player.set_speed(4.0).unwrap();
        assert_eq!(player.play(), PlayStatus::Playing);

        let mut frames = 0;
        while !player.is_finished() {
            player.tick(FRAME, &mut scene);
            frames += 1;
            assert!(frames < 10_000, "playback never finished");
        }
        assert_eq!(player.progress(), (5, 5));
        assert_eq!(player.turns_completed(), 5);
        assert!(player
            .assembly()
            .facelet_state()
            .to_facelet_string()
            .unwrap()
            .is_solved());
    }

    #[test]
    fn test_pause_lets_turn_finish_but_schedules_nothing() {
        let mut scene = LogScene::new();
        let mut player = player("R U F");
        player.play();
        player.tick(FRAME, &mut scene);
        assert!(player.is_animating());

        assert_eq!(player.play(), PlayStatus::Paused);
        settle(&mut player, &mut scene);
        for _ in 0..200 {
            player.tick(FRAME, &mut scene);
        }
        assert_eq!(player.cursor(), 1);
        assert!(!player.is_animating());
    }

    #[test]
    fn test_inter_move_delay_scales_with_speed() {
        let mut scene = LogScene::new();
        let mut player = player("R U");
        player.set_speed(2.0).unwrap();
        player.play();
        player.tick(FRAME, &mut scene);
        settle(&mut player, &mut scene);

        // 1000 ms / 2.0 = 500 ms wait before the next turn.
        player.tick(Duration::from_millis(400), &mut scene);
        assert!(!player.is_animating());
        player.tick(Duration::from_millis(99), &mut scene);
        assert!(!player.is_animating());
        player.tick(Duration::from_millis(1), &mut scene);
        assert!(player.is_animating());
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let mut player = player("R");
        assert_eq!(player.set_speed(0.0), Err(PlaybackError::InvalidSpeed(0.0)));
        assert!(player.set_speed(f32::NAN).is_err());
        assert!(player.set_speed(-1.0).is_err());
        assert_eq!(player.speed(), 1.0);
    }

    #[test]
    fn test_tiny_speed_rejected_and_stepping_still_works() {
        let mut scene = LogScene::new();
        let mut player = player("R U");
        assert_eq!(
            player.set_speed(1e-20),
            Err(PlaybackError::InvalidSpeed(1e-20))
        );
        assert_eq!(player.speed(), 1.0);

        assert!(matches!(player.step_forward(), StepOutcome::Started(_)));
        player.tick(Duration::from_millis(500), &mut scene);
        assert!(!player.is_animating());
    }

    #[test]
    fn test_unusable_configured_speed_falls_back_to_default() {
        let config = PlaybackConfig {
            default_speed: 0.0,
            ..Default::default()
        };
        let mut player = Player::new("R".parse().unwrap(), Assembly::new(), &config);
        assert_eq!(player.speed(), 1.0);

        let mut scene = LogScene::new();
        player.play();
        while !player.is_finished() {
            player.tick(FRAME, &mut scene);
        }
        assert_eq!(player.turns_completed(), 1);
    }

    #[test]
    fn test_configured_speed_is_applied() {
        let config = PlaybackConfig {
            default_speed: 2.0,
            ..Default::default()
        };
        let mut player = Player::new("R".parse().unwrap(), Assembly::new(), &config);
        assert_eq!(player.speed(), 2.0);

        let mut scene = LogScene::new();
        player.step_forward();
        player.tick(Duration::from_millis(249), &mut scene);
        assert!(player.is_animating());
        player.tick(Duration::from_millis(1), &mut scene);
        assert!(!player.is_animating());
    }
}
