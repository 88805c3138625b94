//! Cube Scan CLI
//!
//! Command-line driver for the scan → solve → play pipeline. Scanning uses
//! the mock camera; playback renders into a logging scene.

use clap::{Parser, Subcommand};
use cube_scan::{
    animation::{Assembly, LogScene},
    capture::{ConfigError, FileConfig, MockCamera, OutputConfig},
    facelets::{FaceletError, FaceletState, FaceletString, FACE_ORDER},
    metrics::{MetricsError, MetricsRegistry, MetricsSnapshot},
    playback::{PlaybackError, Player, SpeedControl},
    session::{CaptureOutcome, CaptureSession, Guidance, Handoff, HandoffError, Scanner, SessionError},
    solver::{MoveParseError, MoveSequence, Scramble, ScrambleSolver, ScriptedSolver, SolveError, Solver},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Simulated display frame.
const FRAME_STEP: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "cube-scan", version, about = "Scan, solve and replay a 3x3 cube")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve Prometheus metrics on the configured port while running
    /// (needs the `metrics` feature). Ctrl-C exits once done.
    #[arg(long, global = true)]
    serve_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a cube shown to the mock camera and write the handoff file.
    Scan {
        /// 54-character facelet string of the cube held up to the camera.
        #[arg(long)]
        faces: String,
        /// Handoff file (defaults to the configured path).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Solve a scanned cube and print the solution.
    Solve {
        /// Handoff file (defaults to the configured path).
        #[arg(long)]
        input: Option<PathBuf>,
        /// Seed of the scramble that produced the cube.
        #[arg(long, required_unless_present = "script", conflicts_with = "script")]
        seed: Option<u64>,
        /// Length of the seeded scramble.
        #[arg(long, default_value_t = 20)]
        length: usize,
        /// Fixed solution to return instead.
        #[arg(long)]
        script: Option<String>,
    },
    /// Play a move sequence on the cube model.
    Play {
        /// Space-separated moves, e.g. "R U R' U'".
        #[arg(long)]
        moves: String,
        /// Start from a scanned cube instead of a solved one.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Speed multiplier (defaults to the configured speed).
        #[arg(long)]
        speed: Option<f32>,
        /// Tick at wall-clock pace; Ctrl-C pauses after the current turn.
        #[arg(long)]
        realtime: bool,
    },
    /// Scramble, scan, solve and replay a cube end to end.
    Demo {
        /// Scramble seed; drawn from OS entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 20)]
        length: usize,
        /// Print the collected metrics when done.
        #[arg(long)]
        metrics: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Facelets(#[from] FaceletError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("scan stopped: {0}")]
    Rejected(Guidance),
    #[error(transparent)]
    Handoff(#[from] HandoffError),
    #[error(transparent)]
    Moves(#[from] MoveParseError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[cfg(feature = "metrics")]
    #[error(transparent)]
    Server(#[from] cube_scan::metrics::ServerError),
    #[error("failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("playback did not return the cube to solved")]
    NotSolved,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Cube Scan v{}", cube_scan::VERSION);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let realtime = matches!(cli.command, Command::Play { realtime: true, .. });
    let interrupted = Arc::new(AtomicBool::new(false));
    if realtime || cli.serve_metrics {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
    }
    let telemetry = Telemetry::new(cli.serve_metrics, &config.output)?;

    match cli.command {
        Command::Scan { faces, out } => {
            let facelets = FaceletString::parse(&faces)?;
            let (handoff, _) = scan(&config, &facelets)?;
            let path = out.unwrap_or_else(|| config.output.handoff_path.clone());
            handoff.save(&path)?;
            println!("{}", handoff.cube_string);
        }
        Command::Solve {
            input,
            seed,
            length,
            script,
        } => {
            let path = input.unwrap_or_else(|| config.output.handoff_path.clone());
            let facelets = Handoff::load(&path)?.validate()?;
            let solution = match (seed, script) {
                (Some(seed), _) => {
                    ScrambleSolver::new(Scramble::seeded(seed, length)).solve(&facelets)?
                }
                (None, Some(text)) => ScriptedSolver::from_text(&text)?.solve(&facelets)?,
                (None, None) => MoveSequence::default(),
            };
            println!("{}", solution);
        }
        Command::Play {
            moves,
            input,
            speed,
            realtime,
        } => {
            let moves: MoveSequence = moves.parse()?;
            let assembly = match input {
                Some(path) => Assembly::from_state(&Handoff::load(&path)?.state),
                None => Assembly::new(),
            };
            let mut player = Player::new(moves, assembly, &config.playback);
            let speed = match speed {
                Some(speed) => speed,
                None => SpeedControl::new(&config.playback.speed_steps, config.playback.default_speed)
                    .current(),
            };
            player.set_speed(speed)?;

            play(&mut player, realtime, &interrupted, &telemetry, None);
            println!("{}", player.display());
        }
        Command::Demo {
            seed,
            length,
            metrics,
        } => {
            demo(&config, seed, length, &interrupted, &telemetry)?;
            if metrics {
                print!("{}", telemetry.registry.encode()?);
            }
        }
    }

    telemetry.linger(&interrupted);
    Ok(())
}

/// Metrics for the current command, optionally served over HTTP.
struct Telemetry {
    registry: MetricsRegistry,
    #[cfg(feature = "metrics")]
    exporter: Option<cube_scan::metrics::MetricsHandle>,
}

impl Telemetry {
    #[cfg(feature = "metrics")]
    fn new(serve: bool, output: &OutputConfig) -> Result<Self, CliError> {
        use cube_scan::metrics::{MetricsServer, MetricsServerConfig};

        let exporter = match MetricsServerConfig::from_output(output) {
            Some(config) if serve => {
                Some(MetricsServer::new(config, MetricsRegistry::new()?).spawn()?)
            }
            None if serve => {
                warn!("metrics_port is 0; not serving metrics");
                None
            }
            _ => None,
        };
        Ok(Self {
            registry: MetricsRegistry::new()?,
            exporter,
        })
    }

    #[cfg(not(feature = "metrics"))]
    fn new(serve: bool, _output: &OutputConfig) -> Result<Self, CliError> {
        if serve {
            warn!("Built without the `metrics` feature; not serving metrics");
        }
        Ok(Self {
            registry: MetricsRegistry::new()?,
        })
    }

    fn publish(&self, session: Option<&CaptureSession>, player: Option<&Player>) {
        let snapshot = MetricsSnapshot::from_components(session, player);
        self.registry.update(&snapshot);
        #[cfg(feature = "metrics")]
        if let Some(exporter) = &self.exporter {
            exporter.publish(&snapshot);
        }
    }

    /// Keeps a running exporter up until Ctrl-C.
    fn linger(&self, interrupted: &AtomicBool) {
        #[cfg(feature = "metrics")]
        if let Some(exporter) = &self.exporter {
            info!(addr = %exporter.local_addr(), "Serving metrics; press Ctrl-C to exit");
            while !interrupted.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        #[cfg(not(feature = "metrics"))]
        let _ = interrupted;
    }
}

/// Shows each face of `facelets` to a mock camera and captures it.
fn scan(
    config: &FileConfig,
    facelets: &FaceletString,
) -> Result<(Handoff, CaptureSession), CliError> {
    let state = facelets.to_state();
    let camera = MockCamera::with_region(config.scan.clone());
    let mut scanner = Scanner::start(camera, &config.capture, config.scan.clone())?;

    for face in FACE_ORDER {
        info!("{}", Guidance::PositionFace { face });
        scanner.camera_mut().hold(*state.face(face));
        if let Some(feedback) = scanner.poll()? {
            info!(%face, "{}", feedback);
        }
        match scanner.session_mut().capture() {
            CaptureOutcome::Rejected(guidance) => return Err(CliError::Rejected(guidance)),
            outcome => info!(?outcome, "Capture accepted"),
        }
    }

    let mut session = scanner.finish();
    let handoff = session.confirm().map_err(CliError::Rejected)?;
    handoff.validate()?;
    Ok((handoff, session))
}

/// Runs the player until it finishes or is interrupted.
fn play(
    player: &mut Player,
    realtime: bool,
    interrupted: &AtomicBool,
    telemetry: &Telemetry,
    session: Option<&CaptureSession>,
) {
    let mut scene = LogScene::new();
    player.assembly().paint(&mut scene);
    player.play();

    let mut last_cursor = player.cursor();
    while !player.is_finished() {
        if interrupted.load(Ordering::SeqCst) {
            player.pause();
            if !player.is_animating() {
                warn!(cursor = player.cursor(), "Playback interrupted");
                break;
            }
        }
        player.tick(FRAME_STEP, &mut scene);
        telemetry.publish(session, Some(player));
        if player.cursor() != last_cursor {
            last_cursor = player.cursor();
            info!("{}", player.display());
        }
        if realtime {
            std::thread::sleep(FRAME_STEP);
        }
    }

    info!(
        turns = player.turns_completed(),
        transforms = scene.transform_updates(),
        "Playback done"
    );
}

fn demo(
    config: &FileConfig,
    seed: Option<u64>,
    length: usize,
    interrupted: &AtomicBool,
    telemetry: &Telemetry,
) -> Result<(), CliError> {
    let scramble = match seed {
        Some(seed) => Scramble::seeded(seed, length),
        None => Scramble::from_os_entropy(length),
    };
    info!(scramble = %scramble.moves(), "Scrambled cube");

    let (handoff, session) = scan(config, scramble.facelets())?;
    telemetry.publish(Some(&session), None);
    let facelets = handoff.validate()?;
    let solution = ScrambleSolver::new(scramble).solve(&facelets)?;
    println!("Solution: {}", solution);

    let mut player = Player::new(solution, Assembly::from_state(&handoff.state), &config.playback);
    play(&mut player, false, interrupted, telemetry, Some(&session));

    if player.assembly().facelet_state() != FaceletState::solved() {
        return Err(CliError::NotSolved);
    }
    println!("Cube solved in {} turns", player.turns_completed());
    Ok(())
}
