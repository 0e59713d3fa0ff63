//! Sales Flow headless runner
//!
//! Drives the loop driver on autopilot with logging sinks. Useful for soak
//! runs and for eyeballing balance changes.
//!
//! Usage: `sales-flow [seed] [frames] [--tuning FILE] [--settings FILE] [--gravity N ..]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use sales_flow::audio::Cue;
use sales_flow::driver::{CueSink, RenderSink};
use sales_flow::sim::{GamePhase, SessionCommand, TickInput};
use sales_flow::{
    FrameHandle, FrameScheduler, LoopDriver, Settings, SinkError, Snapshot, Tuning, TuningError,
};

/// Frames per simulated wall-clock second
const FRAMES_PER_SECOND: u64 = 60;
const DEFAULT_FRAMES: u64 = 3600;

#[derive(Parser, Debug)]
#[command(name = "sales-flow")]
#[command(about = "Headless Sales Flow runner: plays a seeded run on autopilot and logs the result")]
struct Cli {
    /// Run seed (defaults to the current time)
    seed: Option<u64>,
    /// Frames to simulate before stopping
    #[arg(default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    /// Tuning JSON file; overrides below apply on top of it
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Auto-forward pace per tick
    #[arg(long)]
    base_speed: Option<f32>,
    /// Downward acceleration per tick
    #[arg(long)]
    gravity: Option<f32>,
    /// Jump impulse, negative is up
    #[arg(long, allow_negative_numbers = true)]
    jump_force: Option<f32>,
    /// Game speed gained per point of flow
    #[arg(long)]
    flow_speed_influence: Option<f32>,
    /// Game speed ceiling
    #[arg(long)]
    max_speed_mult: Option<f32>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("failed to read settings {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Cli {
    /// Tuning file (or defaults) with command-line overrides applied; not yet validated
    fn resolve_tuning(&self) -> Result<Tuning, TuningError> {
        let mut tuning = match &self.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let overrides = [
            (&mut tuning.base_speed, self.base_speed),
            (&mut tuning.gravity, self.gravity),
            (&mut tuning.jump_force, self.jump_force),
            (&mut tuning.flow_speed_influence, self.flow_speed_influence),
            (&mut tuning.max_speed_mult, self.max_speed_mult),
        ];
        for (knob, value) in overrides {
            if let Some(value) = value {
                *knob = value;
            }
        }
        Ok(tuning)
    }

    fn resolve_settings(&self) -> Result<Settings, CliError> {
        match &self.settings {
            Some(path) => Settings::load(path).map_err(|source| CliError::Settings {
                path: path.clone(),
                source,
            }),
            None => Ok(Settings::default()),
        }
    }
}

/// Hands out handles; the run loop below plays the part of the display
#[derive(Default)]
struct NullScheduler {
    next: u64,
}

impl FrameScheduler for NullScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        log::trace!("Frame {:?} cancelled", handle);
    }
}

/// Logs a one-line status every simulated second
struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), SinkError> {
        if snapshot.tick % FRAMES_PER_SECOND == 0 {
            log::debug!(
                "t={} level={} score={} flow={:.0} x{:.2} lives={}",
                snapshot.tick,
                snapshot.level,
                snapshot.score,
                snapshot.flow,
                snapshot.multiplier,
                snapshot.lives
            );
        }
        Ok(())
    }
}

struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: &Cue) -> Result<(), SinkError> {
        log::trace!("Cue: {:?}", cue);
        Ok(())
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    log::info!("Sales Flow (headless) starting...");
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let tuning = cli.resolve_tuning()?;
    let settings = cli.resolve_settings()?;

    let mut driver = LoopDriver::new(
        seed,
        tuning,
        settings,
        NullScheduler::default(),
        LogRenderSink,
        LogCueSink,
    )?;
    driver.command(SessionCommand::Start);

    let demo = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for frame in 1..=cli.frames {
        if !driver.frame_pending() {
            break;
        }
        driver.on_frame(&demo);
        if frame % FRAMES_PER_SECOND == 0 {
            driver.on_second();
        }
    }

    let state = driver.state();
    let outcome = match state.phase {
        GamePhase::GameOver => "game over",
        _ => "still running",
    };
    log::info!(
        "Seed {}: {} after {} ticks ({}s) - score {}, level {}, best combo {}, lives {}",
        seed,
        outcome,
        state.time_ticks,
        driver.session_seconds(),
        state.score,
        state.level,
        state.best_combo,
        state.lives
    );
    Ok(())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
