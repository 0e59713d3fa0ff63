//! Frame-synchronized loop driver
//!
//! Owns the simulation and everything around it: one tick per display frame
//! while playing, cues and snapshot pushed out after each tick, and a frame
//! request that is armed only while a run is in progress.

use thiserror::Error;

use crate::audio::{AudioManager, Cue};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, SessionCommand, TickInput, apply_command, tick};
use crate::snapshot::Snapshot;
use crate::tuning::{Tuning, TuningError};

/// Opaque id for a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host display-refresh scheduler
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Failure reported by a render or cue backend
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("backend rejected output: {0}")]
    Rejected(String),
}

/// Receives a snapshot once per frame
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot) -> Result<(), SinkError>;
}

/// Plays tone/haptic cues
pub trait CueSink {
    fn play(&mut self, cue: &Cue) -> Result<(), SinkError>;
}

pub struct LoopDriver<S: FrameScheduler, R: RenderSink, C: CueSink> {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    audio: AudioManager,
    scheduler: S,
    renderer: R,
    cues: C,
    pending: Option<FrameHandle>,
    session_seconds: u64,
}

impl<S: FrameScheduler, R: RenderSink, C: CueSink> LoopDriver<S, R, C> {
    /// Build a driver in the menu. Tuning outside its playable ranges is refused.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        scheduler: S,
        renderer: R,
        cues: C,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("Loop driver created with seed: {}", seed);
        Ok(Self {
            state: GameState::new(seed),
            tuning,
            audio: AudioManager::from_settings(&settings),
            settings,
            scheduler,
            renderer,
            cues,
            pending: None,
            session_seconds: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seconds spent playing since the last start/retry
    pub fn session_seconds(&self) -> u64 {
        self.session_seconds
    }

    pub fn frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace presentation preferences; takes effect on the next frame
    pub fn set_settings(&mut self, settings: Settings) {
        self.audio = AudioManager::from_settings(&settings);
        self.settings = settings;
    }

    /// Apply a session command and arm or disarm the frame request to match
    pub fn command(&mut self, command: SessionCommand) -> bool {
        if !apply_command(&mut self.state, command) {
            return false;
        }
        if self.state.phase == GamePhase::Playing {
            self.session_seconds = 0;
            self.arm();
        } else {
            self.disarm();
        }
        self.present();
        true
    }

    /// Called by the host when a requested frame fires
    pub fn on_frame(&mut self, input: &TickInput) {
        self.pending = None;
        if self.state.phase != GamePhase::Playing {
            return;
        }

        tick(&mut self.state, input, &self.tuning);

        for event in self.state.drain_events() {
            let Some(cue) = self.audio.cue(&event) else {
                continue;
            };
            if let Err(e) = self.cues.play(&cue) {
                log::warn!("Cue for {:?} dropped: {}", event, e);
            }
        }
        self.present();

        if self.state.phase == GamePhase::Playing {
            self.arm();
        }
    }

    /// Once-per-second wall-clock callback; only counts, never touches the sim
    pub fn on_second(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.session_seconds += 1;
        }
    }

    fn present(&mut self) {
        let snapshot = Snapshot::capture(&self.state, &self.settings);
        if let Err(e) = self.renderer.present(&snapshot) {
            log::warn!("Render error: {}", e);
        }
    }

    fn arm(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<S: FrameScheduler, R: RenderSink, C: CueSink> Drop for LoopDriver<S, R, C> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
        frames: Vec<u64>,
        cues: usize,
    }

    type Shared = Rc<RefCell<Log>>;

    struct MockScheduler(Shared, u64);

    impl FrameScheduler for MockScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.1 += 1;
            let handle = FrameHandle(self.1);
            self.0.borrow_mut().requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.0.borrow_mut().cancelled.push(handle);
        }
    }

    struct MockRenderer(Shared, bool);

    impl RenderSink for MockRenderer {
        fn present(&mut self, snapshot: &Snapshot) -> Result<(), SinkError> {
            if self.1 {
                return Err(SinkError::Unavailable("gpu lost".into()));
            }
            self.0.borrow_mut().frames.push(snapshot.tick);
            Ok(())
        }
    }

    struct MockCues(Shared, bool);

    impl CueSink for MockCues {
        fn play(&mut self, _cue: &Cue) -> Result<(), SinkError> {
            if self.1 {
                return Err(SinkError::Rejected("no audio context".into()));
            }
            self.0.borrow_mut().cues += 1;
            Ok(())
        }
    }

    fn driver(
        seed: u64,
        failing: bool,
    ) -> (LoopDriver<MockScheduler, MockRenderer, MockCues>, Shared) {
        let log = Shared::default();
        let driver = LoopDriver::new(
            seed,
            Tuning::default(),
            Settings::default(),
            MockScheduler(log.clone(), 0),
            MockRenderer(log.clone(), failing),
            MockCues(log.clone(), failing),
        )
        .unwrap();
        (driver, log)
    }

    #[test]
    fn test_frame_requested_only_while_playing() {
        let (mut driver, log) = driver(1, false);
        driver.on_frame(&TickInput::default());
        assert_eq!(driver.state().time_ticks, 0);
        assert!(log.borrow().requested.is_empty());

        assert!(driver.command(SessionCommand::Start));
        assert!(driver.frame_pending());
        driver.on_frame(&TickInput::default());
        driver.on_frame(&TickInput::default());
        assert_eq!(driver.state().time_ticks, 2);
        assert_eq!(log.borrow().requested.len(), 3);
        // Start snapshot plus one per tick
        assert_eq!(log.borrow().frames, vec![0, 1, 2]);

        assert!(driver.command(SessionCommand::ExitToMenu));
        assert!(!driver.frame_pending());
        assert_eq!(log.borrow().cancelled, vec![FrameHandle(3)]);
    }

    #[test]
    fn test_game_over_stops_frames() {
        let (mut driver, log) = driver(2, false);
        driver.command(SessionCommand::Start);
        driver.state.lives = 0;
        driver.on_frame(&TickInput::default());
        assert_eq!(driver.state().phase, GamePhase::GameOver);
        assert!(!driver.frame_pending());
        // Game-over cue went out
        assert!(log.borrow().cues >= 1);

        driver.on_frame(&TickInput::default());
        assert_eq!(driver.state().time_ticks, 1);
    }

    #[test]
    fn test_failing_sinks_do_not_change_outcome() {
        let (mut good, _) = driver(42, false);
        let (mut bad, bad_log) = driver(42, true);
        good.command(SessionCommand::Start);
        bad.command(SessionCommand::Start);
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            good.on_frame(&demo);
            bad.on_frame(&demo);
        }
        assert_eq!(good.state().score, bad.state().score);
        assert_eq!(good.state().player.pos, bad.state().player.pos);
        assert_eq!(good.state().lives, bad.state().lives);
        assert!(bad_log.borrow().frames.is_empty());
    }

    #[test]
    fn test_session_seconds_isolated() {
        let (mut driver, _) = driver(3, false);
        driver.on_second();
        assert_eq!(driver.session_seconds(), 0);

        driver.command(SessionCommand::Start);
        let before = driver.state().time_ticks;
        driver.on_second();
        driver.on_second();
        assert_eq!(driver.session_seconds(), 2);
        assert_eq!(driver.state().time_ticks, before);
    }

    #[test]
    fn test_out_of_range_tuning_refused() {
        let log = Shared::default();
        let tuning = Tuning {
            gravity: 3.0,
            ..Tuning::default()
        };
        let result = LoopDriver::new(
            1,
            tuning,
            Settings::default(),
            MockScheduler(log.clone(), 0),
            MockRenderer(log.clone(), false),
            MockCues(log.clone(), false),
        );
        assert!(matches!(
            result,
            Err(TuningError::OutOfRange { field: "gravity", .. })
        ));
        assert!(log.borrow().requested.is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let (mut driver, log) = driver(4, false);
        driver.command(SessionCommand::Start);
        drop(driver);
        assert_eq!(log.borrow().cancelled, vec![FrameHandle(1)]);
    }
}
