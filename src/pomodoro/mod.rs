//! Pomodoro cycle controller.
//!
//! Sequences Work -> Short-Break pairs ending each cycle with a long
//! break, repeating indefinitely. Each phase is delegated to one timer
//! engine instance through the [`PhaseRunner`] seam; the first phase that
//! reports quit stops the controller immediately.

use anyhow::Result;
use crossterm::style::Color;
use tracing::debug;

use crate::notify;
use crate::timer::TimerEngine;
use crate::types::{AlarmSpec, CycleConfig, PhaseKind};

// ============================================================================
// PhaseRunner
// ============================================================================

/// Runs one phase and reports whether the user quit during it.
pub trait PhaseRunner {
    /// Runs a single phase of `limit_sec` seconds.
    fn run_phase(&mut self, phase: PhaseKind, limit_sec: f64) -> Result<bool>;
}

/// Display color for each phase title.
pub fn phase_color(phase: PhaseKind) -> Color {
    match phase {
        PhaseKind::Work => Color::Cyan,
        PhaseKind::ShortBreak => Color::Yellow,
        PhaseKind::LongBreak => Color::Red,
    }
}

/// The production runner: one [`TimerEngine`] per phase, skipping allowed,
/// with a desktop notification once the phase completes normally.
pub struct EnginePhaseRunner {
    alarm_spec: AlarmSpec,
}

impl EnginePhaseRunner {
    /// Creates a runner ringing each phase end with `alarm_spec`.
    pub fn new(alarm_spec: AlarmSpec) -> Self {
        Self { alarm_spec }
    }
}

impl PhaseRunner for EnginePhaseRunner {
    fn run_phase(&mut self, phase: PhaseKind, limit_sec: f64) -> Result<bool> {
        let mut engine = TimerEngine::new(
            phase.title(),
            phase_color(phase),
            limit_sec,
            self.alarm_spec,
            true,
        );
        let quit = engine.run()?;
        if !quit {
            notify::phase_done(phase);
        }
        Ok(quit)
    }
}

// ============================================================================
// PomodoroController
// ============================================================================

/// Drives the work/break cycle until the user quits.
pub struct PomodoroController<R: PhaseRunner> {
    config: CycleConfig,
    runner: R,
}

impl PomodoroController<EnginePhaseRunner> {
    /// Creates a controller backed by real timer engines.
    pub fn new(config: CycleConfig, alarm_spec: AlarmSpec) -> Self {
        Self::with_runner(config, EnginePhaseRunner::new(alarm_spec))
    }
}

impl<R: PhaseRunner> PomodoroController<R> {
    /// Creates a controller with a custom phase runner.
    pub fn with_runner(config: CycleConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Runs cycles forever, returning `true` as soon as any phase reports
    /// quit.
    ///
    /// Within a cycle of N work phases, phases `0..N-1` pair work with a
    /// short break and phase `N-1` pairs work with the long break. With
    /// `N = 1` every cycle is Work -> Long-Break only.
    pub fn run(&mut self) -> Result<bool> {
        debug!("config={:?}", self.config);

        loop {
            for i in 0..self.config.cycles {
                if self
                    .runner
                    .run_phase(PhaseKind::Work, self.config.work_sec)?
                {
                    return Ok(true);
                }

                let (kind, sec) = if i + 1 < self.config.cycles {
                    (PhaseKind::ShortBreak, self.config.break_sec)
                } else {
                    (PhaseKind::LongBreak, self.config.long_break_sec)
                };
                if self.runner.run_phase(kind, sec)? {
                    return Ok(true);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
