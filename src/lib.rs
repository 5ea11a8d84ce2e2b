//! tmr - interactive terminal countdown timer
//!
//! This library provides the core functionality for the `tmr` CLI:
//! - Countdown session state machine with pause, seek, skip and quit
//! - Adaptive one-line terminal display with a spinner progress bar
//! - Cooperatively cancellable background alarm
//! - Pomodoro work/break cycle controller
//! - Raw-mode/cursor terminal guard and CLI glue

pub mod cli;
pub mod notify;
pub mod pomodoro;
pub mod terminal;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use pomodoro::{EnginePhaseRunner, PhaseRunner, PomodoroController};
pub use timer::{Command, ProgressBar, TimerEngine, TimerPhase, TimerSession};
pub use types::{AlarmSpec, ConfigError, CycleConfig, PhaseKind};
