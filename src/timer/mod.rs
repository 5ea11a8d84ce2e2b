//! The single-timer core: session state machine, adaptive display,
//! progress bar, key handling, alarm, and the engine loop tying them
//! together.

pub mod alarm;
pub mod display;
pub mod engine;
pub mod keymap;
pub mod progress;
pub mod session;

pub use engine::TimerEngine;
pub use keymap::Command;
pub use progress::ProgressBar;
pub use session::{TimerPhase, TimerSession};
