//! CLI surface: argument parsing glue around the timer core.

pub mod commands;

pub use commands::{Cli, Commands, PomodoroArgs, TimerArgs};
