//! Command definitions for the timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Interactive terminal countdown timer with a Pomodoro cycling mode
#[derive(Parser, Debug)]
#[command(
    name = "tmr",
    version,
    about = "Interactive terminal countdown timer",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a single countdown timer
    #[command(visible_alias = "t")]
    Timer(TimerArgs),

    /// Run the Pomodoro work/break cycle
    #[command(visible_alias = "p")]
    Pomodoro(PomodoroArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Command Arguments
// ============================================================================

/// Arguments for the timer command
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Countdown length in minutes (fractions allowed)
    #[arg(value_parser = validate_minutes)]
    pub minutes: f64,

    /// Alarm ring count
    #[arg(short = 'c', long, default_value = "999")]
    pub alarm_count: u32,

    /// Alarm on-signal hold in seconds
    #[arg(long = "alarm-sec1", alias = "s1", default_value = "0.5")]
    pub alarm_sec1: f64,

    /// Alarm silence hold in seconds
    #[arg(long = "alarm-sec2", alias = "s2", default_value = "1.5")]
    pub alarm_sec2: f64,
}

// ============================================================================
// Pomodoro Command Arguments
// ============================================================================

/// Arguments for the pomodoro command
#[derive(Args, Debug, Clone)]
pub struct PomodoroArgs {
    /// Work phase length in minutes
    #[arg(short, long, default_value = "25", value_parser = validate_minutes)]
    pub work_time: f64,

    /// Short break length in minutes
    #[arg(short, long, default_value = "5", value_parser = validate_minutes)]
    pub break_time: f64,

    /// Long break length in minutes
    #[arg(short, long, default_value = "15", value_parser = validate_minutes)]
    pub long_break_time: f64,

    /// Work phases per cycle
    #[arg(
        short,
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub cycles: u32,
}

impl Default for PomodoroArgs {
    fn default() -> Self {
        Self {
            work_time: 25.0,
            break_time: 5.0,
            long_break_time: 15.0,
            cycles: 4,
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a duration given in minutes.
///
/// Must parse as a number and be greater than zero.
fn validate_minutes(s: &str) -> Result<f64, String> {
    let minutes: f64 = s
        .parse()
        .map_err(|_| format!("not a number: {s}"))?;
    if minutes <= 0.0 {
        return Err(format!("must be greater than zero: {minutes}"));
    }
    Ok(minutes)
}

// ============================================================================
// Tests
// ============================================================================
