//! Core data types for the timer.
//!
//! This module defines the configuration values shared across the crate:
//! - Alarm repetition parameters
//! - Pomodoro cycle configuration with validation
//! - Phase identification for the cycle controller

use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Validation errors for timer and cycle configuration.
///
/// These are surfaced at the CLI boundary before the engine starts;
/// the core never sees an invalid configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A duration that must be positive was zero or negative.
    #[error("duration must be greater than zero: {0}s")]
    NonPositiveDuration(f64),

    /// Cycle count must be at least one.
    #[error("cycle count must be at least 1: {0}")]
    ZeroCycles(u32),
}

// ============================================================================
// AlarmSpec
// ============================================================================

/// Parameters for the end-of-countdown alarm.
///
/// The alarm rings `count` times; each ring is a bell followed by `sec1`
/// seconds of on-signal and `sec2` seconds of silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmSpec {
    /// Number of rings before the alarm gives up on its own
    pub count: u32,
    /// On-signal hold in seconds
    pub sec1: f64,
    /// Silence hold in seconds
    pub sec2: f64,
}

impl Default for AlarmSpec {
    fn default() -> Self {
        Self {
            count: 3,
            sec1: 0.5,
            sec2: 1.5,
        }
    }
}

impl AlarmSpec {
    /// Creates a new alarm spec.
    pub fn new(count: u32, sec1: f64, sec2: f64) -> Self {
        Self { count, sec1, sec2 }
    }
}

// ============================================================================
// PhaseKind
// ============================================================================

/// Identifies one phase within a Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// Focused work phase
    Work,
    /// Short break between work phases
    ShortBreak,
    /// Long break closing a cycle
    LongBreak,
}

impl PhaseKind {
    /// Returns the display title for this phase.
    pub fn title(&self) -> &'static str {
        match self {
            PhaseKind::Work => "WORK",
            PhaseKind::ShortBreak => "SHORT BREAK",
            PhaseKind::LongBreak => "LONG BREAK",
        }
    }
}

// ============================================================================
// CycleConfig
// ============================================================================

/// Configuration for one Pomodoro controller run.
///
/// Immutable for the life of the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleConfig {
    /// Work phase duration in seconds
    pub work_sec: f64,
    /// Short break duration in seconds
    pub break_sec: f64,
    /// Long break duration in seconds
    pub long_break_sec: f64,
    /// Number of work phases per cycle (>= 1)
    pub cycles: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_sec: 25.0 * 60.0,
            break_sec: 5.0 * 60.0,
            long_break_sec: 15.0 * 60.0,
            cycles: 4,
        }
    }
}

impl CycleConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for sec in [self.work_sec, self.break_sec, self.long_break_sec] {
            if sec <= 0.0 {
                return Err(ConfigError::NonPositiveDuration(sec));
            }
        }
        if self.cycles < 1 {
            return Err(ConfigError::ZeroCycles(self.cycles));
        }
        Ok(())
    }
}

/// Validates a single timer duration in seconds.
pub fn validate_duration(sec: f64) -> Result<(), ConfigError> {
    if sec <= 0.0 {
        return Err(ConfigError::NonPositiveDuration(sec));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
