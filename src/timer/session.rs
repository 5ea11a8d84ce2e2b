//! Countdown session state machine.
//!
//! A session tracks elapsed time against a fixed limit over a monotonic
//! clock expressed in seconds. All transitions are total functions over the
//! state; quitting is reported through a flag, never an error.

use tracing::debug;

// ============================================================================
// TimerPhase
// ============================================================================

/// The session state machine.
///
/// One enum instead of independent boolean flags, so invalid combinations
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Counting down
    Running,
    /// Elapsed time frozen
    Paused,
    /// Countdown expired, alarm ringing
    Alarm,
    /// Session finished
    Done,
}

// ============================================================================
// TimerSession
// ============================================================================

/// One countdown from zero to `t_limit` seconds.
///
/// Created per phase invocation and exclusively owned by one engine.
/// While running, `t_elapsed = min(now - t_start, t_limit)`; while paused,
/// `t_start` is re-derived every tick as `now - t_elapsed` so that elapsed
/// time freezes in place.
#[derive(Debug, Clone)]
pub struct TimerSession {
    /// Countdown limit in seconds
    t_limit: f64,
    /// Monotonic clock reading at (re)start
    t_start: f64,
    /// Elapsed seconds, clamped to `[0, t_limit]`
    t_elapsed: f64,
    phase: TimerPhase,
    quit_requested: bool,
}

impl TimerSession {
    /// Starts a new session at monotonic time `now`.
    pub fn new(t_limit: f64, now: f64) -> Self {
        debug!("t_limit={t_limit}, now={now}");
        Self {
            t_limit,
            t_start: now,
            t_elapsed: 0.0,
            phase: TimerPhase::Running,
            quit_requested: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Elapsed seconds, clamped to `[0, t_limit]`.
    pub fn elapsed(&self) -> f64 {
        self.t_elapsed
    }

    /// Remaining seconds, clamped to `[0, t_limit]`.
    pub fn remaining(&self) -> f64 {
        self.t_limit - self.t_elapsed
    }

    /// Countdown limit in seconds.
    pub fn limit(&self) -> f64 {
        self.t_limit
    }

    /// Elapsed rate in percent, `0.0..=100.0`.
    pub fn rate(&self) -> f64 {
        if self.t_limit <= 0.0 {
            100.0
        } else {
            (self.t_elapsed / self.t_limit * 100.0).clamp(0.0, 100.0)
        }
    }

    /// True once `fn quit` has been applied.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// True while the session still needs ticking (Running or Paused).
    pub fn is_active(&self) -> bool {
        matches!(self.phase, TimerPhase::Running | TimerPhase::Paused)
    }

    /// Advances the session to monotonic time `now`.
    ///
    /// Returns `true` when this tick crossed the limit and entered the
    /// alarm phase.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.phase {
            TimerPhase::Running => {
                self.t_elapsed = (now - self.t_start).clamp(0.0, self.t_limit);
                if self.t_elapsed >= self.t_limit {
                    debug!("expired: t_elapsed={}", self.t_elapsed);
                    self.phase = TimerPhase::Alarm;
                    return true;
                }
            }
            TimerPhase::Paused => {
                // Freeze elapsed time by dragging the start point along.
                self.t_start = now - self.t_elapsed;
            }
            TimerPhase::Alarm | TimerPhase::Done => {}
        }
        false
    }

    /// Toggles Running <-> Paused. No effect in other phases.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            TimerPhase::Running => TimerPhase::Paused,
            TimerPhase::Paused => TimerPhase::Running,
            other => other,
        };
        debug!("phase={:?}", self.phase);
    }

    /// True while paused.
    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Shifts elapsed time forward by `delta` seconds, clamped at the limit.
    ///
    /// Works identically whether paused or running.
    pub fn seek_forward(&mut self, delta: f64, now: f64) {
        self.t_start -= delta;
        if now - self.t_start > self.t_limit {
            self.t_start = now - self.t_limit;
        }
        self.t_elapsed = (now - self.t_start).clamp(0.0, self.t_limit);
        debug!("t_elapsed={}", self.t_elapsed);
    }

    /// Shifts elapsed time backward by `delta` seconds.
    ///
    /// Seeking past the start pins `t_start` to `now`, i.e. elapsed time
    /// restarts from zero.
    pub fn seek_backward(&mut self, delta: f64, now: f64) {
        self.t_start += delta;
        if self.t_start > now {
            self.t_start = now;
        }
        self.t_elapsed = (now - self.t_start).clamp(0.0, self.t_limit);
        debug!("t_elapsed={}", self.t_elapsed);
    }

    /// Ends the session immediately without entering the alarm phase.
    pub fn skip(&mut self) {
        debug!("");
        self.phase = TimerPhase::Done;
    }

    /// Ends the session and requests quit-propagation to the caller.
    ///
    /// Suppresses the alarm: quitting while Running or Paused never rings,
    /// and quitting while the alarm is active stops it.
    pub fn quit(&mut self) {
        debug!("");
        self.phase = TimerPhase::Done;
        self.quit_requested = true;
    }

    /// Leaves the alarm phase after acknowledgement or exhaustion.
    pub fn finish_alarm(&mut self) {
        if self.phase == TimerPhase::Alarm {
            self.phase = TimerPhase::Done;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
