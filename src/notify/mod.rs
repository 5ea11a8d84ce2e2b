//! Best-effort desktop notifications.
//!
//! Fired when a Pomodoro phase completes. Notification failures never fail
//! the timer run; they are logged and dropped.

use notify_rust::Notification;
use tracing::{debug, warn};

use crate::types::PhaseKind;

/// Sends a phase-completion notification.
pub fn phase_done(phase: PhaseKind) {
    let body = match phase {
        PhaseKind::Work => "Work phase done. Time for a break.",
        PhaseKind::ShortBreak => "Break over. Back to work.",
        PhaseKind::LongBreak => "Long break over. Starting a new cycle.",
    };
    debug!("phase={phase:?}");

    if let Err(e) = Notification::new()
        .summary(&format!("tmr: {}", phase.title()))
        .body(body)
        .show()
    {
        warn!("notification failed: {e}");
    }
}
