//! Background alarm loop.
//!
//! The alarm runs on its own thread and is cooperatively cancellable
//! through a crossbeam channel: the thread's sub-sleeps double as waits on
//! the cancel receiver, so a cancel takes effect within one sub-interval.
//! The foreground joins the thread before finishing cleanup, which bounds
//! shutdown to at most one `sec1 + sec2` cycle.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::debug;

use crate::types::AlarmSpec;

// ============================================================================
// AlarmHandle
// ============================================================================

/// Handle to a running alarm thread.
pub struct AlarmHandle {
    cancel_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl AlarmHandle {
    /// True once the thread has exhausted its ring count or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Requests cancellation and waits for the thread to exit.
    pub fn cancel_and_join(self) {
        // Send fails only when the thread already exited.
        let _ = self.cancel_tx.send(());
        let _ = self.handle.join();
        debug!("alarm thread joined");
    }
}

/// Spawns the alarm thread.
///
/// Rings `spec.count` times by calling `bell`, holding the on-signal for
/// `sec1` and staying silent for `sec2` between rings.
pub fn spawn<F>(spec: AlarmSpec, mut bell: F) -> AlarmHandle
where
    F: FnMut() + Send + 'static,
{
    debug!("spec={spec:?}");
    let (cancel_tx, cancel_rx) = bounded::<()>(1);

    let handle = thread::spawn(move || {
        let sec1 = Duration::from_secs_f64(spec.sec1.max(0.0));
        let sec2 = Duration::from_secs_f64(spec.sec2.max(0.0));

        for _ in 0..spec.count {
            bell();
            match cancel_rx.recv_timeout(sec1) {
                Err(RecvTimeoutError::Timeout) => {}
                _ => return,
            }
            match cancel_rx.recv_timeout(sec2) {
                Err(RecvTimeoutError::Timeout) => {}
                _ => return,
            }
        }
    });

    AlarmHandle { cancel_tx, handle }
}

// ============================================================================
// Tests
// ============================================================================
