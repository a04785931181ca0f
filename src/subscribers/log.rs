//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable, single line
//! per event format — the moral equivalent of the original harness tailing
//! a fixed log tag.
//!
//! ## Output format
//! ```text
//! [worker-started] worker=1
//! [trial-starting] worker=1 trial=0
//! [trial-passed] worker=1 trial=0
//! [trial-failed] worker=1 trial=3 reason="terminate failed: boom"
//! [worker-cancelled] worker=1
//! [worker-finished] worker=1
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use —
/// implement a custom [`Subscribe`] for structured logging.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WorkerStarted => {
                println!("[worker-started] worker={:?}", e.worker);
            }
            EventKind::WorkerCancelled => {
                println!("[worker-cancelled] worker={:?}", e.worker);
            }
            EventKind::WorkerFinished => {
                println!("[worker-finished] worker={:?}", e.worker);
            }
            EventKind::TrialStarting => {
                println!("[trial-starting] worker={:?} trial={:?}", e.worker, e.trial);
            }
            EventKind::TrialPassed => {
                println!("[trial-passed] worker={:?} trial={:?}", e.worker, e.trial);
            }
            EventKind::TrialFailed => {
                println!(
                    "[trial-failed] worker={:?} trial={:?} reason={:?}",
                    e.worker, e.trial, e.reason
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::StoppedWithinGrace => {
                println!("[stopped-within-grace] worker={:?}", e.worker);
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
