//! # Lifecycle events emitted by the supervisor, worker, and trial runner.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Worker events**: a worker starting, finishing, or being cancelled
//! - **Trial events**: per-trial sequencing (starting, passed, failed)
//! - **Shutdown events**: shutdown request and grace-period outcome
//!
//! The [`Event`] struct carries metadata such as a timestamp, the worker id,
//! the trial index, and a failure reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order.
//!
//! ## Example
//! ```rust
//! use churner::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::TrialFailed)
//!     .with_worker(1)
//!     .with_trial(4)
//!     .with_reason("terminate failed: boom");
//!
//! assert_eq!(ev.kind, EventKind::TrialFailed);
//! assert_eq!(ev.trial, Some(4));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::WorkerId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of harness events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Worker lifecycle ===
    /// A worker began its trial loop.
    ///
    /// Sets: `worker`, `at`, `seq`.
    WorkerStarted,

    /// A worker observed cancellation and unwound its loop early.
    ///
    /// Sets: `worker`, `trial` (the trial it was in, if any), `at`, `seq`.
    WorkerCancelled,

    /// A worker exited and is about to notify the supervisor.
    ///
    /// Published whether the loop completed fully or was cancelled.
    ///
    /// Sets: `worker`, `at`, `seq`.
    WorkerFinished,

    // === Trial sequencing ===
    /// A trial is starting.
    ///
    /// Sets: `worker`, `trial`, `at`, `seq`.
    TrialStarting,

    /// A trial ran the full listen/terminate/remove/terminate sequence.
    ///
    /// Sets: `worker`, `trial`, `at`, `seq`.
    TrialPassed,

    /// A trial failed on a store error; the worker continues with the next.
    ///
    /// Sets: `worker`, `trial`, `reason`, `at`, `seq`.
    TrialFailed,

    // === Shutdown ===
    /// Shutdown requested (OS signal observed).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    /// The worker reported completion within the grace period.
    ///
    /// Sets: `worker`, `at`, `seq`.
    StoppedWithinGrace,

    /// Grace period exceeded; the worker never reported completion.
    ///
    /// Sets: `at`, `seq`.
    GraceExceeded,
}

/// Harness event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Worker the event belongs to, if applicable.
    pub worker: Option<WorkerId>,
    /// Zero-based trial index, if applicable.
    pub trial: Option<u32>,
    /// Human-readable reason (trial failures).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next global sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            worker: None,
            trial: None,
            reason: None,
        }
    }

    /// Attaches a worker id.
    #[inline]
    pub fn with_worker(mut self, worker: WorkerId) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Attaches a trial index.
    #[inline]
    pub fn with_trial(mut self, trial: u32) -> Self {
        self.trial = Some(trial);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
