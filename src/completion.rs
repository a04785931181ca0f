//! # One-shot completion latch for callback-style async operations.
//!
//! [`AsyncCompletion`] adapts a callback that fires on some foreign executor
//! into something a worker can await. The callback side calls [`signal`];
//! the awaiting side calls [`wait`] (or [`wait_timeout`]).
//!
//! ## Rules
//! - **One-shot**: the first `signal()` transitions the latch to signaled;
//!   it never transitions back.
//! - **Counted**: every `signal()` bumps an invocation counter, signaled or
//!   not. Listeners that fire repeatedly reuse the same latch; waiters only
//!   care about the first transition.
//! - **No missed wakeup**: a `signal()` racing a `wait()` is observed; a
//!   `wait()` after `signal()` resolves immediately.
//! - The latch itself never errors. Cancelling a pending `wait()` is the
//!   caller's concern (select against a `CancellationToken`).
//!
//! [`signal`]: AsyncCompletion::signal
//! [`wait`]: AsyncCompletion::wait
//! [`wait_timeout`]: AsyncCompletion::wait_timeout

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time;

/// Thread-safe, monotonic signal/wait primitive.
///
/// Cheap to share behind an `Arc`; `signal()` is sync and callable from any
/// thread (including non-runtime callback threads), `wait()` is async.
#[derive(Debug, Default)]
pub struct AsyncCompletion {
    signaled: AtomicBool,
    count: AtomicU64,
    notify: Notify,
}

impl AsyncCompletion {
    /// Creates an unsignaled latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the latch signaled and wakes all current waiters.
    ///
    /// Callable any number of times; only the first call changes state,
    /// every call increments the invocation count.
    pub fn signal(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
        self.signaled.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Resolves once the latch has been signaled.
    ///
    /// Resolves immediately if `signal()` already ran. Registering the
    /// notification before the re-check closes the signal-races-wait window.
    pub async fn wait(&self) {
        while !self.signaled.load(Ordering::Acquire) {
            let notified = self.notify.notified();
            if self.signaled.load(Ordering::Acquire) {
                break;
            }
            notified.await;
        }
    }

    /// Timed variant of [`wait`](AsyncCompletion::wait).
    ///
    /// Returns `true` if the latch was signaled within `dur`, `false` on
    /// timeout. The latch state is unaffected by a timeout.
    pub async fn wait_timeout(&self, dur: Duration) -> bool {
        time::timeout(dur, self.wait()).await.is_ok()
    }

    /// True once `signal()` has been called at least once.
    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }

    /// Number of `signal()` invocations so far (monotonic).
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}
