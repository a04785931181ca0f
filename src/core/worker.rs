//! # Worker: the trial loop.
//!
//! A [`Worker`] drives a fixed number of lifecycle trials strictly in
//! sequence on one spawned task, then reports its id over the completion
//! channel exactly once — whether the loop finished or was cancelled.
//!
//! ## Lifecycle
//! ```text
//! Supervisor::request_start()
//!      └─► tokio::spawn(worker.run(child_token))
//!
//! run:
//!   publish WorkerStarted
//!   for trial in 0..trials {
//!     ├─ token cancelled? ─► break
//!     ├─ publish TrialStarting
//!     └─ run_trial()
//!          ├─ Ok            → next trial
//!          ├─ Err(Canceled) → break        (wait woke on cancellation)
//!          └─ Err(_)        → next trial   (failure is counted, not fatal)
//!   }
//!   publish WorkerCancelled   (only if the loop broke early)
//!   publish WorkerFinished
//!   done.send(id)             (exactly once, both exit paths)
//! ```
//!
//! ## Rules
//! - Trials never overlap; trial *i+1* starts only after trial *i*'s final
//!   step completed.
//! - Cancellation is cooperative: the only blocking points are the latch
//!   waits, and each one selects against the token.
//! - The worker holds no reference back to the supervisor; the completion
//!   channel is the only link, and it is owned by the supervisor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::trial::run_trial;
use crate::error::TrialError;
use crate::events::{Bus, Event, EventKind};
use crate::store::StoreClient;

/// Identifier of one worker, unique within the process.
pub type WorkerId = u64;

/// Source for worker ids; starts at 1 so 0 never names a live worker.
static NEXT_WORKER_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_worker_id() -> WorkerId {
    NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Drives the trial loop for one run.
///
/// Created and owned by the [`Supervisor`](crate::Supervisor); consumed by
/// [`Worker::run`]. A worker instance runs at most once.
pub struct Worker {
    id: WorkerId,
    trials: u32,
    path: Arc<str>,
    client: Arc<dyn StoreClient>,
    bus: Bus,
    done: mpsc::UnboundedSender<WorkerId>,
}

impl Worker {
    pub(crate) fn new(
        id: WorkerId,
        cfg: &Config,
        client: Arc<dyn StoreClient>,
        bus: Bus,
        done: mpsc::UnboundedSender<WorkerId>,
    ) -> Self {
        Self {
            id,
            trials: cfg.trials,
            path: cfg.document_path.as_str().into(),
            client,
            bus,
            done,
        }
    }

    /// This worker's id.
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Runs the trial loop until completion or cancellation.
    ///
    /// Both exit paths converge on one completion notification; the receiver
    /// may be gone during teardown, which is fine (fire-and-forget send).
    pub async fn run(self, token: CancellationToken) {
        self.bus
            .publish(Event::now(EventKind::WorkerStarted).with_worker(self.id));

        let mut cancelled_at: Option<u32> = None;
        for trial in 0..self.trials {
            if token.is_cancelled() {
                cancelled_at = Some(trial);
                break;
            }

            self.bus.publish(
                Event::now(EventKind::TrialStarting)
                    .with_worker(self.id)
                    .with_trial(trial),
            );

            match run_trial(
                self.client.as_ref(),
                &self.path,
                self.id,
                trial,
                &token,
                &self.bus,
            )
            .await
            {
                Ok(()) => {}
                Err(TrialError::Canceled) => {
                    cancelled_at = Some(trial);
                    break;
                }
                // Failed trial: already published, keep churning.
                Err(_) => {}
            }
        }

        if let Some(trial) = cancelled_at {
            self.bus.publish(
                Event::now(EventKind::WorkerCancelled)
                    .with_worker(self.id)
                    .with_trial(trial),
            );
        }
        self.bus
            .publish(Event::now(EventKind::WorkerFinished).with_worker(self.id));
        let _ = self.done.send(self.id);
    }
}
