//! # Supervisor: at-most-one-worker ownership and completion routing.
//!
//! The [`Supervisor`] owns the event bus, the subscriber fan-out, the
//! injected store client, and — at most — one live [`Worker`].
//!
//! ## High-level flow
//! ```text
//! request_start() ── none active ──► spawn Worker(child token)
//!                 └─ one active  ──► no-op
//!
//! Worker ── done channel ──► join_worker() ──► on_worker_complete(id)
//!                                                 ├─ id matches   → clear tracked handle
//!                                                 └─ id mismatch  → RuntimeError::WorkerMismatch
//!
//! shutdown() ──► token.cancel()      (fire-and-forget, never blocks)
//!
//! run():
//!   subscriber_listener()            (Bus → SubscriberSet fan-out)
//!   request_start()
//!   select {
//!     completion arrives → route through on_worker_complete
//!     OS signal          → publish ShutdownRequested, shutdown(),
//!                          then wait up to cfg.grace for the completion
//!                          (GraceExceeded if it never comes)
//!   }
//! ```
//!
//! ## Rules
//! - The worker never holds a reference back to the supervisor; the
//!   completion channel is the only link and the supervisor owns both ends.
//! - Control operations are expected to run from one context at a time; the
//!   completion hand-off crosses tasks and goes through the channel.
//! - `bind()` is rejected unconditionally: this unit is start/stop only.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::shutdown;
use crate::core::worker::{next_worker_id, Worker, WorkerId};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::store::StoreClient;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Tracked handle to the live worker.
struct WorkerHandle {
    id: WorkerId,
    token: CancellationToken,
}

/// Owns at most one worker and routes its completion notification.
pub struct Supervisor {
    /// Global harness configuration.
    pub cfg: Config,
    /// Event bus shared with the worker and trial runner.
    pub bus: Bus,
    subs: Arc<SubscriberSet>,
    client: Arc<dyn StoreClient>,
    active: Option<WorkerHandle>,
    done_tx: mpsc::UnboundedSender<WorkerId>,
    done_rx: mpsc::UnboundedReceiver<WorkerId>,
}

impl Supervisor {
    /// Creates a supervisor around the injected store client.
    pub fn new(cfg: Config, client: Arc<dyn StoreClient>, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity);
        let subs = Arc::new(SubscriberSet::new(subscribers));
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            cfg,
            bus,
            subs,
            client,
            active: None,
            done_tx,
            done_rx,
        }
    }

    /// Starts a worker if none is active.
    ///
    /// Returns `true` if a worker was spawned, `false` for the idempotent
    /// no-op while one is already tracked.
    pub fn request_start(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }

        let id = next_worker_id();
        let token = CancellationToken::new();
        let worker = Worker::new(
            id,
            &self.cfg,
            Arc::clone(&self.client),
            self.bus.clone(),
            self.done_tx.clone(),
        );
        tokio::spawn(worker.run(token.clone()));
        self.active = Some(WorkerHandle { id, token });
        true
    }

    /// Id of the currently tracked worker, if any.
    pub fn active_worker(&self) -> Option<WorkerId> {
        self.active.as_ref().map(|h| h.id)
    }

    /// Routes a completion notification.
    ///
    /// A notification from a worker that is not the tracked one is a
    /// programming error and surfaces loudly as
    /// [`RuntimeError::WorkerMismatch`]; on a match the tracked handle is
    /// cleared and a new `request_start` becomes possible.
    pub fn on_worker_complete(&mut self, worker: WorkerId) -> Result<(), RuntimeError> {
        let active = self.active_worker();
        if active == Some(worker) {
            self.active = None;
            Ok(())
        } else {
            Err(RuntimeError::WorkerMismatch { worker, active })
        }
    }

    /// Cancels the active worker, if any. Fire-and-forget: the tracked
    /// handle stays in place until the worker's completion notification
    /// arrives.
    pub fn shutdown(&mut self) {
        if let Some(handle) = &self.active {
            handle.token.cancel();
        }
    }

    /// The supervisor offers no request/response surface.
    pub fn bind(&self) -> Result<(), RuntimeError> {
        Err(RuntimeError::BindUnsupported)
    }

    /// Awaits the next completion notification and routes it.
    pub async fn join_worker(&mut self) -> Result<WorkerId, RuntimeError> {
        let id = self.recv_done().await;
        self.on_worker_complete(id)?;
        Ok(id)
    }

    /// Service-style driver: start a worker, then run it to completion or
    /// cancel it on an OS shutdown signal.
    pub async fn run(&mut self) -> Result<(), RuntimeError> {
        self.subscriber_listener();
        self.request_start();

        let completed = tokio::select! {
            id = self.done_rx.recv() => id,
            _ = shutdown::wait_for_shutdown_signal() => None,
        };

        match completed {
            Some(id) => {
                self.on_worker_complete(id)?;
                Ok(())
            }
            None => {
                self.bus.publish(Event::now(EventKind::ShutdownRequested));
                self.shutdown();
                self.join_with_grace().await
            }
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    /// Waits up to `cfg.grace` for the cancelled worker's completion.
    async fn join_with_grace(&mut self) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        match time::timeout(grace, self.recv_done()).await {
            Ok(id) => {
                self.on_worker_complete(id)?;
                self.bus
                    .publish(Event::now(EventKind::StoppedWithinGrace).with_worker(id));
                Ok(())
            }
            Err(_elapsed) => {
                self.bus.publish(Event::now(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded {
                    grace,
                    worker: self.active_worker(),
                })
            }
        }
    }

    /// Receives one completion notification.
    async fn recv_done(&mut self) -> WorkerId {
        // The supervisor keeps a sender alive, so the channel cannot close.
        self.done_rx
            .recv()
            .await
            .expect("done channel open while supervisor holds a sender")
    }
}
