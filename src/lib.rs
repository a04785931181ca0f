//! # churner
//!
//! **Churner** is a lifecycle-churn harness for callback-style document-store
//! clients: it repeatedly attaches a change listener, waits for the first
//! snapshot, terminates the client, removes the listener, and terminates the
//! client again — the exact ordering suspected of racing listener teardown in
//! the client under test.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Supervisor                                                 │
//! │  - owns at most ONE Worker at a time                        │
//! │  - Bus (broadcast events) + SubscriberSet (fan-out)         │
//! │  - shutdown(): cancel the worker, fire-and-forget           │
//! └──────┬──────────────────────────────────────────────────────┘
//!        ▼ spawn(child CancellationToken)
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Worker (one spawned task)                                  │
//! │  for trial in 0..cfg.trials {                               │
//! │    listen → await first snapshot                            │
//! │    terminate → await completion                             │
//! │    remove listener                                          │
//! │    terminate → await completion   (again, deliberately)     │
//! │  }                                                          │
//! │  done channel ──► Supervisor      (exactly once)            │
//! └──────┬──────────────────────────────────────────────────────┘
//!        ▼ callbacks adapted via AsyncCompletion
//! ┌─────────────────────────────────────────────────────────────┐
//! │  dyn StoreClient (injected; opaque vendor SDK or test fake) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every await inside a trial selects against the worker's
//! [`CancellationToken`], so a shutdown request wakes a blocked trial
//! immediately and the worker unwinds without starting another step.
//!
//! ## Features
//! | Area            | Description                                        | Key types / traits            |
//! |-----------------|----------------------------------------------------|-------------------------------|
//! | **Supervision** | Start, track, and cancel the single worker.        | [`Supervisor`]                |
//! | **Trials**      | Drive the listen/terminate/remove/terminate churn. | [`Worker`], [`Config`]        |
//! | **Adaptation**  | Await callback-style async operations.             | [`AsyncCompletion`]           |
//! | **Client**      | Injected store surface with swappable fakes.       | [`StoreClient`], [`DocumentRef`] |
//! | **Observability** | Lifecycle events and subscriber fan-out.         | [`Event`], [`Subscribe`]      |
//! | **Errors**      | Typed supervisor and trial errors.                 | [`RuntimeError`], [`TrialError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use churner::{Config, StoreClient, Supervisor};
//!
//! # fn vendor_client() -> Arc<dyn StoreClient> { unimplemented!() }
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client: Arc<dyn StoreClient> = vendor_client();
//!
//!     let mut cfg = Config::default();
//!     cfg.trials = 10;
//!
//!     let mut sup = Supervisor::new(cfg, client, Vec::new());
//!     sup.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod completion;
mod config;
mod core;
mod error;
mod events;
mod store;
mod subscribers;

// ---- Public re-exports ----

pub use completion::AsyncCompletion;
pub use config::Config;
pub use core::{Supervisor, Worker, WorkerId};
pub use error::{RuntimeError, TrialError};
pub use events::{Bus, Event, EventKind};
pub use store::{
    DocumentRef, DocumentSnapshot, ListenerRegistration, SnapshotCallback, StoreClient,
    StoreError, TerminateCallback,
};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logging subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
