//! # Run a single lifecycle trial.
//!
//! Executes one pass of the churn sequence against the store client and
//! publishes the trial's terminal event to the [`Bus`].
//!
//! ## Sequence
//! ```text
//! document(path)
//!   → listen(callback)          (fresh latch; callback signals every event)
//!   → await first snapshot
//!   → terminate() + await       (fresh latch on the completion callback)
//!   → registration.remove()
//!   → terminate() + await       (again, deliberately)
//! ```
//!
//! The double terminate straddling the listener removal is the exact
//! ordering suspected of racing in the client under test. It is never
//! reordered, deduplicated, or batched.
//!
//! ## Rules
//! - A store error at any step fails **this trial only**: publishes
//!   `TrialFailed` and returns the error; the worker moves on.
//! - Cancellation observed during any await returns `Canceled` with no
//!   terminal trial event; the worker publishes the cancellation.
//! - On cancellation no partial teardown is attempted beyond releasing the
//!   wait; in particular the listener is left registered.

use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::completion::AsyncCompletion;
use crate::core::listener::SnapshotListener;
use crate::core::worker::WorkerId;
use crate::error::TrialError;
use crate::events::{Bus, Event, EventKind};
use crate::store::{StoreClient, StoreError};

/// Executes one trial, publishing its terminal event to `bus`.
///
/// Returns `Ok(())` on a fully sequenced pass, `Err(Canceled)` if the worker
/// was cancelled mid-trial, and any other error on a store failure.
pub(crate) async fn run_trial(
    client: &dyn StoreClient,
    path: &str,
    worker: WorkerId,
    trial: u32,
    token: &CancellationToken,
    bus: &Bus,
) -> Result<(), TrialError> {
    match exercise(client, path, token).await {
        Ok(()) => {
            bus.publish(
                Event::now(EventKind::TrialPassed)
                    .with_worker(worker)
                    .with_trial(trial),
            );
            Ok(())
        }
        Err(TrialError::Canceled) => Err(TrialError::Canceled),
        Err(e) => {
            bus.publish(
                Event::now(EventKind::TrialFailed)
                    .with_worker(worker)
                    .with_trial(trial)
                    .with_reason(e.as_message()),
            );
            Err(e)
        }
    }
}

/// The churn sequence itself, with cancellable waits at every async step.
async fn exercise(
    client: &dyn StoreClient,
    path: &str,
    token: &CancellationToken,
) -> Result<(), TrialError> {
    let doc = client.document(path).map_err(|e| TrialError::Listen {
        error: e.to_string(),
    })?;

    let listener = SnapshotListener::new();
    let registration = doc.listen(listener.callback());

    tokio::select! {
        _ = listener.first_event() => {}
        _ = token.cancelled() => return Err(TrialError::Canceled),
    }
    if let Some(err) = listener.first_error() {
        return Err(TrialError::Listen {
            error: err.to_string(),
        });
    }

    await_terminate(client, token).await?;
    registration.remove();
    await_terminate(client, token).await?;

    Ok(())
}

/// Requests client termination and awaits its completion callback.
async fn await_terminate(
    client: &dyn StoreClient,
    token: &CancellationToken,
) -> Result<(), TrialError> {
    let done = Arc::new(AsyncCompletion::new());
    let failure: Arc<OnceLock<StoreError>> = Arc::new(OnceLock::new());

    let latch = Arc::clone(&done);
    let slot = Arc::clone(&failure);
    client.terminate(Box::new(move |result| {
        if let Err(err) = result {
            let _ = slot.set(err);
        }
        latch.signal();
    }));

    tokio::select! {
        _ = done.wait() => {}
        _ = token.cancelled() => return Err(TrialError::Canceled),
    }

    match failure.get() {
        Some(err) => Err(TrialError::Terminate {
            error: err.to_string(),
        }),
        None => Ok(()),
    }
}
