//! # Snapshot listener: latch plus first-error slot.
//!
//! A trial registers one [`SnapshotListener`] per listen step. The callback
//! side signals the latch on **every** invocation; the waiting side only
//! cares about the first. A stream error is remembered once (first error
//! wins) and checked by the trial after the wait returns.

use std::sync::{Arc, OnceLock};

use crate::completion::AsyncCompletion;
use crate::store::{SnapshotCallback, StoreError};

/// Adapter between a store snapshot callback and the trial's await.
pub(crate) struct SnapshotListener {
    latch: Arc<AsyncCompletion>,
    first_error: Arc<OnceLock<StoreError>>,
}

impl SnapshotListener {
    pub(crate) fn new() -> Self {
        Self {
            latch: Arc::new(AsyncCompletion::new()),
            first_error: Arc::new(OnceLock::new()),
        }
    }

    /// Builds the callback handed to [`DocumentRef::listen`].
    ///
    /// Safe to invoke from any thread, any number of times.
    ///
    /// [`DocumentRef::listen`]: crate::DocumentRef::listen
    pub(crate) fn callback(&self) -> SnapshotCallback {
        let latch = Arc::clone(&self.latch);
        let first_error = Arc::clone(&self.first_error);
        Arc::new(move |event| {
            if let Err(err) = event {
                let _ = first_error.set(err);
            }
            latch.signal();
        })
    }

    /// Resolves once at least one snapshot (or stream error) was delivered.
    pub(crate) async fn first_event(&self) {
        self.latch.wait().await;
    }

    /// The first stream error delivered, if any.
    pub(crate) fn first_error(&self) -> Option<&StoreError> {
        self.first_error.get()
    }

    /// Number of callback invocations observed so far.
    #[allow(dead_code)]
    pub(crate) fn events_seen(&self) -> u64 {
        self.latch.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentSnapshot;

    #[tokio::test]
    async fn callback_signals_on_every_event_and_keeps_first_error() {
        let listener = SnapshotListener::new();
        let cb = listener.callback();

        cb(Ok(DocumentSnapshot {
            path: "abc/123".into(),
            exists: true,
        }));
        cb(Err(StoreError::Listen {
            reason: "first".into(),
        }));
        cb(Err(StoreError::Listen {
            reason: "second".into(),
        }));

        listener.first_event().await;
        assert_eq!(listener.events_seen(), 3);
        assert_eq!(
            listener.first_error(),
            Some(&StoreError::Listen {
                reason: "first".into()
            })
        );
    }
}
