//! # Callback-style client traits.
//!
//! These traits mirror the shape of a remote document-store SDK: listeners
//! and terminate completions are delivered asynchronously, possibly from an
//! executor the harness does not own. Nothing here awaits; the trial layer
//! adapts the callbacks into awaitable form via
//! [`AsyncCompletion`](crate::AsyncCompletion).
//!
//! ## Callback contract
//! - A snapshot callback may fire **any number of times** per registration.
//! - A terminate callback fires **exactly once** per terminate request.
//! - Callbacks must be safe to invoke from any thread.

use std::sync::Arc;

use thiserror::Error;

/// Listener callback: invoked with each snapshot (or stream error).
pub type SnapshotCallback = Arc<dyn Fn(Result<DocumentSnapshot, StoreError>) + Send + Sync>;

/// Terminate-completion callback: invoked exactly once with the outcome.
pub type TerminateCallback = Box<dyn FnOnce(Result<(), StoreError>) + Send>;

/// Snapshot of a document delivered to a listener.
///
/// The harness has no data model; the payload only identifies what fired.
#[derive(Clone, Debug)]
pub struct DocumentSnapshot {
    /// Path of the document this snapshot belongs to.
    pub path: Arc<str>,
    /// Whether the document existed at snapshot time.
    pub exists: bool,
}

/// # Errors surfaced by the store client.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The document path could not be resolved.
    #[error("invalid document path: {path}")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// The listen stream failed.
    #[error("listen stream failed: {reason}")]
    Listen {
        /// Failure detail from the client.
        reason: String,
    },

    /// A terminate request failed.
    #[error("terminate failed: {reason}")]
    Terminate {
        /// Failure detail from the client.
        reason: String,
    },

    /// The client is not usable (already shut down, not connected, ...).
    #[error("client unavailable: {reason}")]
    Unavailable {
        /// Failure detail from the client.
        reason: String,
    },
}

/// # Opaque handle to the remote document-store client.
///
/// Implementations are shared behind an `Arc` and accessed by a single
/// worker at a time by convention, not by locking.
pub trait StoreClient: Send + Sync + 'static {
    /// Resolves a handle to the document at `path`.
    fn document(&self, path: &str) -> Result<Box<dyn DocumentRef>, StoreError>;

    /// Requests asynchronous termination of the client.
    ///
    /// Completion is reported through `on_complete`, exactly once, possibly
    /// on a foreign executor. Safe to call while listeners are attached and
    /// safe to call repeatedly; the double terminate per trial is the whole
    /// point of the harness.
    fn terminate(&self, on_complete: TerminateCallback);
}

/// Handle to one document; accepts snapshot listeners.
pub trait DocumentRef: Send + Sync {
    /// The path this handle was resolved from.
    fn path(&self) -> &str;

    /// Registers `on_event` as a snapshot listener on this document.
    ///
    /// The callback may be invoked any number of times, on any thread,
    /// until the returned registration is removed.
    fn listen(&self, on_event: SnapshotCallback) -> Box<dyn ListenerRegistration>;
}

/// Handle to an active listener registration.
pub trait ListenerRegistration: Send + Sync {
    /// Detaches the listener. Synchronous; called once per trial.
    fn remove(&self);
}
