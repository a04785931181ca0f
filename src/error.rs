//! Error types used by the churn harness.
//!
//! This module defines two main error enums:
//!
//! - [`RuntimeError`] — errors raised by the supervisor itself.
//! - [`TrialError`] — errors raised by a single lifecycle trial.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.
//! Store-level failures live in [`StoreError`](crate::StoreError);
//! a trial folds them into [`TrialError`] at its boundary.

use std::time::Duration;
use thiserror::Error;

use crate::core::WorkerId;

/// # Errors produced by the supervisor.
///
/// Only [`RuntimeError::WorkerMismatch`] and [`RuntimeError::BindUnsupported`]
/// represent programming errors; everything a trial can hit is recoverable and
/// stays inside the worker loop.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A completion notification arrived from a worker the supervisor does
    /// not currently track. Invariant violation: at most one live worker.
    #[error("completion from worker {worker}, but tracked worker is {active:?}")]
    WorkerMismatch {
        /// Id the notification reported.
        worker: WorkerId,
        /// Id the supervisor currently tracks, if any.
        active: Option<WorkerId>,
    },

    /// The supervisor offers no request/response surface; binding to it is
    /// rejected unconditionally.
    #[error("bind not supported: the supervisor is start/stop only")]
    BindUnsupported,

    /// The worker did not report completion within the shutdown grace period.
    #[error("shutdown grace {grace:?} exceeded; worker {worker:?} still running")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// The worker that was still tracked when the grace period expired.
        worker: Option<WorkerId>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::WorkerMismatch { .. } => "runtime_worker_mismatch",
            RuntimeError::BindUnsupported => "runtime_bind_unsupported",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::WorkerMismatch { worker, active } => {
                format!("worker mismatch: reported={worker} tracked={active:?}")
            }
            RuntimeError::BindUnsupported => "bind not supported".to_string(),
            RuntimeError::GraceExceeded { grace, worker } => {
                format!("grace exceeded after {grace:?}; worker={worker:?}")
            }
        }
    }
}

/// # Errors produced by one lifecycle trial.
///
/// A failed trial is logged and counted; it never takes the worker down.
/// [`TrialError::Canceled`] is not a failure: it is the cancellation signal
/// and unwinds the worker loop.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TrialError {
    /// The listener stream delivered an error instead of a snapshot, or the
    /// document handle could not be resolved.
    #[error("listen failed: {error}")]
    Listen {
        /// The underlying store error message.
        error: String,
    },

    /// A terminate request completed with an error.
    #[error("terminate failed: {error}")]
    Terminate {
        /// The underlying store error message.
        error: String,
    },

    /// The worker was cancelled while this trial was blocked in a wait.
    #[error("trial cancelled")]
    Canceled,
}

impl TrialError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TrialError::Listen { .. } => "trial_listen_failed",
            TrialError::Terminate { .. } => "trial_terminate_failed",
            TrialError::Canceled => "trial_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TrialError::Listen { error } => format!("listen: {error}"),
            TrialError::Terminate { error } => format!("terminate: {error}"),
            TrialError::Canceled => "cancelled".to_string(),
        }
    }

    /// True if this outcome is the cancellation signal rather than a failure.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TrialError::Canceled)
    }
}
