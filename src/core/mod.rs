//! Runtime core: supervision and the trial loop.
//!
//! The public API from this module is [`Supervisor`], which owns at most one
//! [`Worker`] at a time, and the worker/trial machinery it drives.
//!
//! Internal modules:
//! - [`supervisor`]: at-most-one-worker ownership, completion routing, shutdown;
//! - [`worker`]: the trial loop with cooperative cancellation;
//! - [`trial`]: one pass of the listen/terminate/remove/terminate sequence;
//! - [`listener`]: snapshot listener bundling latch + first-error slot;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod listener;
mod shutdown;
mod supervisor;
mod trial;
mod worker;

pub use supervisor::Supervisor;
pub use worker::{Worker, WorkerId};
