//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by the supervisor, the
//! worker, and the trial runner.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor`, `Worker`, the trial runner.
//! - **Consumers**: `Supervisor::subscriber_listener()` (fans out to the
//!   `SubscriberSet`) and any test that subscribes directly.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
