//! # Event subscribers and fan-out.
//!
//! This module provides the observer side of the harness:
//! - [`Subscribe`] — trait for plugging custom event handlers
//! - [`SubscriberSet`] — non-blocking fan-out with per-subscriber queues
//! - `LogWriter` — stdout line-per-event writer (feature `logging`)

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
