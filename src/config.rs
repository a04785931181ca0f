//! # Global harness configuration.
//!
//! [`Config`] defines how a churn run behaves: how many trials a worker
//! drives, which document path it listens on, the shutdown grace period,
//! and the event bus capacity.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use churner::Config;
//!
//! let mut cfg = Config::default();
//! cfg.trials = 3;
//! cfg.grace = Duration::from_secs(5);
//!
//! assert_eq!(cfg.document_path, "abc/123");
//! ```

use std::time::Duration;

/// Global configuration for the supervisor and its worker.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of lifecycle trials one worker drives per run.
    pub trials: u32,
    /// Document path the listener is attached to each trial.
    pub document_path: String,
    /// Maximum time to wait for the worker after a shutdown request.
    pub grace: Duration,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Provides the original harness defaults:
    /// - `trials = 10`
    /// - `document_path = "abc/123"`
    /// - `grace = 30s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            trials: 10,
            document_path: "abc/123".to_string(),
            grace: Duration::from_secs(30),
            bus_capacity: 1024,
        }
    }
}
