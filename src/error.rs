//! Error types for best-tracker
//!
//! Both tracker failures are programmer errors: they surface immediately and
//! are never retried or swallowed.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// best-tracker error types
#[derive(Error, Debug)]
pub enum Error {
    /// Update called with the wrong number of values (no state was touched)
    #[error("Arity mismatch: expected {expected} values (one per configured metric), got {actual}\nSupply values in the metrics' declared order.")]
    ArityMismatch {
        /// Number of configured metrics
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Empty or malformed metric configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A thread panicked while holding the shared tracker lock
    #[error("Tracker lock poisoned (a thread panicked mid-update)")]
    LockPoisoned,
}
