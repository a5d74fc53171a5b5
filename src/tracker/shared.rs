//! Thread-safe handle around a [`BestValueTracker`]

use std::sync::{Arc, Mutex, MutexGuard};

use super::{BestValueTracker, TrackerSnapshot};
use crate::{Error, Result};

/// Cloneable, thread-safe tracker handle.
///
/// Each update runs read-compare-write under one exclusive lock, so
/// concurrent updates to the same metric never lose an improvement.
///
/// # Example
///
/// ```rust
/// use best_tracker::{BestValueTracker, SharedTracker};
///
/// let tracker = BestValueTracker::from_metrics([("loss", false)], true)?;
/// let shared = SharedTracker::new(tracker);
///
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.update(&[0.3], 1)).join().unwrap()?;
///
/// assert_eq!(shared.best_value("loss")?, Some(0.3));
/// # Ok::<(), best_tracker::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SharedTracker {
    inner: Arc<Mutex<BestValueTracker>>,
}

impl SharedTracker {
    /// Wrap a tracker for shared use.
    #[must_use]
    pub fn new(tracker: BestValueTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// See [`BestValueTracker::update`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] on a wrong value count, or
    /// [`Error::LockPoisoned`] if another thread panicked holding the lock.
    pub fn update(&self, values: &[f64], step: u64) -> Result<()> {
        self.lock()?.update(values, step)
    }

    /// See [`BestValueTracker::best_value`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned.
    pub fn best_value(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.lock()?.best_value(name))
    }

    /// See [`BestValueTracker::best_step`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned.
    pub fn best_step(&self, name: &str) -> Result<Option<u64>> {
        Ok(self.lock()?.best_step(name))
    }

    /// See [`BestValueTracker::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<TrackerSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    /// See [`BestValueTracker::render`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock is poisoned.
    pub fn render(&self) -> Result<String> {
        Ok(self.lock()?.render())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BestValueTracker>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned)
    }
}

impl From<BestValueTracker> for SharedTracker {
    fn from(tracker: BestValueTracker) -> Self {
        Self::new(tracker)
    }
}
