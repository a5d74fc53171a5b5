//! Best-so-far tracking for named training metrics
//!
//! A [`BestValueTracker`] is configured once with an ordered set of metrics,
//! each either higher- or lower-is-better. Every training step the caller
//! hands it one value per metric (in declaration order); the tracker keeps
//! the best value seen so far and, optionally, the step it occurred at.
//!
//! ## Usage
//!
//! ```rust
//! use best_tracker::{BestValueTracker, TrackerConfig};
//!
//! let config = TrackerConfig::builder()
//!     .lower_is_better("val_loss")
//!     .higher_is_better("val_auroc")
//!     .build()?;
//! let mut tracker = BestValueTracker::new(config)?;
//!
//! tracker.update(&[0.5, 0.70], 1)?;
//! tracker.update(&[0.4, 0.65], 2)?;
//!
//! assert_eq!(tracker.best_value("val_loss"), Some(0.4));
//! assert_eq!(tracker.best_step("val_auroc"), Some(1));
//! # Ok::<(), best_tracker::Error>(())
//! ```

mod config;
mod direction;
mod render;
mod shared;

pub use config::{MetricSpec, TrackerConfig, TrackerConfigBuilder};
pub use direction::Direction;
pub use render::TrackerSnapshot;
pub use shared::SharedTracker;

use serde::Serialize;

use crate::{Error, Result};

/// Best value (and step) recorded for one metric.
///
/// Both fields start unset and are only ever written together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BestEntry {
    value: Option<f64>,
    step: Option<u64>,
}

impl BestEntry {
    /// Best value so far, `None` before the first accepted observation.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Step of the best value. Always `None` when step tracking is off.
    #[must_use]
    pub const fn step(&self) -> Option<u64> {
        self.step
    }

    /// Whether a best value has been recorded.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Tracks the best value of each configured metric across update calls.
#[derive(Debug, Clone)]
pub struct BestValueTracker {
    config: TrackerConfig,
    // Parallel to `config.metrics()`
    best: Vec<BestEntry>,
}

impl BestValueTracker {
    /// Create a tracker with every metric unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `config` fails validation (only
    /// possible for configs that were deserialized directly).
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let best = vec![BestEntry::default(); config.len()];
        tracing::debug!(
            metrics = config.len(),
            track_step = config.track_step(),
            "created best value tracker"
        );
        Ok(Self { config, best })
    }

    /// Create a tracker from `(name, direction)` pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use best_tracker::BestValueTracker;
    ///
    /// // true = larger is better
    /// let tracker = BestValueTracker::from_metrics([("val_loss", false), ("val_auroc", true)], true)?;
    /// assert_eq!(tracker.len(), 2);
    /// # Ok::<(), best_tracker::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty or malformed mapping.
    pub fn from_metrics<I, N, D>(metrics: I, track_step: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Direction>,
    {
        Self::new(TrackerConfig::new(metrics)?.with_track_step(track_step))
    }

    /// Feed one value per metric, in declaration order, observed at `step`.
    ///
    /// A value replaces the stored best only if it is strictly better, so
    /// ties keep the earliest step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] if `values.len()` differs from the
    /// number of metrics. No state is changed in that case.
    pub fn update(&mut self, values: &[f64], step: u64) -> Result<()> {
        if values.len() != self.best.len() {
            return Err(Error::ArityMismatch {
                expected: self.best.len(),
                actual: values.len(),
            });
        }

        tracing::trace!(step, "updating best values");
        let track_step = self.config.track_step();
        for ((spec, entry), &candidate) in self
            .config
            .metrics()
            .iter()
            .zip(self.best.iter_mut())
            .zip(values)
        {
            if spec.direction().is_better(candidate, entry.value) {
                tracing::debug!(
                    metric = spec.name(),
                    value = candidate,
                    previous = ?entry.value,
                    step,
                    "new best value"
                );
                entry.value = Some(candidate);
                if track_step {
                    entry.step = Some(step);
                }
            }
        }
        Ok(())
    }

    /// Best entry for a metric, `None` if the name is not configured.
    #[must_use]
    pub fn best(&self, name: &str) -> Option<&BestEntry> {
        self.position(name).map(|i| &self.best[i])
    }

    /// Best value for a metric, `None` if unset or not configured.
    #[must_use]
    pub fn best_value(&self, name: &str) -> Option<f64> {
        self.best(name).and_then(BestEntry::value)
    }

    /// Step of the best value, `None` if unset, not configured, or step
    /// tracking is off.
    #[must_use]
    pub fn best_step(&self, name: &str) -> Option<u64> {
        self.best(name).and_then(BestEntry::step)
    }

    /// Iterate `(spec, best)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&MetricSpec, &BestEntry)> {
        self.config.metrics().iter().zip(self.best.iter())
    }

    /// Configured metric names, in declaration order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.config.metric_names()
    }

    /// The tracker's configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of tracked metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Always `false`: a tracker has at least one metric.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Whether best steps are recorded.
    #[must_use]
    pub const fn track_step(&self) -> bool {
        self.config.track_step()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.config.metric_names().position(|n| n == name)
    }
}
