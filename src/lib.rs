//! # best-tracker: Best-So-Far Metric Tracking
//!
//! Tracks, for a fixed set of named metrics observed over training steps,
//! the best value seen so far for each metric and the step it occurred at.
//! "Best" is configured per metric as either the maximum or the minimum.
//!
//! ## Design Principles
//!
//! - **Explicit unset state**: a metric has no best value until its first
//!   observation, no sentinel magnitudes
//! - **All-or-nothing updates**: arity is checked before any state changes
//! - **Earliest step wins**: ties never replace the stored best
//!
//! ## Example Usage
//!
//! ```rust
//! use best_tracker::BestValueTracker;
//!
//! // true = larger is better
//! let mut tracker =
//!     BestValueTracker::from_metrics([("val_loss", false), ("val_auroc", true)], true)?;
//!
//! tracker.update(&[0.5, 0.70], 1)?;
//! tracker.update(&[0.4, 0.65], 2)?;
//! tracker.update(&[0.4, 0.80], 3)?;
//!
//! assert_eq!(tracker.best_step("val_loss"), Some(2));
//! assert_eq!(tracker.best_value("val_auroc"), Some(0.80));
//! println!("{tracker}");
//! # Ok::<(), best_tracker::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod tracker;

pub use error::{Error, Result};
pub use tracker::{
    BestEntry, BestValueTracker, Direction, MetricSpec, SharedTracker, TrackerConfig,
    TrackerConfigBuilder, TrackerSnapshot,
};
