//! Comparison direction for a tracked metric

use serde::{Deserialize, Serialize};

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values are better (accuracy, AUROC)
    HigherIsBetter,
    /// Smaller values are better (loss, error rate)
    LowerIsBetter,
}

impl Direction {
    /// `true` for [`Direction::HigherIsBetter`], matching the boolean flag
    /// form used in configuration maps.
    #[must_use]
    pub const fn larger_is_better(self) -> bool {
        matches!(self, Self::HigherIsBetter)
    }

    /// Whether `candidate` strictly beats `current`.
    ///
    /// An unset `current` loses to any candidate that is not NaN. Ties never
    /// win, so the earliest step at which a best value occurred is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use best_tracker::Direction;
    ///
    /// assert!(Direction::LowerIsBetter.is_better(0.4, Some(0.5)));
    /// assert!(!Direction::LowerIsBetter.is_better(0.4, Some(0.4)));
    /// assert!(Direction::HigherIsBetter.is_better(-1e300, None));
    /// ```
    #[must_use]
    pub fn is_better(self, candidate: f64, current: Option<f64>) -> bool {
        match (self, current) {
            (_, None) => !candidate.is_nan(),
            (Self::HigherIsBetter, Some(old)) => candidate > old,
            (Self::LowerIsBetter, Some(old)) => candidate < old,
        }
    }
}

impl From<bool> for Direction {
    fn from(larger_is_better: bool) -> Self {
        if larger_is_better {
            Self::HigherIsBetter
        } else {
            Self::LowerIsBetter
        }
    }
}
