//! Text rendering and serializable snapshots of tracker state
//!
//! Flat best keys follow the `best_<metric>_value` / `best_<metric>_step`
//! naming used by training loggers, in declaration order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BestValueTracker;
use crate::Result;

const DIRECTION_NOTE: &str = "(key: metric, value: bool if larger is better)";

/// Point-in-time view of a tracker: configuration plus flat best values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    metrics: Map<String, Value>,
    best: Map<String, Value>,
    track_step: bool,
}

impl TrackerSnapshot {
    /// Metric name -> `true` if larger is better, in declaration order.
    #[must_use]
    pub const fn metrics(&self) -> &Map<String, Value> {
        &self.metrics
    }

    /// Flat best values (and steps), unset entries as `null`.
    #[must_use]
    pub const fn best(&self) -> &Map<String, Value> {
        &self.best
    }

    /// Whether the snapshot includes step keys.
    #[must_use]
    pub const fn track_step(&self) -> bool {
        self.track_step
    }

    /// Serialize as pretty JSON (4-space indent).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(to_pretty_json(self)?)
    }
}

impl BestValueTracker {
    /// Metric name -> direction flag (`true` = larger is better).
    #[must_use]
    pub fn direction_flags(&self) -> Map<String, Value> {
        self.config
            .metrics()
            .iter()
            .map(|spec| {
                (
                    spec.name().to_string(),
                    Value::Bool(spec.direction().larger_is_better()),
                )
            })
            .collect()
    }

    /// Flat `best_<metric>_value` (and `best_<metric>_step` when steps are
    /// tracked) entries in declaration order. Unset entries are `null`;
    /// infinite values are the strings `"Infinity"` / `"-Infinity"`.
    #[must_use]
    pub fn flat_values(&self) -> Map<String, Value> {
        let track_step = self.track_step();
        let mut flat = Map::with_capacity(self.len() * if track_step { 2 } else { 1 });
        for (spec, entry) in self.entries() {
            flat.insert(
                format!("best_{}_value", spec.name()),
                entry.value().map_or(Value::Null, value_to_json),
            );
            if track_step {
                flat.insert(
                    format!("best_{}_step", spec.name()),
                    entry.step().map_or(Value::Null, Value::from),
                );
            }
        }
        flat
    }

    /// Capture the current configuration and best values.
    #[must_use]
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            metrics: self.direction_flags(),
            best: self.flat_values(),
            track_step: self.track_step(),
        }
    }

    /// Human-readable summary of configuration and best values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use best_tracker::BestValueTracker;
    ///
    /// let mut tracker = BestValueTracker::from_metrics([("val_loss", false)], true)?;
    /// tracker.update(&[0.25], 7)?;
    /// let text = tracker.render();
    /// assert!(text.contains("\"best_val_loss_value\": 0.25"));
    /// assert!(text.contains("\"best_val_loss_step\": 7"));
    /// # Ok::<(), best_tracker::Error>(())
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BestValueTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metrics = to_pretty_json(&self.direction_flags()).map_err(|_| fmt::Error)?;
        let best = to_pretty_json(&self.flat_values()).map_err(|_| fmt::Error)?;
        let steps = if self.track_step() { " and steps" } else { "" };

        writeln!(f, "::BestValueTracker::")?;
        writeln!(f, "Tracking the best values of the following metrics:")?;
        writeln!(f, "{metrics}")?;
        writeln!(f, "{DIRECTION_NOTE}")?;
        writeln!(f, "Best values{steps}:")?;
        write!(f, "{best}")
    }
}

// JSON numbers cannot be infinite; serde_json would write them as `null`.
fn value_to_json(value: f64) -> Value {
    if value.is_finite() {
        Value::from(value)
    } else if value > 0.0 {
        Value::String("Infinity".to_string())
    } else {
        Value::String("-Infinity".to_string())
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut tracker =
            BestValueTracker::from_metrics([("val_loss", false), ("val_auroc", true)], true)
                .unwrap();
        tracker.update(&[0.5, 0.7], 1).unwrap();

        let expected = r#"::BestValueTracker::
Tracking the best values of the following metrics:
{
    "val_loss": false,
    "val_auroc": true
}
(key: metric, value: bool if larger is better)
Best values and steps:
{
    "best_val_loss_value": 0.5,
    "best_val_loss_step": 1,
    "best_val_auroc_value": 0.7,
    "best_val_auroc_step": 1
}"#;
        assert_eq!(tracker.render(), expected);
    }

    #[test]
    fn test_render_unset_without_steps() {
        let tracker = BestValueTracker::from_metrics([("loss", false)], false).unwrap();
        let text = tracker.render();
        assert!(text.contains("Best values:\n"));
        assert!(text.contains("\"best_loss_value\": null"));
        assert!(!text.contains("step"));
    }

    #[test]
    fn test_render_infinite_best_is_not_null() {
        let mut tracker = BestValueTracker::from_metrics([("loss", false)], true).unwrap();
        tracker.update(&[f64::NEG_INFINITY], 3).unwrap();
        let text = tracker.render();
        assert!(!text.contains("\"best_loss_value\": null"));
        assert!(text.contains("\"best_loss_value\": \"-Infinity\""));
        assert!(text.contains("\"best_loss_step\": 3"));

        let mut tracker = BestValueTracker::from_metrics([("acc", true)], false).unwrap();
        tracker.update(&[f64::INFINITY], 1).unwrap();
        assert_eq!(
            tracker.flat_values()["best_acc_value"],
            Value::String("Infinity".to_string())
        );
    }

    #[test]
    fn test_snapshot_json() {
        let mut tracker = BestValueTracker::from_metrics([("acc", true)], true).unwrap();
        tracker.update(&[0.9], 4).unwrap();
        let snapshot = tracker.snapshot();
        assert!(snapshot.track_step());
        assert_eq!(snapshot.metrics()["acc"], Value::Bool(true));
        assert_eq!(snapshot.best()["best_acc_step"], Value::from(4_u64));

        let json = snapshot.to_json().unwrap();
        let parsed: TrackerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
